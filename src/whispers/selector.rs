//! No-repeat whisper selection.
//!
//! Within a mood, a whisper is not offered again until every whisper of
//! that mood has been released. Once the pool is exhausted the exclusion
//! set is cleared and the next pick draws from the full mood group, so it
//! may repeat the whisper released last.
//!
//! Only an explicit release marks a whisper as shown. Displaying a whisper
//! or journaling about it leaves the exclusion set untouched.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::storage::ExclusionStore;

use super::{Whisper, WhisperCatalog};

/// Picks the next whisper for a mood.
#[derive(Debug, Clone)]
pub struct WhisperSelector {
    catalog: Arc<WhisperCatalog>,
    exclusions: ExclusionStore,
}

impl WhisperSelector {
    /// Create a selector over a shared catalog and exclusion store.
    pub fn new(catalog: Arc<WhisperCatalog>, exclusions: ExclusionStore) -> Self {
        Self {
            catalog,
            exclusions,
        }
    }

    /// The catalog this selector draws from.
    pub fn catalog(&self) -> &WhisperCatalog {
        &self.catalog
    }

    /// The exclusion sets this selector consults.
    pub fn exclusions(&self) -> &ExclusionStore {
        &self.exclusions
    }

    /// Pick the next whisper among `candidates` using the thread-local RNG.
    pub fn pick_next<'a>(&self, candidates: &'a [Whisper], mood: &str) -> Option<&'a Whisper> {
        self.pick_next_with(candidates, mood, &mut rand::thread_rng())
    }

    /// Pick the next whisper among `candidates` using `rng`.
    ///
    /// Returns `None` only when `candidates` is empty. When every candidate
    /// is excluded, the mood's exclusion set is cleared and the pick is made
    /// from all candidates.
    pub fn pick_next_with<'a, R: Rng + ?Sized>(
        &self,
        candidates: &'a [Whisper],
        mood: &str,
        rng: &mut R,
    ) -> Option<&'a Whisper> {
        if candidates.is_empty() {
            return None;
        }

        let excluded = self
            .exclusions
            .load_or_reset(mood, candidates.iter().map(|w| w.id.as_str()));
        let eligible: Vec<&Whisper> = candidates
            .iter()
            .filter(|w| !excluded.contains(&w.id))
            .collect();

        eligible.choose(rng).copied()
    }

    /// Look up the mood in the catalog and pick the next whisper.
    pub fn next_for_mood(&self, mood: &str) -> Option<&Whisper> {
        self.next_for_mood_with(mood, &mut rand::thread_rng())
    }

    /// Like [`next_for_mood`](Self::next_for_mood) with an explicit RNG.
    pub fn next_for_mood_with<R: Rng + ?Sized>(&self, mood: &str, rng: &mut R) -> Option<&Whisper> {
        self.pick_next_with(self.catalog.lookup_by_mood(mood), mood, rng)
    }

    /// Mark a whisper as released for `mood`.
    pub fn release(&self, mood: &str, whisper_id: &str) {
        self.exclusions.insert(mood, whisper_id);
    }

    /// Release the current whisper, if any, and pick a replacement.
    pub fn release_and_pick_next(&self, mood: &str, current: Option<&Whisper>) -> Option<&Whisper> {
        self.release_and_pick_next_with(mood, current, &mut rand::thread_rng())
    }

    /// Like [`release_and_pick_next`](Self::release_and_pick_next) with an
    /// explicit RNG.
    pub fn release_and_pick_next_with<R: Rng + ?Sized>(
        &self,
        mood: &str,
        current: Option<&Whisper>,
        rng: &mut R,
    ) -> Option<&Whisper> {
        if let Some(whisper) = current {
            self.release(mood, &whisper.id);
        }
        self.next_for_mood_with(mood, rng)
    }
}
