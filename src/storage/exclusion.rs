//! Per-mood exclusion sets of already released whispers.
//!
//! Each set is a JSON array of whisper ids stored under
//! `<prefix><lower-cased mood>`. Unreadable or malformed payloads are
//! treated as an empty set; failed writes are logged and dropped. Callers
//! never see a storage error from here.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::whispers::normalize_mood;

use super::KeyValueStore;

/// Default key prefix for exclusion sets.
pub const DEFAULT_EXCLUSION_PREFIX: &str = "espiritnu_shown_";

/// Exclusion sets over an injected key-value store.
#[derive(Debug, Clone)]
pub struct ExclusionStore {
    kv: Arc<dyn KeyValueStore>,
    prefix: String,
    /// Serializes read-modify-write cycles on insert, clear and reset.
    write_lock: Arc<Mutex<()>>,
}

impl ExclusionStore {
    /// Create an exclusion store using the default key prefix.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prefix(kv, DEFAULT_EXCLUSION_PREFIX)
    }

    /// Create an exclusion store with a custom key prefix.
    pub fn with_prefix(kv: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            kv,
            prefix: prefix.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Storage key for a mood's exclusion set.
    pub fn key_for(&self, mood: &str) -> String {
        format!("{}{}", self.prefix, normalize_mood(mood))
    }

    /// Ids excluded for `mood`.
    pub fn load(&self, mood: &str) -> HashSet<String> {
        self.load_ordered(mood).into_iter().collect()
    }

    /// Mark `whisper_id` as released for `mood` and persist immediately.
    pub fn insert(&self, mood: &str, whisper_id: &str) {
        let _guard = self.write_lock.lock();
        let mut ids = self.load_ordered(mood);
        if ids.iter().any(|id| id == whisper_id) {
            return;
        }
        ids.push(whisper_id.to_string());

        let key = self.key_for(mood);
        let payload = match serde_json::to_string(&ids) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Failed to encode exclusion set {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.kv.set(&key, &payload) {
            log::warn!("Failed to persist exclusion set {}: {}", key, e);
        }
    }

    /// Drop every exclusion recorded for `mood`.
    pub fn clear(&self, mood: &str) {
        let _guard = self.write_lock.lock();
        self.remove_unlocked(mood);
    }

    /// Ids excluded for `mood`, starting a new cycle first when they cover
    /// every id in `candidate_ids`.
    ///
    /// The check and the clear happen under one lock, so a concurrent
    /// [`insert`](Self::insert) lands either before the reset or in the new
    /// cycle. An empty candidate list never resets.
    pub fn load_or_reset<'a, I>(&self, mood: &str, candidate_ids: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let _guard = self.write_lock.lock();
        let excluded = self.load(mood);

        let mut candidates = candidate_ids.into_iter().peekable();
        if candidates.peek().is_none() {
            return excluded;
        }
        if candidates.all(|id| excluded.contains(id)) {
            log::debug!("Every whisper for mood {} released, starting a new cycle", mood);
            self.remove_unlocked(mood);
            return HashSet::new();
        }
        excluded
    }

    fn remove_unlocked(&self, mood: &str) {
        let key = self.key_for(mood);
        if let Err(e) = self.kv.remove(&key) {
            log::warn!("Failed to clear exclusion set {}: {}", key, e);
        } else {
            log::debug!("Exclusion set {} cleared", key);
        }
    }

    fn load_ordered(&self, mood: &str) -> Vec<String> {
        let key = self.key_for(mood);
        let payload = match self.kv.get(&key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("Failed to read exclusion set {}: {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&payload).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed exclusion set {}: {}", key, e);
            Vec::new()
        })
    }
}
