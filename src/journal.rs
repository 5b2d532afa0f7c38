//! Composition root: wires the catalog, selector, progression engine and
//! onboarding flag together and exposes them per user event.

use std::sync::Arc;

use anyhow::Context;

use crate::config::EspiritnuConfig;
use crate::error::ReflectionError;
use crate::identity::Identity;
use crate::onboarding::OnboardingState;
use crate::progression::{Evaluation, ProgressionEngine, ProgressionLadder, ProgressionStage};
use crate::reflections::{NewReflection, ReflectionLog, ReflectionRecord};
use crate::storage::{ExclusionStore, KeyValueStore, SqliteKeyValueStore};
use crate::whispers::{Whisper, WhisperCatalog, WhisperSelector};

/// One device's journal session.
#[derive(Debug)]
pub struct Journal {
    selector: WhisperSelector,
    engine: ProgressionEngine,
    onboarding: OnboardingState,
}

impl Journal {
    /// Open the journal with the SQLite key-value store named by `config`.
    pub fn open(config: &EspiritnuConfig) -> anyhow::Result<Self> {
        let kv = SqliteKeyValueStore::open(config.database_path.clone())
            .context("Failed to open local key-value store")?;
        Self::with_store(config, Arc::new(kv))
    }

    /// Build the journal over an existing key-value store.
    pub fn with_store(config: &EspiritnuConfig, kv: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let catalog = match &config.whispers_file {
            Some(path) => WhisperCatalog::from_file(path)?,
            None => WhisperCatalog::builtin()?,
        };
        let ladder = match &config.stages_file {
            Some(path) => ProgressionLadder::from_file(path)?,
            None => ProgressionLadder::builtin()?,
        };
        Ok(Self::from_parts(
            Arc::new(catalog),
            Arc::new(ladder),
            kv,
            config,
        ))
    }

    /// Assemble the journal from already built parts.
    pub fn from_parts(
        catalog: Arc<WhisperCatalog>,
        ladder: Arc<ProgressionLadder>,
        kv: Arc<dyn KeyValueStore>,
        config: &EspiritnuConfig,
    ) -> Self {
        let exclusions = ExclusionStore::with_prefix(Arc::clone(&kv), config.storage_prefix.clone());
        Self {
            selector: WhisperSelector::new(catalog, exclusions),
            engine: ProgressionEngine::new(ladder),
            onboarding: OnboardingState::with_key(kv, config.onboarding_key.clone()),
        }
    }

    pub fn catalog(&self) -> &WhisperCatalog {
        self.selector.catalog()
    }

    pub fn selector(&self) -> &WhisperSelector {
        &self.selector
    }

    pub fn ladder(&self) -> &ProgressionLadder {
        self.engine.ladder()
    }

    pub fn onboarding(&self) -> &OnboardingState {
        &self.onboarding
    }

    /// A whisper for the chosen mood, or `None` for a mood with no whispers.
    pub fn reveal(&self, mood: &str) -> Option<&Whisper> {
        self.selector.next_for_mood(mood)
    }

    /// The user skipped `current`: exclude it and offer another.
    pub fn release(&self, mood: &str, current: Option<&Whisper>) -> Option<&Whisper> {
        self.selector.release_and_pick_next(mood, current)
    }

    /// Save a reflection answering `whisper`.
    ///
    /// Saving does not release the whisper; it stays eligible for the mood.
    pub fn save_reflection(
        &self,
        reflections: &dyn ReflectionLog,
        identity: &Identity,
        whisper: &Whisper,
        selected_mood: &str,
        entry: &str,
    ) -> Result<ReflectionRecord, ReflectionError> {
        let draft = NewReflection::draft(whisper, selected_mood, entry)?;
        reflections.append(&identity.user_id, draft)
    }

    /// Recompute progression after the reflection list changed.
    pub fn refresh_progression(&mut self, history: &[ReflectionRecord]) -> Evaluation {
        self.engine.evaluate(history)
    }

    /// The stage recorded by the last refresh.
    pub fn current_stage(&self) -> &ProgressionStage {
        self.engine.current_stage()
    }

    /// Forget progression state, e.g. after sign-out or an account switch.
    pub fn sign_out(&mut self) {
        self.engine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflections::InMemoryReflectionLog;
    use crate::storage::InMemoryKeyValueStore;

    fn journal() -> (InMemoryKeyValueStore, Journal) {
        let kv = InMemoryKeyValueStore::new();
        let journal = Journal::with_store(&EspiritnuConfig::default(), Arc::new(kv.clone())).unwrap();
        (kv, journal)
    }

    #[test]
    fn test_reveal_release_cycle() {
        let (kv, journal) = journal();
        let first = journal.reveal("Sad").cloned();
        assert!(first.is_some());

        let next = journal.release("Sad", first.as_ref()).cloned().unwrap();
        assert_ne!(Some(&next), first.as_ref());
        assert!(kv.get("espiritnu_shown_sad").unwrap().is_some());

        assert!(journal.reveal("Nostalgic").is_none());
    }

    #[test]
    fn test_save_and_progress() {
        let (kv, mut journal) = journal();
        let log = InMemoryReflectionLog::new();
        let identity = Identity::anonymous("user-1");

        assert!(!journal.onboarding().has_onboarded());
        journal.onboarding().mark_onboarded();
        assert!(journal.onboarding().has_onboarded());

        let whisper = journal.reveal("Hopeful").cloned().unwrap();
        let saved = journal
            .save_reflection(&log, &identity, &whisper, "Hopeful", "Morning walk")
            .unwrap();
        assert_eq!(saved.mood, "Hopeful");
        assert_eq!(saved.whisper_title, whisper.title);
        // Journaling does not exclude the whisper.
        assert!(kv.get("espiritnu_shown_hopeful").unwrap().is_none());

        let blank = journal.save_reflection(&log, &identity, &whisper, "Hopeful", "   ");
        assert!(matches!(blank, Err(ReflectionError::EmptyEntry)));

        let history = log.list(&identity.user_id).unwrap();
        let eval = journal.refresh_progression(&history);
        assert_eq!(eval.stage.id, "spark");
        assert!(!eval.changed);
        assert_eq!(eval.stats.total_reflections, 1);

        journal.sign_out();
        assert_eq!(journal.current_stage().id, "spark");
    }

    #[test]
    fn test_open_with_sqlite_and_custom_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let config = EspiritnuConfig {
            storage_prefix: "t_".to_string(),
            database_path: Some(dir.path().join("local.db")),
            ..EspiritnuConfig::default()
        };

        let journal = Journal::open(&config).unwrap();
        let whisper = journal.reveal("Anxious").cloned();
        journal.release("Anxious", whisper.as_ref());

        let kv = SqliteKeyValueStore::open(config.database_path.clone()).unwrap();
        assert!(kv.get("t_anxious").unwrap().is_some());
    }

    #[test]
    fn test_missing_custom_catalog_fails() {
        let config = EspiritnuConfig {
            whispers_file: Some("/nonexistent/whispers.json".into()),
            ..EspiritnuConfig::default()
        };
        let result = Journal::with_store(&config, Arc::new(InMemoryKeyValueStore::new()));
        assert!(result.is_err());
    }
}
