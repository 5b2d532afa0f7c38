//! Runtime configuration for the journal core.
//!
//! Values come from defaults, an optional JSON file, and `ESPIRITNU_*`
//! environment variables, in increasing order of precedence.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::onboarding::DEFAULT_ONBOARDING_KEY;
use crate::storage::exclusion::DEFAULT_EXCLUSION_PREFIX;

/// Configuration for [`Journal`](crate::journal::Journal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspiritnuConfig {
    /// Key prefix for per-mood exclusion sets.
    pub storage_prefix: String,
    /// Key of the onboarding flag.
    pub onboarding_key: String,
    /// Local SQLite file. `None` uses the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Custom whisper table. `None` uses the embedded one.
    pub whispers_file: Option<PathBuf>,
    /// Custom stage ladder. `None` uses the embedded one.
    pub stages_file: Option<PathBuf>,
}

impl Default for EspiritnuConfig {
    fn default() -> Self {
        Self {
            storage_prefix: DEFAULT_EXCLUSION_PREFIX.to_string(),
            onboarding_key: DEFAULT_ONBOARDING_KEY.to_string(),
            database_path: None,
            whispers_file: None,
            stages_file: None,
        }
    }
}

impl EspiritnuConfig {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load a JSON config file, then apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        Self::from_file_with(path, |key| std::env::var(key).ok())
    }

    /// Load a JSON config file, then apply overrides from `lookup`.
    pub fn from_file_with(
        path: impl AsRef<Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Config file '{}' could not be read", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Error decoding config file '{}'", path.display()))?;
        Ok(config.with_overrides(lookup))
    }

    /// Apply overrides from `lookup`, which maps variable names such as
    /// `ESPIRITNU_DB_PATH` to values.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prefix) = lookup("ESPIRITNU_STORAGE_PREFIX") {
            self.storage_prefix = prefix;
        }
        if let Some(key) = lookup("ESPIRITNU_ONBOARDING_KEY") {
            self.onboarding_key = key;
        }
        if let Some(path) = lookup("ESPIRITNU_DB_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("ESPIRITNU_WHISPERS_FILE") {
            self.whispers_file = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("ESPIRITNU_STAGES_FILE") {
            self.stages_file = Some(PathBuf::from(path));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = EspiritnuConfig::default();
        assert_eq!(config.storage_prefix, "espiritnu_shown_");
        assert_eq!(config.onboarding_key, "espiritnu_has_onboarded");
        assert!(config.database_path.is_none());
    }

    fn lookup_in(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key: &str| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_overrides() {
        let config = EspiritnuConfig::default().with_overrides(lookup_in(HashMap::from([
            ("ESPIRITNU_STORAGE_PREFIX", "test_shown_"),
            ("ESPIRITNU_DB_PATH", "/var/lib/espiritnu/local.db"),
        ])));

        assert_eq!(config.storage_prefix, "test_shown_");
        assert_eq!(
            config.database_path.as_deref(),
            Some(Path::new("/var/lib/espiritnu/local.db"))
        );
        assert_eq!(config.onboarding_key, "espiritnu_has_onboarded");
        assert!(config.stages_file.is_none());
    }

    #[test]
    fn test_every_variable_overrides() {
        let config = EspiritnuConfig::default().with_overrides(lookup_in(HashMap::from([
            ("ESPIRITNU_STORAGE_PREFIX", "p_"),
            ("ESPIRITNU_ONBOARDING_KEY", "seen_intro"),
            ("ESPIRITNU_DB_PATH", "/data/local.db"),
            ("ESPIRITNU_WHISPERS_FILE", "/data/whispers.json"),
            ("ESPIRITNU_STAGES_FILE", "/data/stages.json"),
        ])));

        assert_eq!(
            config,
            EspiritnuConfig {
                storage_prefix: "p_".to_string(),
                onboarding_key: "seen_intro".to_string(),
                database_path: Some(PathBuf::from("/data/local.db")),
                whispers_file: Some(PathBuf::from("/data/whispers.json")),
                stages_file: Some(PathBuf::from("/data/stages.json")),
            }
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("espiritnu.json");
        std::fs::write(&path, r#"{"whispers_file": "custom.json", "storage_prefix": "f_"}"#).unwrap();

        let config = EspiritnuConfig::from_file_with(&path, |_| None).unwrap();
        assert_eq!(config.whispers_file.as_deref(), Some(Path::new("custom.json")));
        assert_eq!(config.storage_prefix, "f_");
        assert_eq!(config.onboarding_key, "espiritnu_has_onboarded");
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_environment_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("espiritnu.json");
        std::fs::write(&path, r#"{"storage_prefix": "f_", "stages_file": "ladder.json"}"#).unwrap();

        let config = EspiritnuConfig::from_file_with(
            &path,
            lookup_in(HashMap::from([("ESPIRITNU_STORAGE_PREFIX", "env_")])),
        )
        .unwrap();
        assert_eq!(config.storage_prefix, "env_");
        assert_eq!(config.stages_file.as_deref(), Some(Path::new("ladder.json")));
    }

    #[test]
    fn test_bad_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        assert!(EspiritnuConfig::from_file(dir.path().join("missing.json")).is_err());

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = EspiritnuConfig::from_file_with(&path, |_| None).unwrap_err();
        assert!(err.to_string().contains("Error decoding config file"));
    }

    #[test]
    fn test_from_env_reads_process_environment() {
        std::env::set_var("ESPIRITNU_STAGES_FILE", "/env/stages.json");
        let config = EspiritnuConfig::from_env();
        std::env::remove_var("ESPIRITNU_STAGES_FILE");

        assert_eq!(config.stages_file.as_deref(), Some(Path::new("/env/stages.json")));
    }
}
