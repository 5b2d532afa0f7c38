//! Immutable, mood-grouped whisper catalog.
//!
//! The catalog is built once at startup and then shared by reference (or
//! `Arc`) with every component that needs it. Lookups never fail: an
//! unknown mood simply yields an empty slice.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::CatalogError;

use super::{normalize_mood, Whisper, MOODS};

/// Embedded whisper table shipped with the crate.
const EMBEDDED_WHISPERS_JSON: &str = include_str!("../data/whispers.json");

/// Whispers grouped by lower-cased mood, each group ordered by
/// `ordering_key` ascending.
#[derive(Debug, Clone, Default)]
pub struct WhisperCatalog {
    groups: HashMap<String, Vec<Whisper>>,
}

impl WhisperCatalog {
    /// Build the catalog from the embedded whisper table.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_WHISPERS_JSON)
    }

    /// Build the catalog from a JSON file holding an array of whispers.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Build the catalog from a JSON array of whispers.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let whispers: Vec<Whisper> = serde_json::from_str(json)?;
        Self::from_whispers(whispers)
    }

    /// Build the catalog from whisper values.
    ///
    /// Fails if two whispers share an id.
    pub fn from_whispers(whispers: Vec<Whisper>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut groups: HashMap<String, Vec<Whisper>> = HashMap::new();

        for whisper in whispers {
            if !seen.insert(whisper.id.clone()) {
                return Err(CatalogError::DuplicateId { id: whisper.id });
            }
            groups.entry(whisper.mood_key()).or_default().push(whisper);
        }

        for group in groups.values_mut() {
            group.sort_by(|a, b| a.ordering_key.total_cmp(&b.ordering_key));
        }

        log::debug!(
            "WhisperCatalog built: {} whispers across {} moods",
            seen.len(),
            groups.len()
        );

        Ok(Self { groups })
    }

    /// Whispers for a mood, compared case-insensitively.
    pub fn lookup_by_mood(&self, mood: &str) -> &[Whisper] {
        self.groups
            .get(&normalize_mood(mood))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find a whisper by id.
    pub fn get(&self, id: &str) -> Option<&Whisper> {
        self.groups.values().flatten().find(|w| w.id == id)
    }

    /// Display labels of the moods that have whispers.
    ///
    /// Built-in moods come first in [`MOODS`] order. Moods only a custom
    /// table knows follow, sorted, labelled as their first whisper spells
    /// them.
    pub fn moods(&self) -> Vec<&str> {
        let mut moods: Vec<&str> = MOODS
            .iter()
            .copied()
            .filter(|mood| self.groups.contains_key(&normalize_mood(mood)))
            .collect();

        let builtin: HashSet<String> = MOODS.iter().map(|m| normalize_mood(m)).collect();
        let mut extra: Vec<(&String, &str)> = self
            .groups
            .iter()
            .filter(|(key, _)| !builtin.contains(*key))
            .filter_map(|(key, group)| group.first().map(|w| (key, w.mood.as_str())))
            .collect();
        extra.sort_unstable_by(|a, b| a.0.cmp(b.0));
        moods.extend(extra.into_iter().map(|(_, label)| label));
        moods
    }

    /// Total number of whispers.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no whispers.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whisper(id: &str, mood: &str, key: f64) -> Whisper {
        Whisper {
            id: id.to_string(),
            mood: mood.to_string(),
            kind: None,
            title: format!("Title {}", id),
            prompt: format!("Prompt {}", id),
            expansion: String::new(),
            ordering_key: key,
        }
    }

    #[test]
    fn test_builtin_catalog_covers_every_mood() {
        let catalog = WhisperCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 35);
        for mood in MOODS {
            assert!(
                !catalog.lookup_by_mood(mood).is_empty(),
                "no whispers for {}",
                mood
            );
        }
        assert_eq!(catalog.lookup_by_mood("Anxious").len(), 7);
        assert_eq!(catalog.lookup_by_mood("Sad").len(), 4);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = WhisperCatalog::builtin().unwrap();
        let upper = catalog.lookup_by_mood("HOPEFUL");
        let mixed = catalog.lookup_by_mood("Hopeful");
        assert_eq!(upper, mixed);
        assert_eq!(upper.len(), 4);
    }

    #[test]
    fn test_unknown_mood_is_empty() {
        let catalog = WhisperCatalog::builtin().unwrap();
        assert!(catalog.lookup_by_mood("Bored").is_empty());
        assert!(catalog.lookup_by_mood("").is_empty());
    }

    #[test]
    fn test_group_sorted_by_ordering_key() {
        let catalog = WhisperCatalog::builtin().unwrap();
        let ids: Vec<&str> = catalog
            .lookup_by_mood("anxious")
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(ids, vec!["250", "251", "252", "253", "254", "260", "259"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = WhisperCatalog::from_whispers(vec![
            whisper("1", "Sad", 0.1),
            whisper("1", "Hopeful", 0.2),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId { id }) if id == "1"));
    }

    #[test]
    fn test_builtin_moods_in_display_order() {
        let catalog = WhisperCatalog::builtin().unwrap();
        assert_eq!(catalog.moods(), MOODS.to_vec());
    }

    #[test]
    fn test_custom_moods_follow_builtin_ones() {
        let catalog = WhisperCatalog::from_whispers(vec![
            whisper("x", "Nostalgic", 0.1),
            whisper("y", "openhearted", 0.1),
            whisper("z", "Curious", 0.1),
            whisper("w", "Anxious", 0.1),
        ])
        .unwrap();
        assert_eq!(
            catalog.moods(),
            vec!["Anxious", "Openhearted", "Curious", "Nostalgic"]
        );
    }

    #[test]
    fn test_get_and_moods() {
        let catalog = WhisperCatalog::from_whispers(vec![
            whisper("a", "Sad", 0.5),
            whisper("b", "sad", 0.2),
            whisper("c", "Hopeful", 0.9),
        ])
        .unwrap();

        assert_eq!(catalog.get("c").map(|w| w.mood.as_str()), Some("Hopeful"));
        assert!(catalog.get("zzz").is_none());
        // Display order, not alphabetical.
        assert_eq!(catalog.moods(), vec!["Sad", "Hopeful"]);

        let sad: Vec<&str> = catalog
            .lookup_by_mood("SAD")
            .iter()
            .map(|w| w.id.as_str())
            .collect();
        assert_eq!(sad, vec!["b", "a"]);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whispers.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","mood":"Calm","title":"T","prompt":"P","ordering_key":0.3}]"#,
        )
        .unwrap();

        let catalog = WhisperCatalog::from_file(&path).unwrap();
        assert_eq!(catalog.lookup_by_mood("calm").len(), 1);

        let missing = WhisperCatalog::from_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            WhisperCatalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
