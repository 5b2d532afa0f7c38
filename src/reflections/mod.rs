//! Saved reflections and the boundary to the store that owns them.
//!
//! Reflections are created by an external append operation and read back
//! newest first. The core never mutates or deletes them.

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReflectionError;
use crate::whispers::Whisper;

pub use memory::InMemoryReflectionLog;

/// A saved reflection.
///
/// Prompt fields are denormalized copies, kept even if the catalog entry
/// later changes or disappears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionRecord {
    /// Assigned by the storage collaborator.
    pub id: String,
    /// Creation time assigned by the store. `None` while pending or when
    /// the stored value is unusable.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Mood under which the whisper was shown.
    pub mood: String,
    pub whisper_title: String,
    pub whisper_prompt: String,
    #[serde(default)]
    pub whisper_kind: Option<String>,
    /// Free-form user text.
    pub entry: String,
}

/// The fields a caller supplies when saving a reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReflection {
    pub mood: String,
    pub whisper_title: String,
    pub whisper_prompt: String,
    #[serde(default)]
    pub whisper_kind: Option<String>,
    pub entry: String,
}

impl NewReflection {
    /// Draft a reflection answering `whisper`.
    ///
    /// The whisper's own mood is recorded, falling back to `selected_mood`
    /// when the whisper carries none. The entry is kept verbatim but must
    /// contain something other than whitespace.
    pub fn draft(
        whisper: &Whisper,
        selected_mood: &str,
        entry: impl Into<String>,
    ) -> Result<Self, ReflectionError> {
        let entry = entry.into();
        if entry.trim().is_empty() {
            return Err(ReflectionError::EmptyEntry);
        }

        let mood = if whisper.mood.is_empty() {
            selected_mood.to_string()
        } else {
            whisper.mood.clone()
        };

        Ok(Self {
            mood,
            whisper_title: whisper.title.clone(),
            whisper_prompt: whisper.prompt.clone(),
            whisper_kind: whisper.kind.clone(),
            entry,
        })
    }

    /// Turn the draft into a stored record.
    pub fn into_record(self, id: String, created_at: Option<DateTime<Utc>>) -> ReflectionRecord {
        ReflectionRecord {
            id,
            created_at,
            mood: self.mood,
            whisper_title: self.whisper_title,
            whisper_prompt: self.whisper_prompt,
            whisper_kind: self.whisper_kind,
            entry: self.entry,
        }
    }
}

/// Append-only reflection store scoped per user.
pub trait ReflectionLog: Send + Sync {
    /// Save a reflection, assigning its id and creation time.
    fn append(
        &self,
        user_id: &str,
        reflection: NewReflection,
    ) -> Result<ReflectionRecord, ReflectionError>;

    /// All reflections for `user_id`, newest first.
    fn list(&self, user_id: &str) -> Result<Vec<ReflectionRecord>, ReflectionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whisper(mood: &str) -> Whisper {
        Whisper {
            id: "299".to_string(),
            mood: mood.to_string(),
            kind: Some("Hopeful".to_string()),
            title: "New Day".to_string(),
            prompt: "What is one small thing you can look forward to today?".to_string(),
            expansion: String::new(),
            ordering_key: 0.345,
        }
    }

    #[test]
    fn test_draft_copies_whisper_fields() {
        let draft = NewReflection::draft(&whisper("Hopeful"), "Sad", "Coffee with Ana").unwrap();
        assert_eq!(draft.mood, "Hopeful");
        assert_eq!(draft.whisper_title, "New Day");
        assert_eq!(draft.whisper_kind.as_deref(), Some("Hopeful"));
        assert_eq!(draft.entry, "Coffee with Ana");
    }

    #[test]
    fn test_draft_falls_back_to_selected_mood() {
        let draft = NewReflection::draft(&whisper(""), "Sad", "still here").unwrap();
        assert_eq!(draft.mood, "Sad");
    }

    #[test]
    fn test_draft_rejects_blank_entry() {
        let result = NewReflection::draft(&whisper("Hopeful"), "Hopeful", "  \n\t ");
        assert!(matches!(result, Err(ReflectionError::EmptyEntry)));
    }

    #[test]
    fn test_record_deserializes_without_timestamp() {
        let record: ReflectionRecord = serde_json::from_str(
            r#"{"id":"r1","mood":"Sad","whisper_title":"Held","whisper_prompt":"?","entry":"ok"}"#,
        )
        .unwrap();
        assert!(record.created_at.is_none());
        assert!(record.whisper_kind.is_none());
    }
}
