//! Whispers: mood-grouped reflective prompts and their rotation.

pub mod catalog;
pub mod selector;

use serde::{Deserialize, Serialize};

pub use catalog::WhisperCatalog;
pub use selector::WhisperSelector;

/// The mood labels offered to the user, in display order.
pub const MOODS: [&str; 8] = [
    "Anxious",
    "Frustrated",
    "Sad",
    "Hopeful",
    "Reflective",
    "Empowered",
    "Detached",
    "Openhearted",
];

/// A single reflective prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Whisper {
    /// Unique across the whole catalog.
    pub id: String,
    /// Grouping key, compared case-insensitively.
    pub mood: String,
    /// Optional category tag carried into saved reflections.
    #[serde(default)]
    pub kind: Option<String>,
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub expansion: String,
    /// Fixed value in [0, 1] giving a stable order inside a mood group.
    pub ordering_key: f64,
}

impl Whisper {
    /// Lower-cased mood, the key used for grouping and exclusion sets.
    pub fn mood_key(&self) -> String {
        normalize_mood(&self.mood)
    }
}

/// Normalize a mood label into its lookup key.
pub fn normalize_mood(mood: &str) -> String {
    mood.to_lowercase()
}
