//! # Espiritnu
//!
//! Whisper selection and progression engine for the Espiritnu reflective
//! journal.
//!
//! A user picks a mood and receives a rotating whisper that does not repeat
//! until every whisper of that mood has been released. Saved reflections
//! feed a small set of statistics (count, mood diversity, deep writes,
//! longest daily streak) that place the user on a seven-stage ladder.
//!
//! Persistence and authentication belong to the surrounding application;
//! the crate consumes them through the [`storage::KeyValueStore`] and
//! [`reflections::ReflectionLog`] traits and the [`identity::Identity`]
//! signal.

pub mod config;
pub mod error;
pub mod identity;
pub mod journal;
pub mod onboarding;
pub mod progression;
pub mod reflections;
pub mod storage;
pub mod utilities;
pub mod whispers;

pub use config::EspiritnuConfig;
pub use identity::Identity;
pub use journal::Journal;
pub use progression::{
    compute_stats, determine_stage, Evaluation, ProgressionEngine, ProgressionLadder,
    ProgressionStage, Stats,
};
pub use reflections::{NewReflection, ReflectionLog, ReflectionRecord};
pub use storage::{ExclusionStore, InMemoryKeyValueStore, KeyValueStore, SqliteKeyValueStore};
pub use whispers::{Whisper, WhisperCatalog, WhisperSelector};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
