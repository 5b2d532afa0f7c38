//! Error types for the Espiritnu core.
//!
//! The selection and progression algorithms themselves never fail; these
//! errors only surface at the adapter boundary (data loading, key-value
//! persistence, reflection drafting).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by key-value persistence backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The SQLite backend failed.
    #[error("Key-value database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A value could not be encoded or decoded.
    #[error("Key-value serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file or directory could not be prepared.
    #[error("Key-value storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building a whisper catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two whispers share the same id.
    #[error("Duplicate whisper id in catalog: {id}")]
    DuplicateId { id: String },

    /// The catalog file could not be read.
    #[error("Whisper file '{path}' could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON is malformed.
    #[error("Error decoding whisper catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while building a progression ladder.
#[derive(Debug, Error)]
pub enum LadderError {
    /// A ladder needs at least one stage to fall back on.
    #[error("Progression ladder must contain at least one stage")]
    Empty,

    /// The stage file could not be read.
    #[error("Stage file '{path}' could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stage JSON is malformed.
    #[error("Error decoding progression ladder: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from the reflection boundary.
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// The entry text is empty or whitespace only.
    #[error("Reflection entry is empty")]
    EmptyEntry,

    /// The reflection log backend failed.
    #[error("Reflection storage error: {message}")]
    Storage { message: String },
}
