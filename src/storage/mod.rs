//! Local key-value persistence.
//!
//! The core only ever needs `get`, `set` and `remove` on string values.
//! Backends are injected; nothing here reaches for ambient global state.

pub mod exclusion;
pub mod memory;
pub mod sqlite;

use crate::error::StorageError;

pub use exclusion::ExclusionStore;
pub use memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

/// Device-local string key-value persistence.
///
/// All backends must implement this trait. Writes are expected to be
/// visible to the next read in the same process.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
