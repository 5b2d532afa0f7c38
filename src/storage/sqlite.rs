//! SQLite-backed key-value store.
//!
//! A single `kv_store` table keyed by string. Suitable as the device-local
//! persistence for exclusion sets and the onboarding flag.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;

use super::KeyValueStore;

/// Key-value store persisted in a SQLite file.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    /// Path to the SQLite database file.
    pub db_path: PathBuf,
    /// Connection guarded by a mutex for thread safety.
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Open (or create) the store at `db_path`.
    ///
    /// Defaults to `<db_storage_path>/espiritnu_local.db`.
    pub fn open(db_path: Option<PathBuf>) -> Result<Self, StorageError> {
        let db_path = db_path.unwrap_or_else(|| {
            PathBuf::from(crate::utilities::paths::db_storage_path()).join("espiritnu_local.db")
        });

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path)?;
        let store = Self {
            db_path,
            conn: Mutex::new(conn),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let store = Self {
            db_path: PathBuf::from(":memory:"),
            conn: Mutex::new(Connection::open_in_memory()?),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn init_db(&self) -> Result<(), StorageError> {
        let conn = self.conn.lock();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock();
        let now = chrono::Utc::now().to_rfc3339();
        conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;
        log::debug!("SqliteKeyValueStore::set: key={}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        log::debug!("SqliteKeyValueStore::remove: key={}", key);
        Ok(())
    }
}
