//! In-memory reflection log.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::ReflectionError;

use super::{NewReflection, ReflectionLog, ReflectionRecord};

/// Process-local reflection log keyed by user id.
///
/// Records are kept in append order and returned newest first. Clones
/// share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReflectionLog {
    users: Arc<RwLock<HashMap<String, Vec<ReflectionRecord>>>>,
}

impl InMemoryReflectionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record as-is, keeping its id and timestamp.
    ///
    /// Used to import history from another store.
    pub fn import(&self, user_id: &str, record: ReflectionRecord) {
        self.users
            .write()
            .entry(user_id.to_string())
            .or_default()
            .push(record);
    }

    /// Drop every reflection of `user_id`.
    pub fn clear_user(&self, user_id: &str) {
        self.users.write().remove(user_id);
    }
}

impl ReflectionLog for InMemoryReflectionLog {
    fn append(
        &self,
        user_id: &str,
        reflection: NewReflection,
    ) -> Result<ReflectionRecord, ReflectionError> {
        let record = reflection.into_record(Uuid::new_v4().to_string(), Some(Utc::now()));
        self.import(user_id, record.clone());
        log::debug!(
            "Reflection {} saved for user {} under mood {}",
            record.id,
            user_id,
            record.mood
        );
        Ok(record)
    }

    fn list(&self, user_id: &str) -> Result<Vec<ReflectionRecord>, ReflectionError> {
        let users = self.users.read();
        let mut records = users.get(user_id).cloned().unwrap_or_default();
        // Stable sort keeps append order for equal or missing timestamps.
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
