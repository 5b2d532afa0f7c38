//! Persisted "has seen onboarding" flag.

use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Default key for the onboarding flag.
pub const DEFAULT_ONBOARDING_KEY: &str = "espiritnu_has_onboarded";

/// Tracks whether this device has finished onboarding.
#[derive(Debug, Clone)]
pub struct OnboardingState {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl OnboardingState {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(kv, DEFAULT_ONBOARDING_KEY)
    }

    pub fn with_key(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Only the exact value `"true"` counts; read failures count as not
    /// onboarded.
    pub fn has_onboarded(&self) -> bool {
        match self.kv.get(&self.key) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("Failed to read onboarding flag {}: {}", self.key, e);
                false
            }
        }
    }

    pub fn mark_onboarded(&self) {
        if let Err(e) = self.kv.set(&self.key, "true") {
            log::warn!("Failed to persist onboarding flag {}: {}", self.key, e);
        }
    }
}
