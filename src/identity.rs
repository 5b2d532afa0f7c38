//! The authentication signal the core consumes.

use serde::{Deserialize, Serialize};

/// A signed-in user as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque and stable for the lifetime of the account.
    pub user_id: String,
    /// Temporary (anonymous) identity that has not been linked yet.
    pub is_anonymous: bool,
}

impl Identity {
    pub fn anonymous(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_anonymous: true,
        }
    }

    pub fn linked(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            is_anonymous: false,
        }
    }

    /// Whether to invite the user to link a durable account so their
    /// reflections survive across devices.
    pub fn should_offer_account_link(&self) -> bool {
        self.is_anonymous
    }
}
