//! Conversation entity - the unique pairing of two users
//!
//! Exactly one conversation exists per unordered pair of users. The row
//! stores the pair in canonical order (`user_a < user_b`), which backs the
//! storage-level uniqueness constraint.

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{ConversationKey, Snowflake};

/// Conversation entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub user_a: Snowflake,
    pub user_b: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new Conversation from a canonical key
    pub fn new(id: Snowflake, key: ConversationKey) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_a: key.first(),
            user_b: key.second(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The canonical key of this conversation's participant pair
    ///
    /// # Errors
    /// Returns an error only if the row is corrupt (`user_a == user_b`).
    pub fn key(&self) -> Result<ConversationKey, DomainError> {
        ConversationKey::new(self.user_a, self.user_b)
    }

    /// Check whether a user participates in this conversation
    #[inline]
    pub fn is_participant(&self, user_id: Snowflake) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other participant, if `user_id` is one of the pair
    pub fn other_participant(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.user_a {
            Some(self.user_b)
        } else if user_id == self.user_b {
            Some(self.user_a)
        } else {
            None
        }
    }
}
