//! User entity - referenced by conversations, messages, and reactions
//!
//! User rows are provisioned by the external account system; the messaging
//! service only reads them.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the user has a custom avatar
    #[inline]
    pub fn has_avatar(&self) -> bool {
        self.avatar_url.is_some()
    }
}
