//! Conversation key - order-independent pairing of two user IDs
//!
//! A conversation is identified by the unordered pair of its participants.
//! `ConversationKey` canonicalizes the pair so that `new(a, b)` and
//! `new(b, a)` produce the same key; the total order is the numeric
//! `Snowflake` order. Every lookup and creation path must go through this
//! type so that a single ordering rule applies everywhere.

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Canonical, order-independent key for a two-user conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    first: Snowflake,
    second: Snowflake,
}

impl ConversationKey {
    /// Build the canonical key for a pair of distinct users
    ///
    /// # Errors
    /// Returns `DomainError::SelfConversation` if both IDs are the same user.
    pub fn new(a: Snowflake, b: Snowflake) -> Result<Self, DomainError> {
        if a == b {
            return Err(DomainError::SelfConversation);
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    /// The smaller participant ID
    #[inline]
    pub const fn first(&self) -> Snowflake {
        self.first
    }

    /// The larger participant ID
    #[inline]
    pub const fn second(&self) -> Snowflake {
        self.second
    }

    /// Check whether a user is one of the two participants
    #[inline]
    pub fn contains(&self, user_id: Snowflake) -> bool {
        self.first == user_id || self.second == user_id
    }

    /// The participant that is not `user_id`, if `user_id` is in the pair
    pub fn other(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.first {
            Some(self.second)
        } else if user_id == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}
