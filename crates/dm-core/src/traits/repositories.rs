//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Conversation, Message, Reaction, User};
use crate::error::DomainError;
use crate::value_objects::{ConversationKey, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Check if a user exists
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Find conversation by its canonical participant pair
    async fn find_by_key(&self, key: ConversationKey) -> RepoResult<Option<Conversation>>;

    /// List all conversations a user participates in, most recent activity first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>>;

    /// Create a new conversation
    ///
    /// Returns `DomainError::ConversationAlreadyExists` when the canonical
    /// pair already has a row, so first-contact races resolve by re-fetching.
    async fn create(&self, conversation: &Conversation) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Cursor options for message queries
#[derive(Debug, Clone, Default)]
pub struct MessageQuery {
    pub before: Option<Snowflake>,
    pub after: Option<Snowflake>,
    pub limit: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// List messages in a conversation, ascending by `(created_at, id)`
    async fn find_by_conversation(
        &self,
        conversation_id: Snowflake,
        query: MessageQuery,
    ) -> RepoResult<Vec<Message>>;

    /// Append a message and bump the conversation's last-activity timestamp
    /// in one atomic statement
    async fn create(&self, message: &Message) -> RepoResult<()>;

    /// The most recent message in a conversation, if any
    async fn last_in_conversation(&self, conversation_id: Snowflake)
        -> RepoResult<Option<Message>>;

    /// Mark every unread message addressed to `receiver_id` as read;
    /// idempotent, returns the number of rows flipped
    async fn mark_read(&self, conversation_id: Snowflake, receiver_id: Snowflake)
        -> RepoResult<u64>;

    /// Count unread messages addressed to `receiver_id` in a conversation
    async fn count_unread(
        &self,
        conversation_id: Snowflake,
        receiver_id: Snowflake,
    ) -> RepoResult<i64>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a user's reaction on a message
    async fn find(&self, message_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<Reaction>>;

    /// Get all reactions for a message, oldest first
    async fn find_by_message(&self, message_id: Snowflake) -> RepoResult<Vec<Reaction>>;

    /// Set a user's reaction, overwriting any previous emoji
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Remove a user's reaction; no-op if none exists
    async fn delete(&self, message_id: Snowflake, user_id: Snowflake) -> RepoResult<()>;
}
