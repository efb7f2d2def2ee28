//! Conversation database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the conversations table
///
/// `(user_a, user_b)` is stored in canonical order and carries a unique
/// index.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub user_a: i64,
    pub user_b: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
