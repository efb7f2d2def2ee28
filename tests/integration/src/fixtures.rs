//! Test fixtures and data generators
//!
//! Provides seeded users and wire-format structs for integration tests.
//! User rows are provisioned directly in the database, the way the external
//! account system would.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use chrono::{DateTime, Utc};
use dm_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::helpers::TestServer;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A seeded user with a valid access token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Snowflake,
    pub username: String,
    pub token: String,
}

impl TestUser {
    /// Provision a user row and mint an access token for it
    pub async fn create(server: &TestServer) -> Result<Self> {
        let suffix = unique_suffix();
        let username = format!("testuser{suffix}");

        let ctx = server.state.service_context();
        let id = ctx.generate_id();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, created_at)
            VALUES ($1, $2, NOW())
            "#,
        )
        .bind(id.into_inner())
        .bind(&username)
        .execute(ctx.pool())
        .await?;

        let token = server.state.jwt_service().generate_access_token(id)?;

        Ok(Self {
            id,
            username,
            token,
        })
    }
}

// ============================================================================
// Wire-format request structs
// ============================================================================

/// Send message request body
#[derive(Debug, Serialize)]
pub struct SendMessageBody {
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl SendMessageBody {
    /// Plain text message to a receiver
    pub fn text(receiver: &TestUser, content: &str) -> Self {
        Self {
            receiver_id: receiver.id.to_string(),
            content: Some(content.to_string()),
            media_url: None,
            media_type: None,
        }
    }
}

/// Set reaction request body
#[derive(Debug, Serialize)]
pub struct SetReactionBody {
    pub emoji: String,
}

// ============================================================================
// Wire-format response structs
// ============================================================================

/// User summary response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender: UserResponse,
    pub receiver_id: String,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Compact message view inside conversation listings
#[derive(Debug, Deserialize)]
pub struct MessageSummary {
    pub id: String,
    pub sender_id: String,
    pub content: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Conversation list row
#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub other_user: UserResponse,
    pub last_message: Option<MessageSummary>,
    pub unread_count: i64,
    pub updated_at: DateTime<Utc>,
}

/// Stored reaction response
#[derive(Debug, Deserialize)]
pub struct ReactionResponse {
    pub id: String,
    pub message_id: String,
    pub user: UserResponse,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

/// Per-emoji reaction aggregation
#[derive(Debug, Deserialize)]
pub struct ReactionGroupResponse {
    pub emoji: String,
    pub count: i64,
    pub users: Vec<UserResponse>,
}
