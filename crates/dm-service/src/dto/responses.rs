//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

/// Public user summary
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Conversation Responses
// ============================================================================

/// One row of the caller's conversation list, newest activity first
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub other_user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessageSummary>,
    pub unread_count: i64,
    pub updated_at: DateTime<Utc>,
}

/// Compact message view used inside conversation listings
#[derive(Debug, Clone, Serialize)]
pub struct MessageSummary {
    pub id: String,
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Message Responses
// ============================================================================

/// Full message view with the sender's summary
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender: UserResponse,
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// A single stored reaction with the reacting user's summary
#[derive(Debug, Serialize)]
pub struct ReactionResponse {
    pub id: String,
    pub message_id: String,
    pub user: UserResponse,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

/// Per-emoji aggregation of a message's reactions for display
#[derive(Debug, Serialize)]
pub struct ReactionGroupResponse {
    pub emoji: String,
    pub count: i64,
    pub users: Vec<UserResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    /// A healthy response
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness probe response with dependency health
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: bool,
}

impl ReadinessResponse {
    /// Build a readiness response from dependency checks
    #[must_use]
    pub fn ready(database: bool) -> Self {
        Self {
            status: if database { "ready" } else { "degraded" },
            database,
        }
    }
}
