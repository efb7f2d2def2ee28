//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Message Requests
// ============================================================================

/// Send direct message request
///
/// At least one of `content`/`media_url` must be present; that cross-field
/// rule is enforced by the message service, not the derive.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Receiver user ID (Snowflake as string)
    pub receiver_id: String,

    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub content: Option<String>,

    /// URL issued by the external media storage; stored verbatim
    #[validate(length(min = 1, max = 2048, message = "Media URL must be 1-2048 characters"))]
    pub media_url: Option<String>,

    /// "image" or "video"; required when media_url is present
    pub media_type: Option<String>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Set reaction request
///
/// The emoji value is free-form (no allow-list), only length-bounded.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetReactionRequest {
    #[validate(length(min = 1, max = 64, message = "Emoji must be 1-64 characters"))]
    pub emoji: String,
}
