//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageModel {
    /// Check if the message carries a media attachment
    #[inline]
    pub fn has_media(&self) -> bool {
        self.media_url.is_some()
    }
}
