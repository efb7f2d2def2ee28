//! Message entity - a direct message between two users
//!
//! Messages are append-only: once created they are never edited or deleted,
//! and only the `read` flag may change (false to true, receiver only).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Media attachment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Stable string form used in storage and JSON
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Parse from the stable string form
    ///
    /// # Errors
    /// Returns `DomainError::UnknownMediaType` for anything but
    /// `image`/`video`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(DomainError::UnknownMediaType(other.to_string())),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub receiver_id: Snowflake,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<MediaType>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread Message
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        receiver_id: Snowflake,
        content: Option<String>,
        media_url: Option<String>,
        media_type: Option<MediaType>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            receiver_id,
            content,
            media_url,
            media_type,
            read: false,
            created_at: Utc::now(),
        }
    }

    /// Check if the message carries non-empty text content
    #[inline]
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Check if the message carries a media attachment
    #[inline]
    pub fn has_media(&self) -> bool {
        self.media_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Check if the message has any payload at all
    #[inline]
    pub fn has_payload(&self) -> bool {
        self.has_content() || self.has_media()
    }

    /// Check if `user_id` is the sender or the receiver
    #[inline]
    pub fn is_participant(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }
}
