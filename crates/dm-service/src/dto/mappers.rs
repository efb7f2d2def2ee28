//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use dm_core::entities::{Conversation, MediaType, Message, Reaction, User};

use super::responses::{
    ConversationResponse, MessageResponse, MessageSummary, ReactionResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Message Mappers
// ============================================================================

/// Helper struct pairing a message with its sender for response building
pub struct MessageWithSender {
    pub message: Message,
    pub sender: User,
}

impl From<MessageWithSender> for MessageResponse {
    fn from(data: MessageWithSender) -> Self {
        let MessageWithSender { message, sender } = data;
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender: UserResponse::from(sender),
            receiver_id: message.receiver_id.to_string(),
            content: message.content,
            media_url: message.media_url,
            media_type: message.media_type.map(|t| MediaType::as_str(t).to_string()),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

impl From<&Message> for MessageSummary {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content.clone(),
            media_url: message.media_url.clone(),
            media_type: message.media_type.map(|t| MediaType::as_str(t).to_string()),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

// ============================================================================
// Conversation Mappers
// ============================================================================

/// Helper struct for creating ConversationResponse
pub struct ConversationWithDetails {
    pub conversation: Conversation,
    pub other_user: User,
    pub last_message: Option<Message>,
    pub unread_count: i64,
}

impl From<ConversationWithDetails> for ConversationResponse {
    fn from(data: ConversationWithDetails) -> Self {
        Self {
            id: data.conversation.id.to_string(),
            other_user: UserResponse::from(data.other_user),
            last_message: data.last_message.as_ref().map(MessageSummary::from),
            unread_count: data.unread_count,
            updated_at: data.conversation.updated_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

/// Helper struct pairing a reaction with the reacting user
pub struct ReactionWithUser {
    pub reaction: Reaction,
    pub user: User,
}

impl From<ReactionWithUser> for ReactionResponse {
    fn from(data: ReactionWithUser) -> Self {
        let ReactionWithUser { reaction, user } = data;
        Self {
            id: reaction.id.to_string(),
            message_id: reaction.message_id.to_string(),
            user: UserResponse::from(user),
            emoji: reaction.emoji,
            created_at: reaction.created_at,
        }
    }
}
