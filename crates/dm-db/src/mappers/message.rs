//! Message entity <-> model mapper

use dm_core::entities::{MediaType, Message};
use dm_core::value_objects::Snowflake;

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            receiver_id: Snowflake::new(model.receiver_id),
            content: model.content,
            media_url: model.media_url,
            // Unknown stored values degrade to no media type rather than failing the read
            media_type: model.media_type.as_deref().and_then(|s| MediaType::parse(s).ok()),
            read: model.is_read,
            created_at: model.created_at,
        }
    }
}
