//! Conversation entity <-> model mapper

use dm_core::entities::Conversation;
use dm_core::value_objects::Snowflake;

use crate::models::ConversationModel;

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            user_a: Snowflake::new(model.user_a),
            user_b: Snowflake::new(model.user_b),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
