//! User entity <-> model mapper

use dm_core::entities::User;
use dm_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            avatar_url: model.avatar_url,
            created_at: model.created_at,
        }
    }
}
