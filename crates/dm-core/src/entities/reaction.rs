//! Reaction entity - an emoji a user attaches to a message
//!
//! A user holds at most one reaction per message; setting a new emoji
//! overwrites the previous one. Emoji values are free-form short strings
//! stored verbatim.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: Snowflake,
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(id: Snowflake, message_id: Snowflake, user_id: Snowflake, emoji: String) -> Self {
        Self {
            id,
            message_id,
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated per-emoji view of a message's reactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionGroup {
    pub emoji: String,
    pub count: i64,
    pub user_ids: Vec<Snowflake>,
}

impl ReactionGroup {
    /// Group a message's reactions by emoji value
    ///
    /// Pure read-side transform: emoji groups appear in first-seen order and
    /// reactor order is preserved within each group. Stored state is not
    /// touched.
    pub fn group(reactions: &[Reaction]) -> Vec<ReactionGroup> {
        let mut groups: Vec<ReactionGroup> = Vec::new();

        for reaction in reactions {
            match groups.iter_mut().find(|g| g.emoji == reaction.emoji) {
                Some(group) => {
                    group.count += 1;
                    group.user_ids.push(reaction.user_id);
                }
                None => groups.push(ReactionGroup {
                    emoji: reaction.emoji.clone(),
                    count: 1,
                    user_ids: vec![reaction.user_id],
                }),
            }
        }

        groups
    }
}
