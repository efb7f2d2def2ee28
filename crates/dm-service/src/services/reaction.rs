//! Reaction service
//!
//! Per-user emoji reactions on messages: upsert, clear, and the grouped
//! read-side view.

use dm_core::entities::{Reaction, ReactionGroup};
use dm_core::value_objects::Snowflake;
use tracing::{info, instrument};

use crate::dto::{ReactionGroupResponse, ReactionResponse, ReactionWithUser, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::message::MessageService;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Set the caller's reaction on a message, overwriting any previous emoji
    #[instrument(skip(self))]
    pub async fn set_reaction(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: String,
    ) -> ServiceResult<ReactionResponse> {
        // Participants only
        MessageService::new(self.ctx)
            .find_participant_message(message_id, user_id)
            .await?;

        let reaction = Reaction::new(self.ctx.generate_id(), message_id, user_id, emoji);
        self.ctx.reaction_repo().upsert(&reaction).await?;

        // Re-read: on overwrite the stored row keeps its original id
        let stored = self
            .ctx
            .reaction_repo()
            .find(message_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Reaction missing after upsert"))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        info!(
            message_id = %message_id,
            user_id = %user_id,
            emoji = %stored.emoji,
            "Reaction set"
        );

        Ok(ReactionResponse::from(ReactionWithUser {
            reaction: stored,
            user,
        }))
    }

    /// Remove the caller's reaction from a message; no-op if none exists
    #[instrument(skip(self))]
    pub async fn clear_reaction(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        MessageService::new(self.ctx)
            .find_participant_message(message_id, user_id)
            .await?;

        self.ctx.reaction_repo().delete(message_id, user_id).await?;

        info!(message_id = %message_id, user_id = %user_id, "Reaction cleared");

        Ok(())
    }

    /// Get a message's reactions grouped by emoji, with reactor summaries
    #[instrument(skip(self))]
    pub async fn get_reactions(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ReactionGroupResponse>> {
        MessageService::new(self.ctx)
            .find_participant_message(message_id, user_id)
            .await?;

        let reactions = self.ctx.reaction_repo().find_by_message(message_id).await?;
        let groups = ReactionGroup::group(&reactions);

        let mut responses = Vec::with_capacity(groups.len());

        for group in groups {
            let mut users = Vec::with_capacity(group.user_ids.len());
            for reactor_id in &group.user_ids {
                if let Some(user) = self.ctx.user_repo().find_by_id(*reactor_id).await? {
                    users.push(UserResponse::from(user));
                }
            }

            responses.push(ReactionGroupResponse {
                emoji: group.emoji,
                count: group.count,
                users,
            });
        }

        Ok(responses)
    }
}
