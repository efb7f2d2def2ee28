//! Conversation service
//!
//! Conversation identity and listing. Conversations are created lazily on
//! first message; `find_or_create` is the single entry point for that and
//! always works on the canonical participant key.

use dm_core::entities::Conversation;
use dm_core::value_objects::{ConversationKey, Snowflake};
use dm_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{ConversationResponse, ConversationWithDetails};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Conversation service
pub struct ConversationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConversationService<'a> {
    /// Create a new ConversationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the conversation for a canonical pair, creating it if absent
    ///
    /// Two first-contact sends racing each other both end up on the same
    /// row: the storage-level unique index rejects the second insert, which
    /// is treated as "already exists" and resolved by re-fetching.
    #[instrument(skip(self))]
    pub async fn find_or_create(&self, key: ConversationKey) -> ServiceResult<Conversation> {
        if let Some(existing) = self.ctx.conversation_repo().find_by_key(key).await? {
            return Ok(existing);
        }

        let conversation = Conversation::new(self.ctx.generate_id(), key);
        match self.ctx.conversation_repo().create(&conversation).await {
            Ok(()) => {
                info!(
                    conversation_id = %conversation.id,
                    user_a = %conversation.user_a,
                    user_b = %conversation.user_b,
                    "Conversation created"
                );
                Ok(conversation)
            }
            Err(DomainError::ConversationAlreadyExists) => self
                .ctx
                .conversation_repo()
                .find_by_key(key)
                .await?
                .ok_or_else(|| {
                    ServiceError::internal("Conversation vanished after duplicate insert")
                }),
            Err(e) => Err(e.into()),
        }
    }

    /// List the caller's conversations, most recent activity first
    ///
    /// Each row carries the other participant's summary, the latest message,
    /// and the caller's unread count.
    #[instrument(skip(self))]
    pub async fn list_conversations(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.conversation_repo().find_by_user(user_id).await?;

        let mut responses = Vec::with_capacity(conversations.len());

        for conversation in conversations {
            let Some(other_id) = conversation.other_participant(user_id) else {
                continue;
            };

            // Skip rows whose peer account no longer resolves
            let Some(other_user) = self.ctx.user_repo().find_by_id(other_id).await? else {
                continue;
            };

            let last_message = self
                .ctx
                .message_repo()
                .last_in_conversation(conversation.id)
                .await?;

            let unread_count = self
                .ctx
                .message_repo()
                .count_unread(conversation.id, user_id)
                .await?;

            responses.push(ConversationResponse::from(ConversationWithDetails {
                conversation,
                other_user,
                last_message,
                unread_count,
            }));
        }

        Ok(responses)
    }

    /// Look up the conversation between the caller and another user
    ///
    /// Returns not-found when the pair has never exchanged a message.
    #[instrument(skip(self))]
    pub async fn get_by_participants(
        &self,
        caller_id: Snowflake,
        other_id: Snowflake,
    ) -> ServiceResult<Conversation> {
        let key = ConversationKey::new(caller_id, other_id)?;

        self.ctx
            .conversation_repo()
            .find_by_key(key)
            .await?
            .ok_or_else(|| ServiceError::not_found("Conversation", other_id.to_string()))
    }
}
