//! Message service
//!
//! Sending, conversation history, and read-state transitions.

use dm_core::entities::{MediaType, Message};
use dm_core::traits::MessageQuery;
use dm_core::value_objects::{ConversationKey, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{MessageResponse, MessageWithSender, SendMessageRequest};

use super::context::ServiceContext;
use super::conversation::ConversationService;
use super::error::{ServiceError, ServiceResult};

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a direct message
    ///
    /// Validates the payload, resolves the receiver, lazily creates the
    /// conversation for the canonical pair, and appends the message. The
    /// insert also bumps the conversation's last-activity timestamp, so a
    /// send either fully succeeds or persists nothing.
    #[instrument(skip(self, request))]
    pub async fn send_message(
        &self,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let receiver_id = request
            .receiver_id
            .parse::<Snowflake>()
            .map_err(|_| ServiceError::validation("Invalid receiver_id format"))?;

        // Self-messaging is rejected before canonicalization
        let key = ConversationKey::new(sender_id, receiver_id)?;

        let (content, media_url, media_type) = validate_payload(&request)?;

        // Receiver must exist before anything is written
        if !self.ctx.user_repo().exists(receiver_id).await? {
            return Err(ServiceError::not_found("User", receiver_id.to_string()));
        }

        let conversation = ConversationService::new(self.ctx).find_or_create(key).await?;

        let message = Message::new(
            self.ctx.generate_id(),
            conversation.id,
            sender_id,
            receiver_id,
            content,
            media_url,
            media_type,
        );

        self.ctx.message_repo().create(&message).await?;

        let sender = self
            .ctx
            .user_repo()
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", sender_id.to_string()))?;

        info!(
            message_id = %message.id,
            conversation_id = %conversation.id,
            "Message sent"
        );

        Ok(MessageResponse::from(MessageWithSender { message, sender }))
    }

    /// Get a page of the conversation between the caller and another user
    ///
    /// Side effect: every unread message addressed to the caller in that
    /// conversation is marked read before the page is built, so returned
    /// rows reflect the flip. Results are ascending (oldest first) with
    /// Snowflake-id cursors.
    #[instrument(skip(self))]
    pub async fn get_conversation_messages(
        &self,
        caller_id: Snowflake,
        other_id: Snowflake,
        query: MessageQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let conversation = ConversationService::new(self.ctx)
            .get_by_participants(caller_id, other_id)
            .await?;

        let flipped = self
            .ctx
            .message_repo()
            .mark_read(conversation.id, caller_id)
            .await?;
        if flipped > 0 {
            debug!(conversation_id = %conversation.id, flipped, "Marked messages read");
        }

        let messages = self
            .ctx
            .message_repo()
            .find_by_conversation(conversation.id, query)
            .await?;

        // Both participants' summaries cover every sender in the page
        let caller = self
            .ctx
            .user_repo()
            .find_by_id(caller_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", caller_id.to_string()))?;
        let other = self
            .ctx
            .user_repo()
            .find_by_id(other_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", other_id.to_string()))?;

        let responses = messages
            .into_iter()
            .map(|message| {
                let sender = if message.sender_id == caller_id {
                    caller.clone()
                } else {
                    other.clone()
                };
                MessageResponse::from(MessageWithSender { message, sender })
            })
            .collect();

        Ok(responses)
    }

    /// Get a single message; participants only
    #[instrument(skip(self))]
    pub async fn get_message(
        &self,
        message_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<MessageResponse> {
        let message = self.find_participant_message(message_id, caller_id).await?;

        let sender = self
            .ctx
            .user_repo()
            .find_by_id(message.sender_id)
            .await?
            .ok_or_else(|| ServiceError::internal("Message sender not found"))?;

        Ok(MessageResponse::from(MessageWithSender { message, sender }))
    }

    /// Fetch a message and verify the caller participates in it
    pub(crate) async fn find_participant_message(
        &self,
        message_id: Snowflake,
        caller_id: Snowflake,
    ) -> ServiceResult<Message> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))?;

        if !message.is_participant(caller_id) {
            return Err(ServiceError::forbidden(
                "Not a participant of this conversation",
            ));
        }

        Ok(message)
    }
}

/// Check the content/media rules and normalize the payload
///
/// At least one of content/media must be non-empty, and a media URL must
/// carry its type.
fn validate_payload(
    request: &SendMessageRequest,
) -> ServiceResult<(Option<String>, Option<String>, Option<MediaType>)> {
    let content = request
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from);

    let media_url = request
        .media_url
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(String::from);

    if content.is_none() && media_url.is_none() {
        return Err(dm_core::DomainError::EmptyMessage.into());
    }

    let media_type = match (&media_url, request.media_type.as_deref()) {
        (Some(_), Some(raw)) => Some(MediaType::parse(raw)?),
        (Some(_), None) => return Err(dm_core::DomainError::MediaTypeMissing.into()),
        (None, _) => None,
    };

    Ok((content, media_url, media_type))
}
