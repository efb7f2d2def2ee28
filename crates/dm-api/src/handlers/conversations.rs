//! Conversation handlers
//!
//! Endpoints for the caller's conversation list and conversation history.

use axum::{
    extract::{Path, State},
    Json,
};
use dm_core::traits::MessageQuery;
use dm_service::{ConversationResponse, ConversationService, MessageResponse, MessageService};

use crate::extractors::{AuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// List the caller's conversations, newest activity first
///
/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let service = ConversationService::new(state.service_context());
    let conversations = service.list_conversations(auth.user_id).await?;
    Ok(Json(conversations))
}

/// Get the message history with another user
///
/// GET /conversations/{user_id}/messages
///
/// Side effect: the caller's unread messages in this conversation are
/// marked read.
pub async fn get_conversation_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let other_id = user_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid user_id format"))?;

    let query = MessageQuery {
        before: pagination.before,
        after: pagination.after,
        limit: i64::from(pagination.limit),
    };

    let service = MessageService::new(state.service_context());
    let messages = service
        .get_conversation_messages(auth.user_id, other_id, query)
        .await?;
    Ok(Json(messages))
}
