//! Message handlers
//!
//! Endpoints for sending and reading direct messages.

use axum::{
    extract::{Path, State},
    Json,
};
use dm_service::{MessageResponse, MessageService, SendMessageRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Send a direct message
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.send_message(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a single message by ID
///
/// GET /messages/{message_id}
pub async fn get_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let message_id = message_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid message_id format"))?;

    let service = MessageService::new(state.service_context());
    let response = service.get_message(message_id, auth.user_id).await?;
    Ok(Json(response))
}
