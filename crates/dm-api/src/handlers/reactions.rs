//! Reaction handlers
//!
//! Endpoints for setting, clearing, and listing message reactions.

use axum::{
    extract::{Path, State},
    Json,
};
use dm_service::{ReactionGroupResponse, ReactionResponse, ReactionService, SetReactionRequest};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Set the caller's reaction on a message (upsert)
///
/// PUT /messages/{message_id}/reaction
pub async fn set_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SetReactionRequest>,
) -> ApiResult<Json<ReactionResponse>> {
    let message_id = message_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid message_id format"))?;

    let service = ReactionService::new(state.service_context());
    let response = service
        .set_reaction(message_id, auth.user_id, request.emoji)
        .await?;
    Ok(Json(response))
}

/// Remove the caller's reaction from a message (idempotent)
///
/// DELETE /messages/{message_id}/reaction
pub async fn clear_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<NoContent> {
    let message_id = message_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid message_id format"))?;

    let service = ReactionService::new(state.service_context());
    service.clear_reaction(message_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Get a message's reactions grouped by emoji
///
/// GET /messages/{message_id}/reactions
pub async fn get_reactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<Json<Vec<ReactionGroupResponse>>> {
    let message_id = message_id
        .parse()
        .map_err(|_| crate::response::ApiError::invalid_path("Invalid message_id format"))?;

    let service = ReactionService::new(state.service_context());
    let groups = service.get_reactions(message_id, auth.user_id).await?;
    Ok(Json(groups))
}
