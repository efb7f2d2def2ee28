//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{conversations, health, messages, reactions, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(conversation_routes())
        .merge(message_routes())
        .merge(user_routes())
}

/// Conversation routes
fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(conversations::list_conversations))
        .route(
            "/conversations/:user_id/messages",
            get(conversations::get_conversation_messages),
        )
}

/// Message and reaction routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(messages::send_message))
        .route("/messages/:message_id", get(messages::get_message))
        .route(
            "/messages/:message_id/reaction",
            put(reactions::set_reaction),
        )
        .route(
            "/messages/:message_id/reaction",
            delete(reactions::clear_reaction),
        )
        .route(
            "/messages/:message_id/reactions",
            get(reactions::get_reactions),
        )
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id", get(users::get_user))
}
