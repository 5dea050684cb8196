//! API routes module

pub mod chat;
pub mod web;

use std::sync::Arc;

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<AppState>;

/// Create the combined router. Anything that isn't the chat endpoint
/// gets the chat page.
pub fn router() -> Router<SharedState> {
    Router::new()
        // Chat routes
        .merge(chat::router())
        // Web UI for every other path and method
        .fallback(web::index)
}
