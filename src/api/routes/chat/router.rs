//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use axum_extra::extract::cookie::CookieJar;

use super::public;
use crate::api::state::AppState;
use crate::api::utils::{session_id, session_id_or_new};
use crate::chat::ChatError;

type SharedState = Arc<AppState>;

/// Add a message to the session's conversation and respond with the
/// model's reply
async fn chat_handler(
    State(state): State<SharedState>,
    jar: CookieJar,
    payload: Result<Json<public::ChatRequest>, JsonRejection>,
) -> Response {
    let (jar, session_id) = session_id_or_new(jar);

    let result = match payload {
        Ok(Json(req)) => state
            .chat
            .submit(
                &session_id,
                &req.message,
                &req.model,
                req.enable_search.unwrap_or(false),
            )
            .await
            .map(|reply| Json(public::ChatResponse::new(&reply))),
        Err(rejection) => Err(ChatError::MalformedRequest(rejection.body_text())),
    };

    (jar, result).into_response()
}

/// Clear the session's conversation history
async fn clear_handler(State(state): State<SharedState>, jar: CookieJar) -> impl IntoResponse {
    // Without a session cookie there is nothing to clear
    if let Some(id) = session_id(&jar) {
        state.chat.clear(&id).await;
    }
    Json(public::ClearResponse::new("Chat history cleared"))
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST, DELETE")],
        "Only POST and DELETE requests are allowed",
    )
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route(
        "/chat",
        post(chat_handler)
            .delete(clear_handler)
            .fallback(method_not_allowed),
    )
}
