//! Router for the chat page

use std::sync::Arc;

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use super::{INDEX_TEMPLATE, public};
use crate::api::state::AppState;
use crate::api::utils::session_id;

type SharedState = Arc<AppState>;

/// Render the chat page along with the conversation so far. The page
/// never stores history itself, a reload always shows what the server
/// has.
pub async fn index(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<Html<String>, crate::api::public::ApiError> {
    let history = match session_id(&jar) {
        Some(id) => state.chat.history(&id),
        None => Vec::new(),
    };
    let page = public::IndexPage::new(state.config(), &history);
    let html = state.templates.render(INDEX_TEMPLATE, &page)?;
    Ok(Html(html))
}
