//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body, http::Response};

use qwen_chat::api::AppState;
use qwen_chat::api::app;
use qwen_chat::core::{AppConfig, DEFAULT_SYSTEM_MESSAGE};

pub const COMPLETIONS_PATH: &str = "/compatible-mode/v1/chat/completions";
pub const MODEL: &str = "qwen2.5-72b-instruct";

/// Creates a test application router that sends completion requests
/// to `api_hostname`, normally a `mockito` server.
pub fn test_app(api_hostname: &str) -> Router {
    let app_config = AppConfig {
        api_hostname: api_hostname.to_string(),
        completions_path: COMPLETIONS_PATH.to_string(),
        api_key: String::from("test-api-key"),
        models: vec![
            String::from(MODEL),
            String::from("qwen2.5-math-72b-instruct"),
        ],
        system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
        upstream_timeout: Duration::from_secs(5),
        session_ttl: Duration::from_secs(60),
        eviction_interval: Duration::from_secs(60),
    };
    let app_state = AppState::new(app_config).expect("Failed to build app state");
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

/// The `name=value` pair of the session cookie set by a response
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session_id="))
        .and_then(|v| v.split(';').next())
        .map(String::from)
}

/// Upstream response body with a single reply
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": MODEL,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
