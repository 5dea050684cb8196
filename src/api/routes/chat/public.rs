//! Public types for the chat API
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub model: String,
    // Absent, null and false all mean no web search
    pub enable_search: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.into(),
        }
    }
}
