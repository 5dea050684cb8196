use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::AppConfig;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Body of a chat completion request.
#[derive(Serialize, Debug)]
pub struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    // DashScope treats a missing flag differently from `false` so the
    // key is only ever sent as `true`
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_search: Option<bool>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, messages: Vec<Message>, enable_search: bool) -> Self {
        Self {
            model,
            messages,
            enable_search: enable_search.then_some(true),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

// Only the parts of the response we read. Everything else the API
// sends back (usage, ids, finish reasons) is ignored.
#[derive(Deserialize, Debug)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Deserialize, Debug)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if the API returned one.
    pub fn into_reply(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid response from completion API: {0}")]
    InvalidResponse(String),
}

/// Where and how to reach the completion API. Clones share one
/// connection pool.
#[derive(Clone, Debug)]
pub struct CompletionEndpoint {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub client: reqwest::Client,
}

impl From<&AppConfig> for CompletionEndpoint {
    fn from(config: &AppConfig) -> Self {
        Self {
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            timeout: config.upstream_timeout,
            client: reqwest::Client::new(),
        }
    }
}

pub async fn completion(
    endpoint: &CompletionEndpoint,
    request: &CompletionRequest<'_>,
) -> Result<CompletionResponse, CompletionError> {
    let response = endpoint
        .client
        .post(&endpoint.url)
        .bearer_auth(&endpoint.api_key)
        .header("Content-Type", "application/json")
        .timeout(endpoint.timeout)
        .json(request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    tracing::debug!("Completion API responded with {}", status);

    if !status.is_success() {
        return Err(CompletionError::InvalidResponse(format!(
            "status {}: {}",
            status, body
        )));
    }

    serde_json::from_str::<CompletionResponse>(&body).map_err(|e| {
        tracing::warn!("Parsing completion response failed for {}\nError: {}", body, e);
        CompletionError::InvalidResponse(e.to_string())
    })
}
