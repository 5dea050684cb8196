use std::sync::Arc;

use thiserror::Error;

use crate::chat::SessionStore;
use crate::core::AppConfig;
use crate::openai::{self, CompletionEndpoint, CompletionError, Message, Role};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Invalid response from completion API: {0}")]
    UpstreamInvalidResponse(String),
    #[error("Completion API unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl From<CompletionError> for ChatError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Transport(e) => ChatError::UpstreamUnavailable(e.to_string()),
            CompletionError::InvalidResponse(msg) => ChatError::UpstreamInvalidResponse(msg),
        }
    }
}

/// Handles chat turns for every session in the store.
#[derive(Clone)]
pub struct ChatSessionHandler {
    config: Arc<AppConfig>,
    endpoint: CompletionEndpoint,
    store: Arc<SessionStore>,
}

impl ChatSessionHandler {
    pub fn new(config: AppConfig, store: Arc<SessionStore>) -> Self {
        let endpoint = CompletionEndpoint::from(&config);
        Self {
            config: Arc::new(config),
            endpoint,
            store,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Send `message` to the model along with the session's history
    /// and return the reply. The session stays locked until the
    /// upstream call resolves so turns from concurrent submits are
    /// never lost. History only changes when a reply is received.
    pub async fn submit(
        &self,
        session_id: &str,
        message: &str,
        model: &str,
        enable_search: bool,
    ) -> Result<String, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::MalformedRequest(
                "message must not be empty".to_string(),
            ));
        }
        if model.trim().is_empty() {
            return Err(ChatError::MalformedRequest(
                "model must not be empty".to_string(),
            ));
        }
        if !self.config.is_model_allowed(model) {
            return Err(ChatError::MalformedRequest(format!(
                "unsupported model {}",
                model
            )));
        }

        let mut history = self.store.lock(session_id).await;

        let user_msg = Message::new(Role::User, message);
        let transcript = openai::transcript(&self.config.system_message, history.turns(), &user_msg);

        let reply = openai::chat(&self.endpoint, model, transcript, enable_search)
            .await
            .inspect_err(|e| tracing::error!("Chat turn failed for session {}: {}", session_id, e))?;

        history.push_exchange(message, &reply);
        tracing::debug!(
            "Session {} now has {} turns",
            session_id,
            history.len()
        );

        Ok(reply)
    }

    /// Forget the session's history. Always succeeds, unknown sessions
    /// are left alone.
    pub async fn clear(&self, session_id: &str) {
        if let Some(mut history) = self.store.lock_existing(session_id).await {
            history.clear();
            tracing::debug!("Cleared history for session {}", session_id);
        }
    }

    /// Committed turns for the session, oldest first. Unknown sessions
    /// have no turns. Does not wait on an in-flight submit.
    pub fn history(&self, session_id: &str) -> Vec<Message> {
        self.store
            .snapshot(session_id)
            .map(Vec::from)
            .unwrap_or_default()
    }
}
