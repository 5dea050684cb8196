use std::sync::Arc;

use anyhow::{Context, Result};
use handlebars::Handlebars;

use crate::api::routes::web;
use crate::chat::{ChatSessionHandler, SessionStore};
use crate::core::AppConfig;

pub struct AppState {
    pub chat: ChatSessionHandler,
    pub templates: Handlebars<'static>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let templates = web::templates().context("Failed to register page templates")?;
        let store = Arc::new(SessionStore::new());
        Ok(Self {
            chat: ChatSessionHandler::new(config, store),
            templates,
        })
    }

    pub fn config(&self) -> &AppConfig {
        self.chat.config()
    }

    pub fn sessions(&self) -> &SessionStore {
        self.chat.store()
    }
}
