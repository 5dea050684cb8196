//! Public types for the chat page
use serde::Serialize;

use crate::core::AppConfig;
use crate::openai::{Message, Role};

/// Data rendered into the chat page
#[derive(Serialize)]
pub struct IndexPage {
    pub models: Vec<ModelOption>,
    pub turns: Vec<TurnView>,
}

#[derive(Serialize)]
pub struct ModelOption {
    pub name: String,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct TurnView {
    pub class: &'static str,
    pub content: String,
}

impl IndexPage {
    pub fn new(config: &AppConfig, history: &[Message]) -> Self {
        let models = config
            .models
            .iter()
            .enumerate()
            .map(|(i, name)| ModelOption {
                name: name.clone(),
                selected: i == 0,
            })
            .collect();
        let turns = history
            .iter()
            .map(|m| TurnView {
                class: match m.role {
                    Role::User => "user",
                    _ => "assistant",
                },
                content: m.content.clone(),
            })
            .collect();
        Self { models, turns }
    }
}
