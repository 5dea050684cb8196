//! Client for OpenAI compatible chat completion APIs

mod chat;
mod core;

pub use self::chat::*;
pub use self::core::*;
