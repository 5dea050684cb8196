//! Conversation state and the chat turn handler

mod session;
mod store;

pub use session::{ChatError, ChatSessionHandler};
pub use store::{ConversationHistory, SessionGuard, SessionStore};
