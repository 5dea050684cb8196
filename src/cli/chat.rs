use std::sync::Arc;

use anyhow::{Result, anyhow};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use uuid::Uuid;

use crate::chat::{ChatSessionHandler, SessionStore};
use crate::core::AppConfig;

/// Chat with the model from the terminal. Uses the same session
/// handling as the server with a single session for the whole run.
/// `/clear` forgets the conversation so far and `/exit` quits.
pub async fn run(model: Option<String>, search: bool) -> Result<()> {
    let config = AppConfig::from_env()?;
    let model = model
        .or_else(|| config.default_model().map(String::from))
        .ok_or(anyhow!("No --model given and QWEN_CHAT_MODELS is empty"))?;

    let handler = ChatSessionHandler::new(config, Arc::new(SessionStore::new()));
    let session_id = Uuid::new_v4().to_string();
    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                match line {
                    "" => continue,
                    "/exit" | "/quit" => break,
                    "/clear" => {
                        handler.clear(&session_id).await;
                        println!("Chat history cleared");
                    }
                    _ => {
                        rl.add_history_entry(line)?;
                        match handler.submit(&session_id, line, &model, search).await {
                            Ok(reply) => println!("{}", reply),
                            Err(e) => eprintln!("Error: {}", e),
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
