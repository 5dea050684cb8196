use anyhow::Result;
use qwen_chat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
