//! gptbot binary: forwards Telegram chats to a Chat Completions API.

use anyhow::Result;
use clap::Parser;
use telegram_gpt_bot::cli::{load_config, Cli, Commands};
use telegram_gpt_bot::run_bot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
    }
}
