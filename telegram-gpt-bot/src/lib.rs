//! # telegram-gpt-bot
//!
//! Telegram chat bot that relays messages (with rolling per-chat history) to an
//! OpenAI-compatible Chat Completions API and sends the reply back.
//!
//! Layers: env [`config`], teloxide [`adapters`], [`commands`] routing, the two
//! [`handlers`] (command router + completion relay), and the REPL [`runner`].

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod split;
pub mod texts;

pub use adapters::{TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
pub use cli::{Cli, Commands};
pub use commands::Command;
pub use config::BotConfig;
pub use handlers::{ChatHandler, CommandHandler};
pub use runner::run_bot;
pub use split::{split_message, TELEGRAM_MESSAGE_LIMIT};
