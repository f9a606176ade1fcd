//! # bot-core
//!
//! Core types and traits for the GPT relay bot: [`Bot`], [`Handler`], [`HandlerChain`],
//! message and user types, chat-completion message types, and tracing initialization.
//! Transport-agnostic; used by session-store, openai-client, and telegram-gpt-bot.

pub mod bot;
pub mod chain;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use chain::HandlerChain;
pub use error::{BotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, ChatMessage, ChatRole, Handler, HandlerResponse, Message, MessageDirection, User,
};
