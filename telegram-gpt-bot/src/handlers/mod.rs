//! Message handlers: command router and completion relay.

mod chat_handler;
mod command_handler;

pub use chat_handler::ChatHandler;
pub use command_handler::CommandHandler;
