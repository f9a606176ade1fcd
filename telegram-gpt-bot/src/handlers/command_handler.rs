//! Command router handler: dispatches `/start`, `/help`, `/reset`, `/about`, `/history`.
//!
//! Anything that is not an exact command token returns Continue so the chat relay
//! handler treats it as a conversational turn.

use async_trait::async_trait;
use bot_core::{Bot, Handler, HandlerResponse, Message, Result};
use session_store::SessionStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::commands::{parse_command, Command};
use crate::split::{split_message, TELEGRAM_MESSAGE_LIMIT};
use crate::texts;

/// Turns shown by `/history`.
const HISTORY_DISPLAY_TURNS: usize = 10;
/// Per-line content width in the `/history` rendering.
const HISTORY_DISPLAY_WIDTH: usize = 100;

/// Handles bot commands against the session store and sends the reply itself.
pub struct CommandHandler {
    store: Arc<dyn SessionStore>,
    bot: Arc<dyn Bot>,
    /// Bot username cache, populated by the runner via get_me; used for `/cmd@bot` syntax.
    bot_username: Arc<RwLock<Option<String>>>,
    model: String,
}

impl CommandHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        bot: Arc<dyn Bot>,
        bot_username: Arc<RwLock<Option<String>>>,
        model: String,
    ) -> Self {
        Self {
            store,
            bot,
            bot_username,
            model,
        }
    }

    async fn history_text(&self, chat_id: i64) -> String {
        let handle = self.store.get_or_create(chat_id).await;
        let session = handle.lock().await;
        if session.is_empty() {
            texts::HISTORY_EMPTY.to_string()
        } else {
            format!(
                "{}{}",
                texts::HISTORY_HEADER,
                session.render_recent(HISTORY_DISPLAY_TURNS, HISTORY_DISPLAY_WIDTH)
            )
        }
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let username = self.bot_username.read().await.clone();
        let command = match parse_command(&message.content, username.as_deref()) {
            Some(command) => command,
            None => return Ok(HandlerResponse::Continue),
        };

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            command = ?command,
            "Command received"
        );

        let reply = match command {
            Command::Start => texts::WELCOME.to_string(),
            Command::Help => texts::HELP.to_string(),
            Command::About => texts::about(&self.model),
            Command::Reset => {
                self.store.clear(message.chat.id).await;
                texts::RESET_DONE.to_string()
            }
            Command::History => self.history_text(message.chat.id).await,
        };

        // /history output can exceed the Telegram limit for very long lines.
        for part in split_message(&reply, TELEGRAM_MESSAGE_LIMIT) {
            self.bot.reply_to(message, &part).await?;
        }

        Ok(HandlerResponse::Reply(reply))
    }
}
