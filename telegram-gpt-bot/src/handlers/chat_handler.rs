//! Completion relay handler: forwards the session history plus the current question to
//! the completion client and sends the reply back.
//!
//! The per-chat session lock is held across the completion call, so concurrent
//! messages from one chat are processed one at a time. A failed call is reported to
//! the user as a short apology and leaves the session untouched.

use async_trait::async_trait;
use bot_core::{Bot, Chat, ChatMessage, Handler, HandlerResponse, Message, Result};
use openai_client::CompletionClient;
use session_store::{SessionStore, Turn};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::split::{split_message, TELEGRAM_MESSAGE_LIMIT};
use crate::texts;

/// Relays conversational turns to the completion API.
pub struct ChatHandler {
    store: Arc<dyn SessionStore>,
    client: Arc<dyn CompletionClient>,
    bot: Arc<dyn Bot>,
    thinking_message: String,
    context_token_budget: usize,
}

impl ChatHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        client: Arc<dyn CompletionClient>,
        bot: Arc<dyn Bot>,
        thinking_message: String,
        context_token_budget: usize,
    ) -> Self {
        Self {
            store,
            client,
            bot,
            thinking_message,
            context_token_budget,
        }
    }

    /// Delivers the reply by editing the placeholder with the first chunk and sending
    /// the rest as separate messages when the reply exceeds the Telegram limit.
    async fn deliver(&self, chat: &Chat, placeholder_id: &str, reply: &str) -> Result<()> {
        let parts = split_message(reply, TELEGRAM_MESSAGE_LIMIT);
        let mut parts = parts.into_iter();
        if let Some(first) = parts.next() {
            self.bot.edit_message(chat, placeholder_id, &first).await?;
        }
        for part in parts {
            self.bot.send_message(chat, &part).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let question = message.content.trim();
        if question.is_empty() {
            // Nothing to relay; swallow instead of bothering the model or the user.
            return Ok(HandlerResponse::Stop);
        }

        let handle = self.store.get_or_create(message.chat.id).await;
        let mut session = handle.lock().await;

        let mut messages: Vec<ChatMessage> = session.context_messages(self.context_token_budget);
        messages.push(ChatMessage::user(question));

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            history_turns = session.len(),
            context_messages = messages.len(),
            "Relaying message to completion API"
        );

        let placeholder_id = self
            .bot
            .send_message_and_return_id(&message.chat, &self.thinking_message)
            .await?;

        match self.client.complete(messages).await {
            Ok(reply) if !reply.trim().is_empty() => {
                session.push(Turn::new(question, reply.clone()));
                drop(session);

                self.deliver(&message.chat, &placeholder_id, &reply).await?;
                info!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    reply_len = reply.len(),
                    "Sent completion reply"
                );
                Ok(HandlerResponse::Reply(reply))
            }
            Ok(_) => {
                drop(session);
                error!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    "Completion API returned empty reply"
                );
                self.bot
                    .edit_message(&message.chat, &placeholder_id, texts::COMPLETION_FAILED)
                    .await?;
                Ok(HandlerResponse::Reply(texts::COMPLETION_FAILED.to_string()))
            }
            Err(e) => {
                // Session stays as it was: the failed exchange is not recorded.
                drop(session);
                error!(
                    user_id = message.user.id,
                    chat_id = message.chat.id,
                    error = %e,
                    "Completion API call failed"
                );
                self.bot
                    .edit_message(&message.chat, &placeholder_id, texts::COMPLETION_FAILED)
                    .await?;
                Ok(HandlerResponse::Reply(texts::COMPLETION_FAILED.to_string()))
            }
        }
    }
}
