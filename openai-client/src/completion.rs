//! Completion client abstraction: [`CompletionClient`] trait + OpenAI implementation.
//!
//! The trait is object-safe so handlers can hold `Arc<dyn CompletionClient>` and tests
//! can substitute a mock that never touches the network.

use anyhow::Result;
use async_trait::async_trait;
use bot_core::{ChatMessage, ChatRole};
use tracing::instrument;

use crate::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, OpenAIClient,
};

/// Default system instruction when no custom system prompt is configured.
/// Plain text only, so replies paste cleanly into Telegram messages.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Reply in plain text without Markdown or formatting symbols, suitable for sending directly in Telegram.";

/// Completion client interface: request one reply for an ordered message list.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the model reply text for the given messages (user/assistant history plus
    /// the current question). Implementations prepend their system prompt.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// OpenAI-backed [`CompletionClient`].
#[derive(Clone)]
pub struct OpenAICompletionClient {
    client: OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAICompletionClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: "gpt-3.5-turbo".to_string(),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    fn system_content(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

#[async_trait]
impl CompletionClient for OpenAICompletionClient {
    #[instrument(skip(self, messages))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_content().to_string())
                .build()?
                .into(),
        ];
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }
        self.client.chat_completion(&self.model, openai_messages).await
    }
}
