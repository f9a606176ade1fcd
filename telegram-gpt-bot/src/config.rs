//! Bot configuration loaded from environment variables.
//!
//! Secrets (bot token, API key) are never logged raw; use `openai_client::mask_token`
//! when a config summary is logged.

use anyhow::Result;
use std::env;

/// Full bot config: Telegram connection, completion API, session bounds, logging.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL (optional, e.g. local Bot API server)
    pub telegram_api_url: Option<String>,
    /// OPENAI_API_KEY
    pub openai_api_key: String,
    /// OPENAI_BASE_URL
    pub openai_base_url: String,
    /// MODEL
    pub model: String,
    /// SYSTEM_PROMPT (optional; client falls back to its default)
    pub system_prompt: Option<String>,
    /// THINKING_MESSAGE: placeholder sent while waiting for the completion API
    pub thinking_message: String,
    /// MAX_HISTORY_TURNS: session cap in turn pairs
    pub max_history_turns: usize,
    /// CONTEXT_TOKEN_BUDGET: estimated-token bound for the history sent per request
    pub context_token_budget: usize,
    /// LOG_FILE (optional; stdout only when unset)
    pub log_file: Option<String>,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let openai_api_key =
            env::var("OPENAI_API_KEY").map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let system_prompt = env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let thinking_message =
            env::var("THINKING_MESSAGE").unwrap_or_else(|_| "Thinking...".to_string());
        let max_history_turns = env::var("MAX_HISTORY_TURNS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let context_token_budget = env::var("CONTEXT_TOKEN_BUDGET")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3072);
        let log_file = env::var("LOG_FILE").ok();

        Ok(Self {
            bot_token,
            telegram_api_url,
            openai_api_key,
            openai_base_url,
            model,
            system_prompt,
            thinking_message,
            max_history_turns,
            context_token_budget,
            log_file,
        })
    }

    /// Validate config: API URLs must parse, session bounds must be positive.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if reqwest::Url::parse(&self.openai_base_url).is_err() {
            anyhow::bail!("OPENAI_BASE_URL is not a valid URL: {}", self.openai_base_url);
        }
        if self.max_history_turns == 0 {
            anyhow::bail!("MAX_HISTORY_TURNS must be at least 1");
        }
        if self.context_token_budget == 0 {
            anyhow::bail!("CONTEXT_TOKEN_BUDGET must be at least 1");
        }
        Ok(())
    }
}
