//! Bot assembly and REPL runner.
//!
//! `run_bot` wires config into components (session store, completion client, Telegram
//! adapter, handler chain) and starts the teloxide REPL. Each inbound message is
//! converted to a core message and handled in a spawned task; handler errors are
//! logged and never terminate the process.

use anyhow::Result;
use bot_core::{init_tracing, Bot as CoreBot, HandlerChain};
use openai_client::{mask_token, CompletionClient, OpenAICompletionClient};
use session_store::{InMemorySessionStore, SessionStore};
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::adapters::{TelegramBotAdapter, TelegramMessageWrapper};
use crate::config::BotConfig;
use crate::handlers::{ChatHandler, CommandHandler};

/// Builds the handler chain: command router first, completion relay second.
/// Exposed so integration tests can drive the chain with mock bot and client.
pub fn build_handler_chain(
    config: &BotConfig,
    store: Arc<dyn SessionStore>,
    client: Arc<dyn CompletionClient>,
    bot: Arc<dyn CoreBot>,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            store.clone(),
            bot.clone(),
            bot_username,
            config.model.clone(),
        )))
        .add_handler(Arc::new(ChatHandler::new(
            store,
            client,
            bot,
            config.thinking_message.clone(),
            config.context_token_budget,
        )))
}

/// Main entry: validate config, init logging, build components, run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file.as_deref())?;

    info!(
        bot_token = %mask_token(&config.bot_token),
        openai_api_key = %mask_token(&config.openai_api_key),
        openai_base_url = %config.openai_base_url,
        model = %config.model,
        max_history_turns = config.max_history_turns,
        context_token_budget = config.context_token_budget,
        "Initializing bot"
    );

    let mut teloxide_bot = teloxide::Bot::new(config.bot_token.clone());
    if let Some(ref url) = config.telegram_api_url {
        teloxide_bot = teloxide_bot.set_api_url(reqwest::Url::parse(url)?);
    }

    let store: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(config.max_history_turns));
    let client: Arc<dyn CompletionClient> = Arc::new(
        OpenAICompletionClient::with_base_url(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        )
        .with_model(config.model.clone())
        .with_system_prompt_opt(config.system_prompt.clone()),
    );
    let adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot_username = Arc::new(RwLock::new(None));

    let chain = build_handler_chain(&config, store, client, adapter, bot_username.clone());

    info!("Bot started successfully");

    run_repl(teloxide_bot, chain, bot_username).await
}

/// Starts the REPL with the given teloxide Bot, HandlerChain, and bot_username cache.
/// Calls get_me() before starting and writes the username into `bot_username` (needed
/// for `/cmd@bot` parsing); each text message is converted to a core message and
/// handled in a spawned task.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            *bot_username.write().await = Some(username.clone());
            info!(username = %username, "Bot username set before repl");
        }
    }

    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();

            async move {
                if msg.text().is_none() {
                    info!(chat_id = msg.chat.id.0, "Ignoring non-text message");
                    return Ok(());
                }

                let wrapper = TelegramMessageWrapper(&msg);
                let core_msg = wrapper.to_core();

                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_id = %core_msg.id,
                    "Received message"
                );

                // Run the handler chain in a spawned task so the REPL returns
                // immediately; a slow completion call never blocks other chats.
                tokio::spawn(async move {
                    if let Err(e) = chain.handle(&core_msg).await {
                        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                    }
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
