//! Integration tests for the command router: dispatch, reset semantics, history
//! rendering, and near-miss tokens falling through to the chat relay.


use bot_core::{Chat, HandlerChain, HandlerResponse, Message, MessageDirection, User};
use chrono::Utc;
use mock_components::{MockBot, MockCompletionClient};
use session_store::{InMemorySessionStore, SessionStore, Turn};
use std::sync::Arc;
use telegram_gpt_bot::{runner::build_handler_chain, texts, BotConfig};
use tokio::sync::RwLock;

fn test_config() -> BotConfig {
    BotConfig {
        bot_token: "123456789:AAE-test".to_string(),
        telegram_api_url: None,
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "https://api.openai.com/v1".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        system_prompt: None,
        thinking_message: "Thinking...".to_string(),
        max_history_turns: 10,
        context_token_budget: 3072,
        log_file: None,
    }
}

fn make_message(chat_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: 42,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

struct TestBed {
    chain: HandlerChain,
    store: Arc<InMemorySessionStore>,
    bot: Arc<MockBot>,
    client: Arc<MockCompletionClient>,
}

fn setup(client: MockCompletionClient, username: Option<&str>) -> TestBed {
    let config = test_config();
    let store = Arc::new(InMemorySessionStore::new(config.max_history_turns));
    let bot = Arc::new(MockBot::new());
    let client = Arc::new(client);
    let bot_username = Arc::new(RwLock::new(username.map(String::from)));
    let chain = build_handler_chain(
        &config,
        store.clone(),
        client.clone(),
        bot.clone(),
        bot_username,
    );
    TestBed {
        chain,
        store,
        bot,
        client,
    }
}

/// **Test: /start replies with the welcome text and never reaches the model.**
#[tokio::test]
async fn test_start_command() {
    let bed = setup(MockCompletionClient::replying("unused"), None);

    let result = bed.chain.handle(&make_message(1, "/start")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply(texts::WELCOME.to_string()));
    assert_eq!(bed.bot.sent(), vec![(1, texts::WELCOME.to_string())]);
    assert!(bed.client.requests().is_empty());
}

/// **Test: /reset clears the chat's session and confirms.**
///
/// **Setup:** session pre-seeded with two turns.
/// **Action:** handle "/reset".
/// **Expected:** session empty, RESET_DONE sent, model not called.
#[tokio::test]
async fn test_reset_clears_session() {
    let bed = setup(MockCompletionClient::replying("unused"), None);
    bed.store.append(1, Turn::new("q1", "a1")).await;
    bed.store.append(1, Turn::new("q2", "a2")).await;

    let result = bed.chain.handle(&make_message(1, "/reset")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply(texts::RESET_DONE.to_string()));
    let handle = bed.store.get_or_create(1).await;
    assert!(handle.lock().await.is_empty());
    assert!(bed.client.requests().is_empty());
}

/// **Test: /about reports the configured model.**
#[tokio::test]
async fn test_about_reports_model() {
    let bed = setup(MockCompletionClient::replying("unused"), None);

    let result = bed.chain.handle(&make_message(1, "/about")).await.unwrap();

    match result {
        HandlerResponse::Reply(text) => assert!(text.contains("gpt-3.5-turbo")),
        other => panic!("expected Reply, got {:?}", other),
    }
}

/// **Test: /history on an empty chat reports empty; with turns it shows them.**
#[tokio::test]
async fn test_history_command() {
    let bed = setup(MockCompletionClient::replying("unused"), None);

    let result = bed.chain.handle(&make_message(1, "/history")).await.unwrap();
    assert_eq!(
        result,
        HandlerResponse::Reply(texts::HISTORY_EMPTY.to_string())
    );

    bed.store
        .append(1, Turn::new("what is rust", "a language"))
        .await;
    let result = bed.chain.handle(&make_message(1, "/history")).await.unwrap();
    match result {
        HandlerResponse::Reply(text) => {
            assert!(text.contains("You: what is rust"));
            assert!(text.contains("Bot: a language"));
        }
        other => panic!("expected Reply, got {:?}", other),
    }
}

/// **Test: near-miss tokens are conversational, not commands.**
///
/// **Setup:** model replies "ok".
/// **Action:** handle "/starting over" and "/Start".
/// **Expected:** both reach the completion client; no command reply sent.
#[tokio::test]
async fn test_near_miss_goes_to_model() {
    let bed = setup(MockCompletionClient::replying("ok"), None);

    bed.chain
        .handle(&make_message(1, "/starting over"))
        .await
        .unwrap();
    bed.chain.handle(&make_message(1, "/Start")).await.unwrap();

    assert_eq!(bed.client.requests().len(), 2);
    let sent = bed.bot.sent();
    assert!(sent.iter().all(|(_, text)| text != texts::WELCOME));
}

/// **Test: @botname suffix is honored only for this bot.**
///
/// **Setup:** bot username is "mybot"; model replies "ok".
/// **Action:** handle "/help@mybot" and "/help@otherbot".
/// **Expected:** the first is the help command; the second reaches the model.
#[tokio::test]
async fn test_command_with_username_suffix() {
    let bed = setup(MockCompletionClient::replying("ok"), Some("mybot"));

    let result = bed
        .chain
        .handle(&make_message(1, "/help@mybot"))
        .await
        .unwrap();
    assert_eq!(result, HandlerResponse::Reply(texts::HELP.to_string()));
    assert!(bed.client.requests().is_empty());

    bed.chain
        .handle(&make_message(1, "/help@otherbot"))
        .await
        .unwrap();
    assert_eq!(bed.client.requests().len(), 1);
}
