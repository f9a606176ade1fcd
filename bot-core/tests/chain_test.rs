//! Integration tests for [`bot_core::HandlerChain`].
//!
//! Covers: handlers executed in order, Stop ending the chain, Reply ending the chain
//! and carrying the response body, and Continue falling through every handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bot_core::{
    Chat, Handler, HandlerChain, HandlerResponse, Message, MessageDirection, User,
};
use chrono::Utc;

fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

/// Handler that counts invocations and returns a fixed response.
struct CountingHandler {
    count: Arc<AtomicUsize>,
    response: HandlerResponse,
}

#[async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> bot_core::Result<HandlerResponse> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// **Test: Handlers run in order until one replies.**
///
/// **Setup:** Handler A returns Continue, handler B returns Reply, handler C never reached.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** A and B each ran once, C ran zero times, result is B's Reply.
#[tokio::test]
async fn test_first_reply_stops_chain() {
    let a_count = Arc::new(AtomicUsize::new(0));
    let b_count = Arc::new(AtomicUsize::new(0));
    let c_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler {
            count: a_count.clone(),
            response: HandlerResponse::Continue,
        }))
        .add_handler(Arc::new(CountingHandler {
            count: b_count.clone(),
            response: HandlerResponse::Reply("hello".to_string()),
        }))
        .add_handler(Arc::new(CountingHandler {
            count: c_count.clone(),
            response: HandlerResponse::Reply("never".to_string()),
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("hello".to_string()));
    assert_eq!(a_count.load(Ordering::SeqCst), 1);
    assert_eq!(b_count.load(Ordering::SeqCst), 1);
    assert_eq!(c_count.load(Ordering::SeqCst), 0);
}

/// **Test: Stop ends the chain without a reply body.**
///
/// **Setup:** Handler A returns Stop, handler B would reply.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** result is Stop; B ran zero times.
#[tokio::test]
async fn test_stop_ends_chain() {
    let a_count = Arc::new(AtomicUsize::new(0));
    let b_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler {
            count: a_count.clone(),
            response: HandlerResponse::Stop,
        }))
        .add_handler(Arc::new(CountingHandler {
            count: b_count.clone(),
            response: HandlerResponse::Reply("never".to_string()),
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(a_count.load(Ordering::SeqCst), 1);
    assert_eq!(b_count.load(Ordering::SeqCst), 0);
}

/// **Test: Chain with no claiming handler returns Continue.**
///
/// **Setup:** Two handlers that both return Continue.
/// **Action:** `chain.handle(&message)`.
/// **Expected:** both ran once; result is Continue.
#[tokio::test]
async fn test_all_continue_falls_through() {
    let a_count = Arc::new(AtomicUsize::new(0));
    let b_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CountingHandler {
            count: a_count.clone(),
            response: HandlerResponse::Continue,
        }))
        .add_handler(Arc::new(CountingHandler {
            count: b_count.clone(),
            response: HandlerResponse::Continue,
        }));

    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(a_count.load(Ordering::SeqCst), 1);
    assert_eq!(b_count.load(Ordering::SeqCst), 1);
}

/// **Test: Empty chain returns Continue.**
#[tokio::test]
async fn test_empty_chain() {
    let chain = HandlerChain::new();
    let message = create_test_message("test");
    let result = chain.handle(&message).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}
