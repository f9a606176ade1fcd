//! Session store trait.

use crate::types::{Session, Turn};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared per-chat session handle.
///
/// Holding the lock across a completion call serializes concurrent messages from the
/// same chat; different chats never contend on each other's handle.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Storage for per-chat conversation sessions.
///
/// Keeping this behind a trait keeps the transport and model-provider adapters
/// swappable and lets tests substitute their own store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session handle for the chat, creating an empty session on first use.
    /// A missing chat id is never an error.
    async fn get_or_create(&self, chat_id: i64) -> SessionHandle;

    /// Appends a completed turn to the chat's session (creating it if needed).
    async fn append(&self, chat_id: i64, turn: Turn);

    /// Clears the chat's history. A chat with no session is a no-op.
    async fn clear(&self, chat_id: i64);

    /// Number of chats with a session.
    async fn len(&self) -> usize;
}
