//! In-memory implementation of [`SessionStore`].
//!
//! Sessions live in a `HashMap` behind an `RwLock`; each session is wrapped in its own
//! `Mutex` so mutations are serialized per chat while different chats proceed in
//! parallel. Data is lost on restart, which is the intended lifecycle (no persistence).

use crate::store::{SessionHandle, SessionStore};
use crate::types::{Session, Turn};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// In-memory session store. Cheap to clone; clones share the same sessions.
#[derive(Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<i64, SessionHandle>>>,
    /// Cap applied to every session created by this store.
    max_turns: usize,
}

impl InMemorySessionStore {
    /// Creates an empty store; sessions it creates keep at most `max_turns` turns.
    pub fn new(max_turns: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_turns,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, chat_id: i64) -> SessionHandle {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(&chat_id) {
                return handle.clone();
            }
        }
        let mut sessions = self.sessions.write().await;
        // Re-check under the write lock: another task may have created it meanwhile.
        sessions
            .entry(chat_id)
            .or_insert_with(|| {
                debug!(chat_id = chat_id, "Creating session");
                Arc::new(Mutex::new(Session::new(chat_id, self.max_turns)))
            })
            .clone()
    }

    async fn append(&self, chat_id: i64, turn: Turn) {
        let handle = self.get_or_create(chat_id).await;
        let mut session = handle.lock().await;
        session.push(turn);
    }

    async fn clear(&self, chat_id: i64) {
        let handle = {
            let sessions = self.sessions.read().await;
            sessions.get(&chat_id).cloned()
        };
        if let Some(handle) = handle {
            let mut session = handle.lock().await;
            session.clear();
            debug!(chat_id = chat_id, "Cleared session");
        }
    }

    async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}
