//! # session-store
//!
//! Per-chat rolling conversation history. A [`Session`] holds an ordered, monotonically
//! appended sequence of [`Turn`]s (one user/assistant exchange each), bounded by a
//! maximum turn count; [`Session::context_messages`] additionally bounds the context
//! sent to the model by an estimated token budget.
//!
//! [`InMemorySessionStore`] keeps sessions in memory only: everything is evicted on
//! process restart. The per-chat handle it returns is a `tokio::sync::Mutex`, which is
//! the serialization point for concurrent messages from the same chat.

pub mod inmemory;
pub mod store;
pub mod tokens;
pub mod types;

pub use inmemory::InMemorySessionStore;
pub use store::{SessionHandle, SessionStore};
pub use tokens::estimate_tokens;
pub use types::{Session, Turn};
