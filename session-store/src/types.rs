//! Session and turn types.

use bot_core::ChatMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::tokens::estimate_tokens;

/// One completed exchange: user text in, assistant text out. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            created_at: Utc::now(),
        }
    }
}

/// Rolling conversation history for one chat.
///
/// Turns are appended in arrival order and never reordered or merged. When the
/// configured cap is exceeded the oldest turns are dropped first; a turn is always
/// dropped whole so the user/assistant pairing is preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    chat_id: i64,
    turns: VecDeque<Turn>,
    max_turns: usize,
}

impl Session {
    /// Creates an empty session for the given chat. `max_turns` of 0 is treated as 1.
    pub fn new(chat_id: i64, max_turns: usize) -> Self {
        Self {
            chat_id,
            turns: VecDeque::new(),
            max_turns: max_turns.max(1),
        }
    }

    pub fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns in order, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Appends a turn, evicting oldest turns while over the cap.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// Drops all history.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Builds the chat-completion context from history, newest turns first within the
    /// estimated `token_budget`, returned oldest-first with correct roles.
    ///
    /// A turn is included whole (both user and assistant message) or not at all, so a
    /// tight budget drops oldest complete exchanges rather than splitting a pair. The
    /// newest turn is always included even if it alone exceeds the budget, so a single
    /// oversized exchange still yields context.
    pub fn context_messages(&self, token_budget: usize) -> Vec<ChatMessage> {
        let mut selected: Vec<&Turn> = Vec::new();
        let mut used = 0usize;

        for turn in self.turns.iter().rev() {
            let cost = estimate_tokens(&turn.user) + estimate_tokens(&turn.assistant);
            if used + cost > token_budget && !selected.is_empty() {
                break;
            }
            used += cost;
            selected.push(turn);
            if used >= token_budget {
                break;
            }
        }

        let mut messages = Vec::with_capacity(selected.len() * 2);
        for turn in selected.iter().rev() {
            messages.push(ChatMessage::user(turn.user.clone()));
            messages.push(ChatMessage::assistant(turn.assistant.clone()));
        }
        messages
    }

    /// Renders the most recent `max_turns` turns for display (`/history`), each line
    /// truncated to `width` characters.
    pub fn render_recent(&self, max_turns: usize, width: usize) -> String {
        let skip = self.turns.len().saturating_sub(max_turns);
        let mut out = String::new();
        for turn in self.turns.iter().skip(skip) {
            out.push_str("You: ");
            out.push_str(&truncate_chars(&turn.user, width));
            out.push('\n');
            out.push_str("Bot: ");
            out.push_str(&truncate_chars(&turn.assistant, width));
            out.push('\n');
        }
        out
    }
}

/// Truncates to at most `width` characters, appending "..." when cut. Char-boundary safe.
fn truncate_chars(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut s: String = text.chars().take(width).collect();
        s.push_str("...");
        s
    }
}
