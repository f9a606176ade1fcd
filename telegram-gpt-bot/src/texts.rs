//! User-facing reply texts.

pub const WELCOME: &str = "\
Hi! Send me a message and I will answer with the help of a language model.

Commands:
/start - this greeting
/reset - clear the conversation history
/history - show recent conversation
/about - bot and model info
/help - help";

pub const HELP: &str = "\
Just send a text message to chat; I keep a short rolling history per chat.

/reset - clear the conversation history
/history - show recent conversation
/about - bot and model info
/help - this message";

pub const RESET_DONE: &str = "Conversation history cleared.";

pub const HISTORY_EMPTY: &str = "History is empty.";

pub const HISTORY_HEADER: &str = "Recent conversation:\n\n";

/// Short apology sent when the completion API call fails. Plain text, no details
/// beyond what is safe to show a user; the real error goes to the log.
pub const COMPLETION_FAILED: &str =
    "Sorry, something went wrong talking to the language model. Please try again.";

/// `/about` body; model name is filled in from config.
pub fn about(model: &str) -> String {
    format!(
        "Telegram GPT relay bot.\nModel: {}\nHistory: in-memory per chat, cleared on /reset or restart.",
        model
    )
}
