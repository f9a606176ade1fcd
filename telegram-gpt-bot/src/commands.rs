//! Command parsing: exact, case-sensitive token match.
//!
//! Only the first whitespace-delimited token is inspected. A `@botname` suffix
//! (Telegram group syntax) is accepted when it matches this bot's username; a suffix
//! for another bot, an unknown command, or a near-miss like `/starting` all fall
//! through as conversational text.

/// The commands this bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Reset,
    About,
    History,
}

/// Parses the leading command token of `text`. Returns None for anything that should
/// be treated as a conversational turn.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let token = text.trim_start().split_whitespace().next()?;
    if !token.starts_with('/') {
        return None;
    }

    // Strip a @botname suffix only when it addresses this bot.
    let name = match token.split_once('@') {
        Some((name, suffix)) => {
            if bot_username != Some(suffix) {
                return None;
            }
            name
        }
        None => token,
    };

    match name {
        "/start" => Some(Command::Start),
        "/help" => Some(Command::Help),
        "/reset" => Some(Command::Reset),
        "/about" => Some(Command::About),
        "/history" => Some(Command::History),
        _ => None,
    }
}
