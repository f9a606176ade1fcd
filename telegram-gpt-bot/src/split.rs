//! Splitting long replies to fit Telegram's message size limit.

/// Telegram rejects text messages longer than 4096 characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Splits `text` into chunks of at most `limit` characters, in order.
/// Counts characters (not bytes) so multi-byte text is never cut mid-character.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == limit {
            parts.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() || parts.is_empty() {
        parts.push(current);
    }
    parts
}
