//! Token estimation for bounding the context sent to the model.

/// Estimates the token count for a text string.
///
/// Rough approximation: 1 token ≈ 4 characters for English text. Divides text length
/// by 4, rounds up, minimum 1. Good enough to keep the request under the model's
/// context window; use a real tokenizer if exact counts ever matter.
pub fn estimate_tokens(text: &str) -> usize {
    ((text.len() as f64) / 4.0).ceil().max(1.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens_rounds_up() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(400)), 100);
    }
}
