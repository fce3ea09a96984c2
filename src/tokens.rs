//! Token counting for usage reporting
//!
//! The upstream bot protocol exposes no token accounting, so the `usage`
//! block on buffered responses is filled from whitespace-delimited word
//! counts: the conversation content on the prompt side, the concatenated
//! result on the completion side.
//!
//! # Accuracy
//!
//! This is a *word count*, not a tokenizer. It is deterministic and
//! monotonic with content length, which is all the reported counters
//! promise. Do not use it for billing or context-window math.

use crate::openai::ChatMessage;

/// Count whitespace-delimited tokens in text
///
/// Runs of whitespace collapse into a single boundary; empty and
/// all-whitespace input counts as zero.
pub fn count_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Count prompt tokens across a conversation
///
/// Only message content is counted. The role labels the composer splices
/// in are scaffolding, not caller text, and are excluded.
pub fn count_prompt_tokens(messages: &[ChatMessage]) -> u32 {
    messages.iter().map(|m| count_tokens(&m.content)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: &str, content: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(count_tokens("   \n\t  "), 0);
    }

    #[test]
    fn test_single_word() {
        assert_eq!(count_tokens("Hello"), 1);
    }

    #[test]
    fn test_two_words() {
        assert_eq!(count_tokens("Hi there"), 2);
    }

    #[test]
    fn test_runs_of_whitespace_collapse() {
        assert_eq!(count_tokens("one   two\n\nthree\tfour"), 4);
    }

    #[test]
    fn test_leading_and_trailing_whitespace_ignored() {
        assert_eq!(count_tokens("  padded  "), 1);
    }

    #[test]
    fn test_prompt_count_excludes_role_labels() {
        let messages = vec![message("user", "Hello")];
        assert_eq!(count_prompt_tokens(&messages), 1);
    }

    #[test]
    fn test_prompt_count_sums_across_messages() {
        let messages = vec![
            message("system", "Be brief"),
            message("user", "Tell me about Rust"),
        ];
        assert_eq!(count_prompt_tokens(&messages), 6);
    }

    #[test]
    fn test_prompt_count_empty_history() {
        assert_eq!(count_prompt_tokens(&[]), 0);
    }
}
