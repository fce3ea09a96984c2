//! Prompt composition
//!
//! The upstream bot protocol takes a single text prompt per query, not a
//! structured message history. Inbound conversations are flattened into
//! one newline-joined transcript, one `"<role>: <content>"` line per
//! message in input order. The flattening is lossy by design: roles are
//! carried as plain text and nothing is validated or reordered.

use crate::openai::ChatMessage;

/// Flatten a message history into a single prompt
///
/// One line per message, input order preserved. The result is trimmed at
/// both ends; an empty history composes to the empty string. Identical
/// input always produces byte-identical output, which the usage counters
/// downstream rely on.
pub fn compose(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
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
    fn test_single_message() {
        let messages = vec![message("user", "Hello")];
        assert_eq!(compose(&messages), "user: Hello");
    }

    #[test]
    fn test_messages_joined_in_order() {
        let messages = vec![
            message("system", "Be brief"),
            message("user", "Hi"),
            message("assistant", "Hello"),
            message("user", "Bye"),
        ];
        assert_eq!(
            compose(&messages),
            "system: Be brief\nuser: Hi\nassistant: Hello\nuser: Bye"
        );
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(compose(&[]), "");
    }

    #[test]
    fn test_roles_are_not_validated() {
        let messages = vec![message("wizard", "abracadabra")];
        assert_eq!(compose(&messages), "wizard: abracadabra");
    }

    #[test]
    fn test_boundary_whitespace_trimmed() {
        // Empty content leaves a trailing space on its line; only the
        // outer boundary of the whole prompt is trimmed.
        let messages = vec![message("user", "")];
        assert_eq!(compose(&messages), "user:");

        let messages = vec![message("user", ""), message("user", "hi")];
        assert_eq!(compose(&messages), "user: \nuser: hi");
    }
}
