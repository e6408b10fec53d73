//! Conversation history types.
//!
//! A conversation is an ordered, append-only sequence of turns owned by the
//! caller. Past turns are never mutated; the dialogue layer only reads them.

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human planning the trip.
    User,
    /// The planning assistant.
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who spoke.
    pub role: Role,
    /// What was said, verbatim.
    pub content: String,
}

impl ConversationTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Render a history as `role: content` lines, the shape extraction
/// providers are prompted with.
pub fn format_history(history: &[ConversationTurn]) -> String {
    history
        .iter()
        .map(|turn| {
            let role = match turn.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            };
            format!("{}: {}", role, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_history_interleaves_roles() {
        let history = vec![
            ConversationTurn::user("I want to go to Paris"),
            ConversationTurn::assistant("When are you departing?"),
            ConversationTurn::user("May 10th"),
        ];

        let formatted = format_history(&history);
        assert_eq!(
            formatted,
            "user: I want to go to Paris\nassistant: When are you departing?\nuser: May 10th"
        );
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let turn = ConversationTurn::user("hi");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"role\":\"user\""));
    }
}
