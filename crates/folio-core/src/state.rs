//! UI-agnostic conversation and request state types
//!
//! These are shared by every front end (TUI, one-shot CLI) and don't depend on
//! any specific UI framework.

use serde::{Deserialize, Serialize};

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single message sent to the completion endpoint.
///
/// Fields are private so a message can't change after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: ChatRole,
    content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    pub fn role(&self) -> ChatRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Reply text extracted from the first returned choice, already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply(String);

impl ChatReply {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    pub fn into_text(self) -> String {
        self.0
    }
}

/// Lifecycle of one affordance's request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Succeeded(_) | RequestState::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::system("be brief");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");
    }

    #[test]
    fn test_reply_is_trimmed() {
        let reply = ChatReply::new("\n  hi there \t");
        assert_eq!(reply.text(), "hi there");
    }

    #[test]
    fn test_request_state_flags() {
        assert!(!RequestState::Idle.is_pending());
        assert!(RequestState::Pending.is_pending());
        assert!(!RequestState::Pending.is_terminal());
        assert!(RequestState::Succeeded("ok".into()).is_terminal());
        assert!(RequestState::Failed("nope".into()).is_terminal());
    }
}
