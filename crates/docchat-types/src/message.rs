use serde::{Deserialize, Serialize};

/// Role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in a session's log.
///
/// Immutable once appended: logs are append-only and never reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Page numbers the answer was drawn from. Only set on assistant
    /// messages produced from a question.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub relevant_pages: Vec<u32>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
            relevant_pages: Vec::new(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            relevant_pages: Vec::new(),
        }
    }

    pub fn assistant_with_pages(text: impl Into<String>, pages: Vec<u32>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
            relevant_pages: pages,
        }
    }
}

/// A message reduced for the wire: role + content, page references stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for ContextMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}
