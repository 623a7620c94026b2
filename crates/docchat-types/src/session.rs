use serde::{Deserialize, Serialize};
use std::fmt;

use crate::message::{Message, Role};

/// Opaque session identifier. Minted by the orchestrator from a
/// monotonically increasing counter, so ids are generation-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One document-scoped conversation with its own ordered message log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Display name — the name of the uploaded document.
    pub file_name: String,
    pub messages: Vec<Message>,
    pub created_at: String,
}

impl Session {
    pub fn new(id: SessionId, file_name: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            messages: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The text of the last message, if that message is an assistant reply.
    /// This is the precondition for requesting follow-up questions.
    pub fn last_assistant_text(&self) -> Option<&str> {
        match self.messages.last() {
            Some(msg) if msg.role == Role::Assistant => Some(&msg.content),
            _ => None,
        }
    }
}
