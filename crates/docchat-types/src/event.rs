use serde::{Deserialize, Serialize};

use crate::message::Role;
use crate::session::SessionId;

/// Events emitted by the session orchestrator.
/// UI subscribes to these for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A document was ingested and its session inserted
    SessionCreated { id: SessionId, file_name: String },

    /// A session was removed from the collection
    SessionDeleted { id: SessionId },

    /// The active-session pointer moved
    ActiveSessionChanged { id: Option<SessionId> },

    /// A message landed in a session's log
    MessageAppended { session_id: SessionId, role: Role },

    /// A completion arrived for a session that no longer exists
    ReplyDiscarded { session_id: SessionId },

    /// A backend call failed
    Error { message: String },
}
