//! Session orchestrator — the core state machine.
//!
//! Owns the session collection, the active-session pointer, and the
//! per-operation in-flight flags. Every operation follows the same shape:
//!
//! 1. Issue phase (synchronous): validate preconditions, snapshot the
//!    target session id and any context, apply the optimistic transition,
//!    set the in-flight flag. One short `borrow_mut`, no suspension inside.
//! 2. Suspension: await the backend call. No borrow is held here, so other
//!    operations may issue and settle while this one is pending.
//! 3. Settle phase (synchronous): clear the flag, apply the completion
//!    transition against the id captured at issue time. A completion whose
//!    target session is gone is discarded, never applied elsewhere.
//!
//! Because every mutation happens between suspension points against the
//! snapshot taken at issue time, out-of-order completions are safe by
//! construction.

use std::cell::{Cell, Ref, RefCell};

use docchat_types::{
    event::ChatEvent,
    message::{ContextMessage, Message, Role},
    session::{Session, SessionId},
    Result,
};
use log::{debug, warn};

use crate::event_bus::EventBus;
use crate::ports::{Answer, BackendPort, DocumentUpload};

/// The only content type accepted for upload.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Header line of the synthetic follow-up suggestion message.
pub const FOLLOW_UP_HEADER: &str = "Here are some follow-up questions you can ask:";

/// The session collection plus the active pointer and in-flight flags.
///
/// Mutated only through the transition methods below; each is a complete
/// old-state-to-new-state step with no torn intermediate visible.
#[derive(Debug, Default)]
pub struct ChatState {
    /// Insertion order is creation order. No other ordering is maintained.
    pub sessions: Vec<Session>,
    pub active: Option<SessionId>,
    pub uploading: bool,
    pub sending: bool,
    pub generating_follow_up: bool,
}

impl ChatState {
    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn active_session(&self) -> Option<&Session> {
        self.active.and_then(|id| self.session(id))
    }

    pub fn insert_session(&mut self, session: Session) {
        self.sessions.push(session);
    }

    /// Remove a session if present. Clears the active pointer when it
    /// referenced the removed session, so it can never dangle.
    pub fn remove_session(&mut self, id: SessionId) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        let removed = self.sessions.len() != before;
        if removed && self.active == Some(id) {
            self.active = None;
        }
        removed
    }

    /// Move the active pointer. Unknown ids leave it unchanged.
    /// Returns true when the pointer actually moved.
    pub fn set_active(&mut self, id: SessionId) -> bool {
        if self.session(id).is_some() && self.active != Some(id) {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Append to a session's log. Returns false when the session is gone,
    /// in which case the caller must discard the message.
    pub fn append_message(&mut self, id: SessionId, message: Message) -> bool {
        match self.session_mut(id) {
            Some(session) => {
                session.messages.push(message);
                true
            }
            None => false,
        }
    }

    /// Snapshot of a session's log reduced to role + content.
    pub fn context_for(&self, id: SessionId) -> Vec<ContextMessage> {
        self.session(id)
            .map(|s| s.messages.iter().map(ContextMessage::from).collect())
            .unwrap_or_default()
    }
}

/// Drives the backend port and applies state transitions when calls settle.
pub struct ChatOrchestrator {
    state: RefCell<ChatState>,
    events: EventBus,
    next_session_id: Cell<u64>,
}

impl ChatOrchestrator {
    pub fn new(events: EventBus) -> Self {
        Self {
            state: RefCell::new(ChatState::default()),
            events,
            next_session_id: Cell::new(1),
        }
    }

    /// Read access for rendering. The borrow must be dropped before the
    /// next operation is issued.
    pub fn state(&self) -> Ref<'_, ChatState> {
        self.state.borrow()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn mint_session_id(&self) -> SessionId {
        let id = self.next_session_id.get();
        self.next_session_id.set(id + 1);
        SessionId(id)
    }

    /// Ingest a document and open a session for it.
    ///
    /// Non-PDF uploads are dropped silently before any network call. On
    /// success the new session becomes active; on failure nothing changes
    /// apart from the flag.
    pub async fn upload_document(
        &self,
        backend: &dyn BackendPort,
        upload: DocumentUpload,
    ) -> Result<()> {
        if upload.content_type != PDF_CONTENT_TYPE {
            debug!(
                "ignoring non-PDF upload {} ({})",
                upload.file_name, upload.content_type
            );
            return Ok(());
        }
        {
            let mut state = self.state.borrow_mut();
            if state.uploading {
                debug!("upload already in flight, ignoring {}", upload.file_name);
                return Ok(());
            }
            state.uploading = true;
        }

        let DocumentUpload {
            file_name, bytes, ..
        } = upload;
        let result = backend.ingest_document(&file_name, bytes).await;

        let mut state = self.state.borrow_mut();
        state.uploading = false;
        match result {
            Ok(()) => {
                let id = self.mint_session_id();
                state.insert_session(Session::new(id, file_name.clone()));
                state.active = Some(id);
                self.events.emit(ChatEvent::SessionCreated { id, file_name });
                self.events
                    .emit(ChatEvent::ActiveSessionChanged { id: Some(id) });
                Ok(())
            }
            Err(e) => {
                warn!("document ingest failed for {}: {}", file_name, e);
                self.events.emit(ChatEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Send a question against the active session.
    ///
    /// The user message is appended before the call resolves so the log
    /// reflects the action immediately; it is not rolled back on failure.
    /// The target session id and context are captured at issue time and
    /// never re-resolved, so the reply lands in the right log even if the
    /// active session changes mid-flight.
    pub async fn send_message(&self, backend: &dyn BackendPort, text: &str) -> Result<()> {
        let question = text.trim().to_string();
        if question.is_empty() {
            return Ok(());
        }

        let (target, context) = {
            let mut state = self.state.borrow_mut();
            let Some(target) = state.active else {
                return Ok(());
            };
            if state.sending {
                debug!("send already in flight");
                return Ok(());
            }
            // Context is the log as it stood before this question.
            let context = state.context_for(target);
            state.append_message(target, Message::user(question.clone()));
            state.sending = true;
            (target, context)
        };
        self.events.emit(ChatEvent::MessageAppended {
            session_id: target,
            role: Role::User,
        });

        let result = backend.ask(&question, context).await;

        let mut state = self.state.borrow_mut();
        state.sending = false;
        match result {
            Ok(Answer {
                message,
                relevant_pages,
            }) => {
                let reply = Message::assistant_with_pages(message, relevant_pages);
                if state.append_message(target, reply) {
                    self.events.emit(ChatEvent::MessageAppended {
                        session_id: target,
                        role: Role::Assistant,
                    });
                } else {
                    debug!("discarding answer for deleted session {}", target);
                    self.events
                        .emit(ChatEvent::ReplyDiscarded { session_id: target });
                }
                Ok(())
            }
            Err(e) => {
                warn!("ask failed for session {}: {}", target, e);
                self.events.emit(ChatEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Ask the backend for follow-up questions to the last assistant reply
    /// of the active session. A non-empty suggestion list is appended as a
    /// single synthetic assistant message; an empty list appends nothing.
    pub async fn generate_follow_ups(&self, backend: &dyn BackendPort) -> Result<()> {
        let (target, current_text) = {
            let mut state = self.state.borrow_mut();
            if state.generating_follow_up {
                debug!("follow-up generation already in flight");
                return Ok(());
            }
            let (target, text) = match state.active_session() {
                Some(session) => match session.last_assistant_text() {
                    Some(text) => (session.id, text.to_string()),
                    None => return Ok(()),
                },
                None => return Ok(()),
            };
            state.generating_follow_up = true;
            (target, text)
        };

        let result = backend.follow_ups(&current_text).await;

        let mut state = self.state.borrow_mut();
        state.generating_follow_up = false;
        match result {
            Ok(suggestions) => {
                if suggestions.is_empty() {
                    return Ok(());
                }
                let content = format!("{}\n{}", FOLLOW_UP_HEADER, suggestions.join("\n"));
                if state.append_message(target, Message::assistant(content)) {
                    self.events.emit(ChatEvent::MessageAppended {
                        session_id: target,
                        role: Role::Assistant,
                    });
                } else {
                    debug!("discarding follow-ups for deleted session {}", target);
                    self.events
                        .emit(ChatEvent::ReplyDiscarded { session_id: target });
                }
                Ok(())
            }
            Err(e) => {
                warn!("follow-up generation failed for session {}: {}", target, e);
                self.events.emit(ChatEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Point the active-session pointer at `id` if such a session exists;
    /// unknown ids are ignored without error.
    pub fn switch_session(&self, id: SessionId) {
        let changed = self.state.borrow_mut().set_active(id);
        if changed {
            self.events
                .emit(ChatEvent::ActiveSessionChanged { id: Some(id) });
        }
    }

    /// Remove a session. In-flight operations targeting it are not
    /// cancelled; their completions will be discarded on arrival.
    pub fn delete_session(&self, id: SessionId) {
        let (removed, active_cleared) = {
            let mut state = self.state.borrow_mut();
            let was_active = state.active == Some(id);
            let removed = state.remove_session(id);
            (removed, removed && was_active)
        };
        if removed {
            self.events.emit(ChatEvent::SessionDeleted { id });
            if active_cleared {
                self.events.emit(ChatEvent::ActiveSessionChanged { id: None });
            }
        }
    }
}
