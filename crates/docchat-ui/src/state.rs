//! UI-level state that drives rendering.
//! Session logs are read straight from the orchestrator each frame;
//! this holds only what the panels own themselves, updated by draining
//! the EventBus.

use docchat_core::orchestrator::ChatState;
use docchat_types::event::ChatEvent;

pub const STATUS_IDLE: &str = "Upload a PDF to get started";
pub const STATUS_READY: &str = "Ready";

/// State visible to UI panels
pub struct UiState {
    /// Input field content
    pub input_text: String,
    /// Status line text
    pub status_text: String,
    /// Last error, shown in the status line until the next event
    pub last_error: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            status_text: STATUS_IDLE.to_string(),
            last_error: None,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::SessionCreated { file_name, .. } => {
                    self.last_error = None;
                    self.status_text = format!("Chatting about {}", file_name);
                }
                ChatEvent::SessionDeleted { .. } => {}
                ChatEvent::ActiveSessionChanged { id } => {
                    if id.is_none() {
                        self.status_text = STATUS_IDLE.to_string();
                    }
                }
                ChatEvent::MessageAppended { .. } => {
                    self.last_error = None;
                    self.status_text = STATUS_READY.to_string();
                }
                ChatEvent::ReplyDiscarded { session_id } => {
                    log::debug!("reply for session {} discarded", session_id);
                }
                ChatEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                    self.last_error = Some(message);
                }
            }
        }
    }

    /// Override the status line while a backend call is outstanding.
    /// Called after `process_events`, so in-flight status wins the frame.
    pub fn sync_busy(&mut self, chat: &ChatState) {
        if chat.uploading {
            self.status_text = "Processing PDF...".to_string();
        } else if chat.sending {
            self.status_text = "Thinking...".to_string();
        } else if chat.generating_follow_up {
            self.status_text = "Suggesting follow-ups...".to_string();
        }
    }

    pub fn is_busy(&self, chat: &ChatState) -> bool {
        chat.uploading || chat.sending || chat.generating_follow_up
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
