//! Simple event bus for decoupled communication between the orchestrator
//! and the UI.
//!
//! Single-threaded by design: the whole core runs on one logical thread
//! with cooperative suspension, so interior mutability via RefCell is
//! enough. Events are buffered and drained by the UI on each frame.

use docchat_types::event::ChatEvent;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Shared event bus — clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Publish an event. Called by the orchestrator.
    pub fn emit(&self, event: ChatEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Drain all pending events. Called by the UI layer each frame.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Whether anything is buffered (useful for egui repaint triggers).
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
