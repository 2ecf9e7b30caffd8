//! In-memory observer that records every event.
//!
//! Mostly useful for tests and for hosts that poll instead of reacting.

use std::sync::{Mutex, PoisonError};

use crate::domain::conversation::ConversationEvent;
use crate::ports::ConversationObserver;

/// Captures events in arrival order.
///
/// # Example
///
/// ```ignore
/// let recorder = Arc::new(RecordingObserver::new());
/// controller.subscribe(recorder.clone());
/// controller.escalate()?;
/// assert!(recorder.has_event("escalation_requested"));
/// ```
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ConversationEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events.
    pub fn events(&self) -> Vec<ConversationEvent> {
        self.lock().clone()
    }

    /// Returns events with the given type tag.
    pub fn events_of_type(&self, event_type: &str) -> Vec<ConversationEvent> {
        self.lock()
            .iter()
            .filter(|e| e.event_type() == event_type)
            .cloned()
            .collect()
    }

    /// Returns the type tags of recorded events, in order.
    pub fn event_types(&self) -> Vec<&'static str> {
        self.lock().iter().map(ConversationEvent::event_type).collect()
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.lock().iter().any(|e| e.event_type() == event_type)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ConversationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConversationObserver for RecordingObserver {
    fn on_event(&self, event: &ConversationEvent) {
        self.lock().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "RecordingObserver"
    }
}
