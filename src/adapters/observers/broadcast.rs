//! Broadcast observer for async presentation layers.
//!
//! Fans conversation events out over a `tokio::sync::broadcast` channel so
//! any number of async tasks (a websocket writer, a TUI redraw loop) can
//! follow one conversation.

use tokio::sync::broadcast;

use crate::domain::conversation::ConversationEvent;
use crate::ports::ConversationObserver;

/// Default channel capacity, in events.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 128;

/// Republishes every event on a broadcast channel.
///
/// Slow receivers lag and skip events rather than blocking the conversation.
#[derive(Debug, Clone)]
pub struct BroadcastObserver {
    sender: broadcast::Sender<ConversationEvent>,
}

impl BroadcastObserver {
    /// Creates an observer with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Create with default capacity (128 events).
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }

    /// Returns a receiver for events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastObserver {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl ConversationObserver for BroadcastObserver {
    fn on_event(&self, event: &ConversationEvent) {
        if self.sender.send(event.clone()).is_err() {
            tracing::trace!(event_type = event.event_type(), "no broadcast receivers");
        }
    }

    fn name(&self) -> &'static str {
        "BroadcastObserver"
    }
}
