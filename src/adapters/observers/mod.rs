//! Conversation observer implementations.

mod broadcast;
mod recording;

pub use broadcast::{BroadcastObserver, DEFAULT_BROADCAST_CAPACITY};
pub use recording::RecordingObserver;
