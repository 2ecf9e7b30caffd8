//! Adapters - Implementations of port interfaces.
//!
//! - `scheduling` - Reply schedulers (tokio timers, manual clock)
//! - `observers` - Conversation observers (recording, broadcast)

pub mod observers;
pub mod scheduling;

pub use observers::{BroadcastObserver, RecordingObserver};
pub use scheduling::{ManualReplyScheduler, TokioReplyScheduler};
