//! Reply scheduler implementations.
//!
//! - `TokioReplyScheduler` - one tokio task per reply (production)
//! - `ManualReplyScheduler` - host-driven clock (custom loops, tests)

mod manual_scheduler;
mod tokio_scheduler;

pub use manual_scheduler::ManualReplyScheduler;
pub use tokio_scheduler::TokioReplyScheduler;
