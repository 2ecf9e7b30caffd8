//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReplyScheduler` - Defers a bot reply until its typing delay elapses
//! - `ConversationObserver` - Receives conversation events for rendering

mod conversation_observer;
mod reply_scheduler;

pub use conversation_observer::ConversationObserver;
pub use reply_scheduler::{ReplyJob, ReplyScheduler};
