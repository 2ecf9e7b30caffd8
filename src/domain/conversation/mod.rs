//! Conversation domain module.
//!
//! The chat timeline and the state around it: turns, the append-only log,
//! scheduled reply tokens, surface lifecycle, and observer events.

mod events;
mod log;
mod reply;
mod state;
mod turn;

pub use events::ConversationEvent;
pub use log::ConversationLog;
pub use reply::{ReplyPolicy, ReplyStatus, ReplyToken};
pub use state::{ConversationSnapshot, ConversationState, SurfaceStatus};
pub use turn::{Sender, Turn};
