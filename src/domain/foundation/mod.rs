//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object, error types and the
//! state machine trait used across the assistant domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConversationId, ReplyId, TurnId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
