//! Application layer - Orchestrates the domain for one conversation.
//!
//! - `AssistantEngine` - Shared catalog, classifier, templates, escalation
//! - `ConversationController` - Commands and queries for one chat surface

mod conversation_controller;
mod engine;

pub use conversation_controller::ConversationController;
pub use engine::{AssistantEngine, ConversationSettings};
