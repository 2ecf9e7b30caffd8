//! Knowledge module.
//!
//! The fixed FAQ catalog offered as one-click shortcuts.

mod catalog;
mod faq;

pub use catalog::{KnowledgeBase, DEFAULT_SUGGESTION_LIMIT};
pub use faq::FaqEntry;
