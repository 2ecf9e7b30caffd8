//! Domain layer containing the assistant's business logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamp, errors, state machines)
//! - `knowledge` - The FAQ catalog
//! - `intent` - Intent classification and response templates
//! - `conversation` - Turns, the append-only log, reply tokens, events
//! - `escalation` - Human-handoff announcements

pub mod conversation;
pub mod escalation;
pub mod foundation;
pub mod intent;
pub mod knowledge;
