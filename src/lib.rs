//! Support Assistant - Embeddable rule-based support chat engine
//!
//! Classifies free-text user turns with ordered keyword rules, answers with
//! canned or FAQ-backed responses after a cancellable typing delay, and
//! announces handoff to a human agent on request.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use support_assistant::adapters::TokioReplyScheduler;
//! use support_assistant::application::{AssistantEngine, ConversationController, ConversationSettings};
//! use support_assistant::config::AssistantConfig;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AssistantConfig::load()?;
//! let engine = Arc::new(AssistantEngine::from_config(&config)?);
//! let scheduler = Arc::new(TokioReplyScheduler::from_current()?);
//! let chat = ConversationController::open(
//!     engine,
//!     scheduler,
//!     ConversationSettings::from(&config.conversation),
//! )?;
//!
//! chat.submit_user_text("How do I change my password?")?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
