//! Escalation to a human agent.
//!
//! This only announces the handoff and counts the request. Opening a real
//! support channel is left to whoever observes `EscalationRequested`.

use crate::domain::conversation::{ConversationState, Turn};
use crate::domain::foundation::{DomainError, ValidationError};

/// Wait estimate announced when nothing else is configured.
pub const DEFAULT_WAIT_ESTIMATE: &str = "2-3 minutes";

/// Result of one escalation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escalation {
    /// The announcement turn that was appended.
    pub turn: Turn,
    /// 1-based count of escalations in this conversation.
    pub request_number: u32,
}

/// Appends the human-handoff announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationController {
    wait_estimate: String,
}

impl EscalationController {
    /// # Errors
    ///
    /// - `EmptyField` if the wait estimate is blank
    pub fn new(wait_estimate: impl Into<String>) -> Result<Self, ValidationError> {
        let wait_estimate = wait_estimate.into();
        if wait_estimate.trim().is_empty() {
            return Err(ValidationError::empty_field("wait_estimate"));
        }
        Ok(Self { wait_estimate })
    }

    pub fn wait_estimate(&self) -> &str {
        &self.wait_estimate
    }

    /// Text of the handoff announcement.
    pub fn announcement(&self) -> String {
        format!(
            "I'm connecting you with a human support agent. Please wait a moment while I transfer your conversation. Average wait time is {}.",
            self.wait_estimate
        )
    }

    /// Appends one announcement turn. Repeated calls append repeated turns.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the surface is closed
    pub fn escalate(&self, state: &mut ConversationState) -> Result<Escalation, DomainError> {
        state.ensure_open()?;
        let turn = state.record_bot_turn(&self.announcement())?;
        let request_number = state.record_escalation();
        tracing::info!(
            request_number,
            wait_estimate = %self.wait_estimate,
            "escalation to human agent requested"
        );
        Ok(Escalation {
            turn,
            request_number,
        })
    }
}

impl Default for EscalationController {
    fn default() -> Self {
        Self {
            wait_estimate: DEFAULT_WAIT_ESTIMATE.to_string(),
        }
    }
}
