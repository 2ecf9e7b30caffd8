//! Turn entity for the conversation timeline.
//!
//! Turns are immutable records of what the user or the bot said. Each turn
//! has an id allocated by the log, a sender, text, and a timestamp.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp, TurnId};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person typing into the chat surface.
    User,
    /// The assistant.
    Bot,
}

/// An immutable message in the conversation timeline.
///
/// # Invariants
///
/// - `id` is unique within its log
/// - `text` is non-blank (validated at construction)
/// - nothing changes after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    sender: Sender,
    text: String,
    timestamp: Timestamp,
}

impl Turn {
    /// Creates a turn.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is blank
    pub fn new(
        id: TurnId,
        sender: Sender,
        text: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation("text", "Turn text cannot be empty"));
        }
        Ok(Self {
            id,
            sender,
            text,
            timestamp,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the turn id.
    pub fn id(&self) -> TurnId {
        self.id
    }

    /// Returns who sent the turn.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the text exactly as submitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the turn was recorded.
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Returns true if the user sent this turn.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Returns true if the bot sent this turn.
    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}
