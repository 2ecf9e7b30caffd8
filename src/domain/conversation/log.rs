//! Append-only conversation log.

use std::collections::HashSet;

use super::turn::{Sender, Turn};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, TurnId};

/// Ordered, append-only sequence of turns.
///
/// # Invariants
///
/// - turns are never edited, removed, or reordered
/// - ids are unique and strictly increasing in insertion order
/// - timestamps are non-decreasing in insertion order
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
    ids: HashSet<TurnId>,
    next_id: Option<TurnId>,
}

impl ConversationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the first turn of the log.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the log already has turns
    pub fn seed(&mut self, turn: Turn) -> Result<(), DomainError> {
        if !self.turns.is_empty() {
            return Err(DomainError::validation(
                "seed",
                "A log can only be seeded while empty",
            ));
        }
        self.append(turn)
    }

    /// Appends a turn built elsewhere.
    ///
    /// # Errors
    ///
    /// - `DuplicateTurnId` if the id was already used
    /// - `ValidationFailed` if the id or timestamp would go backwards
    pub fn append(&mut self, turn: Turn) -> Result<(), DomainError> {
        self.check_appendable(&turn)?;
        self.push_unchecked(turn);
        Ok(())
    }

    /// Allocates the next id and a non-decreasing timestamp, then appends.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if text is blank
    pub fn record(&mut self, sender: Sender, text: impl Into<String>) -> Result<Turn, DomainError> {
        let turn = self.build_turn(self.allocate_id(), sender, text)?;
        self.append(turn.clone())?;
        Ok(turn)
    }

    /// Records a user turn and its bot answer as one unit.
    ///
    /// Both turns are validated before either lands, so the log never ends
    /// up holding the question alone.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if either text is blank
    /// - `DuplicateTurnId` if either id is taken or the id space is exhausted
    pub fn record_pair(
        &mut self,
        user_text: impl Into<String>,
        bot_text: impl Into<String>,
    ) -> Result<[Turn; 2], DomainError> {
        let user_id = self.allocate_id();
        let bot_id = user_id.checked_next().ok_or_else(|| {
            DomainError::new(ErrorCode::DuplicateTurnId, "No turn id left for the answer")
                .with_detail("turn_id", user_id.to_string())
        })?;
        let user = self.build_turn(user_id, Sender::User, user_text)?;
        let bot = Turn::new(bot_id, Sender::Bot, bot_text, *user.timestamp())?;

        self.check_appendable(&user)?;
        self.check_appendable(&bot)?;
        self.push_unchecked(user.clone());
        self.push_unchecked(bot.clone());
        Ok([user, bot])
    }

    /// Returns every turn in insertion order.
    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    /// Iterates turns in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Returns the most recent turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True before the log is seeded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn allocate_id(&self) -> TurnId {
        self.next_id.unwrap_or(TurnId::FIRST)
    }

    fn build_turn(
        &self,
        id: TurnId,
        sender: Sender,
        text: impl Into<String>,
    ) -> Result<Turn, DomainError> {
        let timestamp = match self.turns.last() {
            Some(last) => Timestamp::now().not_before(*last.timestamp()),
            None => Timestamp::now(),
        };
        Turn::new(id, sender, text, timestamp)
    }

    fn check_appendable(&self, turn: &Turn) -> Result<(), DomainError> {
        if self.ids.contains(&turn.id()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateTurnId,
                format!("Turn {} is already in the log", turn.id()),
            )
            .with_detail("turn_id", turn.id().to_string()));
        }
        if let Some(last) = self.turns.last() {
            if turn.id() < last.id() {
                return Err(DomainError::validation(
                    "id",
                    format!("Turn {} would precede turn {}", turn.id(), last.id()),
                ));
            }
            if turn.timestamp().is_before(last.timestamp()) {
                return Err(DomainError::validation(
                    "timestamp",
                    "Turn timestamp precedes the previous turn",
                ));
            }
        }
        Ok(())
    }

    fn push_unchecked(&mut self, turn: Turn) {
        self.ids.insert(turn.id());
        self.next_id = Some(turn.id().next());
        self.turns.push(turn);
    }
}
