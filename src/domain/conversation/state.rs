//! Conversation state: the timeline plus everything the surface shows.

use serde::{Deserialize, Serialize};

use super::log::ConversationLog;
use super::reply::{ReplyStatus, ReplyToken};
use super::turn::{Sender, Turn};
use crate::domain::foundation::{DomainError, ReplyId, StateMachine};

/// Lifecycle of the conversation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceStatus {
    /// Visible and accepting input.
    #[default]
    Open,
    /// Torn down; the state is about to be discarded.
    Closed,
}

impl StateMachine for SurfaceStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (SurfaceStatus::Open, SurfaceStatus::Closed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SurfaceStatus::Open => vec![SurfaceStatus::Closed],
            SurfaceStatus::Closed => vec![],
        }
    }
}

/// Everything one open chat surface owns.
///
/// Created seeded with the welcome turn, mutated only through the
/// conversation and escalation controllers, discarded on close.
#[derive(Debug)]
pub struct ConversationState {
    log: ConversationLog,
    faq_panel_visible: bool,
    input_buffer: String,
    pending_replies: Vec<ReplyToken>,
    reply_status: ReplyStatus,
    surface: SurfaceStatus,
    escalation_requests: u32,
}

/// Serializable read view of a [`ConversationState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSnapshot {
    pub turns: Vec<Turn>,
    pub faq_panel_visible: bool,
    pub reply_pending: bool,
    pub input: String,
    pub surface: SurfaceStatus,
    pub escalation_requests: u32,
}

impl ConversationState {
    /// Opens a conversation seeded with the bot's welcome turn.
    ///
    /// The FAQ panel starts visible.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the welcome text is blank
    pub fn open(welcome: &str) -> Result<Self, DomainError> {
        let mut log = ConversationLog::new();
        let welcome = log.record(Sender::Bot, welcome)?;
        tracing::debug!(turn_id = %welcome.id(), "seeded welcome turn");

        Ok(Self {
            log,
            faq_panel_visible: true,
            input_buffer: String::new(),
            pending_replies: Vec::new(),
            reply_status: ReplyStatus::Idle,
            surface: SurfaceStatus::Open,
            escalation_requests: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read side
    // ─────────────────────────────────────────────────────────────────────────

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn turns(&self) -> &[Turn] {
        self.log.all()
    }

    pub fn is_faq_panel_visible(&self) -> bool {
        self.faq_panel_visible
    }

    pub fn input(&self) -> &str {
        &self.input_buffer
    }

    pub fn reply_status(&self) -> ReplyStatus {
        self.reply_status
    }

    pub fn is_reply_pending(&self) -> bool {
        self.reply_status == ReplyStatus::Scheduled
    }

    pub fn pending_reply_ids(&self) -> Vec<ReplyId> {
        self.pending_replies.iter().map(ReplyToken::id).collect()
    }

    pub fn surface(&self) -> SurfaceStatus {
        self.surface
    }

    pub fn is_open(&self) -> bool {
        self.surface == SurfaceStatus::Open
    }

    pub fn escalation_requests(&self) -> u32 {
        self.escalation_requests
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            turns: self.log.all().to_vec(),
            faq_panel_visible: self.faq_panel_visible,
            reply_pending: self.is_reply_pending(),
            input: self.input_buffer.clone(),
            surface: self.surface,
            escalation_requests: self.escalation_requests,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fails with `ConversationClosed` once the surface is closed.
    pub fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::closed())
        }
    }

    /// Shows or hides the FAQ panel. Returns true if visibility changed.
    pub fn set_faq_panel_visible(&mut self, visible: bool) -> bool {
        let changed = self.faq_panel_visible != visible;
        self.faq_panel_visible = visible;
        changed
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
    }

    /// Returns the input buffer and leaves it empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input_buffer)
    }

    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
    }

    pub fn record_user_turn(&mut self, text: &str) -> Result<Turn, DomainError> {
        self.log.record(Sender::User, text)
    }

    pub fn record_bot_turn(&mut self, text: &str) -> Result<Turn, DomainError> {
        self.log.record(Sender::Bot, text)
    }

    /// Records a user question and its answer as one atomic pair.
    pub fn record_exchange(&mut self, question: &str, answer: &str) -> Result<[Turn; 2], DomainError> {
        self.log.record_pair(question, answer)
    }

    /// Registers a scheduled reply and marks a reply as pending.
    pub fn track_reply(&mut self, token: ReplyToken) -> Result<(), DomainError> {
        self.reply_status = self.reply_status.transition_to(ReplyStatus::Scheduled)?;
        self.pending_replies.push(token);
        Ok(())
    }

    /// Claims a pending reply for delivery.
    ///
    /// Returns false when the reply was cancelled or is unknown, in which
    /// case the caller must not append anything.
    pub fn claim_reply(&mut self, reply_id: ReplyId) -> bool {
        let Some(position) = self.pending_replies.iter().position(|t| t.id() == reply_id) else {
            return false;
        };
        let token = self.pending_replies.remove(position);
        self.settle_reply_status();
        !token.is_cancelled()
    }

    /// Cancels every pending reply and returns their ids.
    pub fn cancel_replies(&mut self) -> Vec<ReplyId> {
        let cancelled: Vec<ReplyId> = self
            .pending_replies
            .drain(..)
            .map(|token| {
                token.cancel();
                token.id()
            })
            .collect();
        self.settle_reply_status();
        cancelled
    }

    /// Counts an escalation request and returns its 1-based number.
    pub fn record_escalation(&mut self) -> u32 {
        self.escalation_requests = self.escalation_requests.saturating_add(1);
        self.escalation_requests
    }

    /// Closes the surface, cancelling whatever is still pending.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already closed
    pub fn close(&mut self) -> Result<Vec<ReplyId>, DomainError> {
        self.surface = self.surface.transition_to(SurfaceStatus::Closed)?;
        self.faq_panel_visible = false;
        self.input_buffer.clear();
        Ok(self.cancel_replies())
    }

    fn settle_reply_status(&mut self) {
        if self.pending_replies.is_empty() {
            self.reply_status = ReplyStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn open_state() -> ConversationState {
        ConversationState::open("Hello! I'm your support assistant.").unwrap()
    }

    mod open {
        use super::*;

        #[test]
        fn seeds_one_bot_turn() {
            let state = open_state();
            assert_eq!(state.turns().len(), 1);
            assert!(state.turns()[0].is_bot());
        }

        #[test]
        fn starts_with_faq_panel_visible_and_idle() {
            let state = open_state();
            assert!(state.is_faq_panel_visible());
            assert_eq!(state.reply_status(), ReplyStatus::Idle);
            assert!(state.is_open());
        }

        #[test]
        fn rejects_blank_welcome() {
            assert!(ConversationState::open("  ").is_err());
        }
    }

    mod replies {
        use super::*;

        #[test]
        fn tracking_marks_pending() {
            let mut state = open_state();
            state.track_reply(ReplyToken::new()).unwrap();
            assert!(state.is_reply_pending());
        }

        #[test]
        fn claim_returns_to_idle_after_last_reply() {
            let mut state = open_state();
            let first = ReplyToken::new();
            let second = ReplyToken::new();
            state.track_reply(first.clone()).unwrap();
            state.track_reply(second.clone()).unwrap();

            assert!(state.claim_reply(first.id()));
            assert!(state.is_reply_pending());
            assert!(state.claim_reply(second.id()));
            assert!(!state.is_reply_pending());
        }

        #[test]
        fn claim_is_one_shot() {
            let mut state = open_state();
            let token = ReplyToken::new();
            state.track_reply(token.clone()).unwrap();

            assert!(state.claim_reply(token.id()));
            assert!(!state.claim_reply(token.id()));
        }

        #[test]
        fn claim_refuses_cancelled_token() {
            let mut state = open_state();
            let token = ReplyToken::new();
            state.track_reply(token.clone()).unwrap();
            token.cancel();

            assert!(!state.claim_reply(token.id()));
            assert!(!state.is_reply_pending());
        }

        #[test]
        fn cancel_replies_cancels_tokens() {
            let mut state = open_state();
            let token = ReplyToken::new();
            state.track_reply(token.clone()).unwrap();

            let cancelled = state.cancel_replies();

            assert_eq!(cancelled, vec![token.id()]);
            assert!(token.is_cancelled());
            assert!(!state.claim_reply(token.id()));
        }
    }

    mod close {
        use super::*;

        #[test]
        fn close_cancels_and_rejects_further_mutation() {
            let mut state = open_state();
            let token = ReplyToken::new();
            state.track_reply(token.clone()).unwrap();

            let cancelled = state.close().unwrap();

            assert_eq!(cancelled.len(), 1);
            assert!(token.is_cancelled());
            assert_eq!(state.ensure_open().unwrap_err().code, ErrorCode::ConversationClosed);
        }

        #[test]
        fn closing_twice_is_invalid_transition() {
            let mut state = open_state();
            state.close().unwrap();
            assert_eq!(
                state.close().unwrap_err().code,
                ErrorCode::InvalidStateTransition
            );
        }
    }

    mod input_and_panel {
        use super::*;

        #[test]
        fn take_input_clears_buffer() {
            let mut state = open_state();
            state.set_input("draft");
            assert_eq!(state.take_input(), "draft");
            assert_eq!(state.input(), "");
        }

        #[test]
        fn panel_change_reports_only_real_changes() {
            let mut state = open_state();
            assert!(!state.set_faq_panel_visible(true));
            assert!(state.set_faq_panel_visible(false));
        }

        #[test]
        fn escalations_are_counted_from_one() {
            let mut state = open_state();
            assert_eq!(state.record_escalation(), 1);
            assert_eq!(state.record_escalation(), 2);
        }

        #[test]
        fn snapshot_reflects_state() {
            let mut state = open_state();
            state.set_input("typing");
            let snapshot = state.snapshot();

            assert_eq!(snapshot.turns.len(), 1);
            assert_eq!(snapshot.input, "typing");
            assert!(snapshot.faq_panel_visible);
            assert!(!snapshot.reply_pending);
            assert_eq!(snapshot.surface, SurfaceStatus::Open);
        }
    }
}
