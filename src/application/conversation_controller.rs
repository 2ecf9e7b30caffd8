//! ConversationController - Drives one open chat surface.
//!
//! Every public operation takes the state lock once, mutates, releases it,
//! and only then notifies observers. Bot replies are scheduled through the
//! [`ReplyScheduler`] port and hold a weak reference back to the
//! conversation, so a reply firing after close or drop does nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

use crate::domain::conversation::{
    ConversationEvent, ConversationSnapshot, ConversationState, ReplyPolicy, ReplyStatus,
    ReplyToken, Turn,
};
use crate::domain::escalation::Escalation;
use crate::domain::foundation::{ConversationId, DomainError, ReplyId};
use crate::domain::knowledge::FaqEntry;
use crate::ports::{ConversationObserver, ReplyJob, ReplyScheduler};

use super::engine::{AssistantEngine, ConversationSettings};

struct Shared {
    id: ConversationId,
    state: Mutex<ConversationState>,
    engine: Arc<AssistantEngine>,
    scheduler: Arc<dyn ReplyScheduler>,
    observers: RwLock<Vec<Arc<dyn ConversationObserver>>>,
    settings: ConversationSettings,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, events: Vec<ConversationEvent>) {
        if events.is_empty() {
            return;
        }
        let observers = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for event in &events {
            for observer in &observers {
                tracing::trace!(
                    observer = observer.name(),
                    event = event.event_type(),
                    "notifying observer"
                );
                observer.on_event(event);
            }
        }
    }

    /// Appends a scheduled reply if it is still wanted.
    fn deliver_reply(&self, reply_id: ReplyId, text: &str) {
        let events = {
            let mut state = self.lock();
            if !state.claim_reply(reply_id) {
                tracing::warn!(
                    conversation_id = %self.id,
                    reply_id = %reply_id,
                    "dropping reply that is no longer pending"
                );
                return;
            }
            match state.record_bot_turn(text) {
                Ok(turn) => {
                    tracing::debug!(conversation_id = %self.id, reply_id = %reply_id, "reply delivered");
                    vec![
                        ConversationEvent::TurnsAppended { turns: vec![turn] },
                        ConversationEvent::ReplyDelivered { reply_id },
                    ]
                }
                Err(err) => {
                    tracing::error!(
                        conversation_id = %self.id,
                        reply_id = %reply_id,
                        "failed to append reply: {}",
                        err
                    );
                    Vec::new()
                }
            }
        };
        self.publish(events);
    }
}

/// One open conversation: welcome turn, user submissions, delayed bot
/// replies, the FAQ shortcut panel and escalation.
///
/// # Example
///
/// ```ignore
/// let scheduler = Arc::new(TokioReplyScheduler::from_current()?);
/// let chat = ConversationController::open(engine, scheduler, ConversationSettings::default())?;
/// chat.submit_user_text("How do I change my password?")?;
/// // one second later the bot reply is in chat.turns()
/// ```
pub struct ConversationController {
    shared: Arc<Shared>,
}

impl ConversationController {
    /// Opens a conversation seeded with the welcome turn, FAQ panel visible.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the welcome message is blank or the reply
    ///   delay is zero or above the ceiling
    pub fn open(
        engine: Arc<AssistantEngine>,
        scheduler: Arc<dyn ReplyScheduler>,
        settings: ConversationSettings,
    ) -> Result<Self, DomainError> {
        settings.validate()?;
        let state = ConversationState::open(&settings.welcome_message)?;
        let id = ConversationId::new();

        tracing::info!(
            conversation_id = %id,
            scheduler = scheduler.name(),
            reply_delay_ms = settings.reply_delay_ms(),
            "conversation opened"
        );

        Ok(Self {
            shared: Arc::new(Shared {
                id,
                state: Mutex::new(state),
                engine,
                scheduler,
                observers: RwLock::new(Vec::new()),
                settings,
            }),
        })
    }

    pub fn id(&self) -> ConversationId {
        self.shared.id
    }

    pub fn settings(&self) -> &ConversationSettings {
        &self.shared.settings
    }

    /// Registers an observer for every later event.
    pub fn subscribe(&self, observer: Arc<dyn ConversationObserver>) {
        tracing::debug!(
            conversation_id = %self.shared.id,
            observer = observer.name(),
            "observer subscribed"
        );
        self.shared
            .observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Submits user text.
    ///
    /// Blank text is ignored. Otherwise the user turn is appended right away,
    /// the input buffer is cleared, the FAQ panel is hidden, and the bot
    /// reply for the classified text is scheduled after the reply delay.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    /// - `SchedulerUnavailable` if the reply could not be scheduled; the user
    ///   turn stays in the log
    pub fn submit_user_text(&self, text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            tracing::debug!(conversation_id = %self.shared.id, "ignoring blank submission");
            return Ok(());
        }

        let engine = &self.shared.engine;
        let intent = engine.classifier().classify(text);
        let response = engine.responses().respond(intent).to_string();
        let token = ReplyToken::new();
        let reply_id = token.id();
        let delay = self.shared.settings.reply_delay;

        let mut events = Vec::new();
        {
            let mut state = self.shared.lock();
            state.ensure_open()?;

            if self.shared.settings.reply_policy == ReplyPolicy::Replace {
                let reply_ids = state.cancel_replies();
                if !reply_ids.is_empty() {
                    events.push(ConversationEvent::ReplyCancelled { reply_ids });
                }
            }

            let turn = state.record_user_turn(text)?;
            state.clear_input();
            events.push(ConversationEvent::TurnsAppended { turns: vec![turn] });
            if state.set_faq_panel_visible(false) {
                events.push(ConversationEvent::FaqPanelChanged { visible: false });
            }
            state.track_reply(token.clone())?;
        }

        // Published before the job exists so delivery can never be observed first.
        events.push(ConversationEvent::ReplyScheduled {
            reply_id,
            intent,
            delay_ms: self.shared.settings.reply_delay_ms(),
        });
        self.shared.publish(events);

        let job = self.reply_job(reply_id, response);
        if let Err(err) = self.shared.scheduler.schedule(delay, token, job) {
            tracing::error!(
                conversation_id = %self.shared.id,
                scheduler = self.shared.scheduler.name(),
                "failed to schedule reply: {}",
                err
            );
            if self.shared.lock().claim_reply(reply_id) {
                self.shared.publish(vec![ConversationEvent::ReplyCancelled {
                    reply_ids: vec![reply_id],
                }]);
            }
            return Err(err);
        }

        tracing::debug!(
            conversation_id = %self.shared.id,
            reply_id = %reply_id,
            intent = %intent,
            "reply scheduled"
        );
        Ok(())
    }

    /// Submits whatever is in the input buffer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::submit_user_text`].
    pub fn submit_input(&self) -> Result<(), DomainError> {
        let text = {
            let mut state = self.shared.lock();
            state.ensure_open()?;
            state.take_input()
        };
        self.submit_user_text(&text)
    }

    /// Answers an FAQ entry immediately as one question/answer pair.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    pub fn select_faq(&self, entry: &FaqEntry) -> Result<(), DomainError> {
        let answer = self.shared.engine.responses().respond_from_faq(entry);

        let events = {
            let mut state = self.shared.lock();
            state.ensure_open()?;
            let pair = state.record_exchange(entry.question(), answer)?;
            let mut events = vec![ConversationEvent::TurnsAppended {
                turns: pair.to_vec(),
            }];
            if state.set_faq_panel_visible(false) {
                events.push(ConversationEvent::FaqPanelChanged { visible: false });
            }
            events
        };

        tracing::debug!(
            conversation_id = %self.shared.id,
            question = entry.question(),
            "FAQ answered"
        );
        self.shared.publish(events);
        Ok(())
    }

    /// Announces a handoff to a human agent.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    pub fn escalate(&self) -> Result<Escalation, DomainError> {
        let escalation = {
            let mut state = self.shared.lock();
            self.shared.engine.escalation().escalate(&mut state)?
        };

        self.shared.publish(vec![
            ConversationEvent::TurnsAppended {
                turns: vec![escalation.turn.clone()],
            },
            ConversationEvent::EscalationRequested {
                request_number: escalation.request_number,
            },
        ]);
        Ok(escalation)
    }

    /// Cancels every reply still waiting on its delay.
    ///
    /// Returns the ids of the cancelled replies.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    pub fn cancel_pending_reply(&self) -> Result<Vec<ReplyId>, DomainError> {
        let reply_ids = {
            let mut state = self.shared.lock();
            state.ensure_open()?;
            state.cancel_replies()
        };

        if !reply_ids.is_empty() {
            tracing::debug!(
                conversation_id = %self.shared.id,
                count = reply_ids.len(),
                "pending replies cancelled"
            );
            self.shared.publish(vec![ConversationEvent::ReplyCancelled {
                reply_ids: reply_ids.clone(),
            }]);
        }
        Ok(reply_ids)
    }

    /// Closes the conversation, cancelling pending replies. Idempotent.
    pub fn close(&self) -> Result<(), DomainError> {
        let reply_ids = {
            let mut state = self.shared.lock();
            if !state.is_open() {
                return Ok(());
            }
            state.close()?
        };

        tracing::info!(
            conversation_id = %self.shared.id,
            cancelled_replies = reply_ids.len(),
            "conversation closed"
        );

        let mut events = Vec::new();
        if !reply_ids.is_empty() {
            events.push(ConversationEvent::ReplyCancelled { reply_ids });
        }
        events.push(ConversationEvent::Closed);
        self.shared.publish(events);
        Ok(())
    }

    /// Replaces the input buffer.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    pub fn set_input(&self, text: impl Into<String>) -> Result<(), DomainError> {
        let mut state = self.shared.lock();
        state.ensure_open()?;
        state.set_input(text);
        Ok(())
    }

    /// Flips the FAQ panel and returns its new visibility.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    pub fn toggle_faq_panel(&self) -> Result<bool, DomainError> {
        let visible = {
            let mut state = self.shared.lock();
            state.ensure_open()?;
            let visible = !state.is_faq_panel_visible();
            state.set_faq_panel_visible(visible);
            visible
        };
        self.shared
            .publish(vec![ConversationEvent::FaqPanelChanged { visible }]);
        Ok(visible)
    }

    /// Shows or hides the FAQ panel.
    ///
    /// # Errors
    ///
    /// - `ConversationClosed` if the conversation was closed
    pub fn set_faq_panel_visible(&self, visible: bool) -> Result<(), DomainError> {
        let changed = {
            let mut state = self.shared.lock();
            state.ensure_open()?;
            state.set_faq_panel_visible(visible)
        };
        if changed {
            self.shared
                .publish(vec![ConversationEvent::FaqPanelChanged { visible }]);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Entries offered in the FAQ panel.
    pub fn faq_suggestions(&self) -> &[FaqEntry] {
        self.shared.engine.knowledge().suggestions()
    }

    pub fn input(&self) -> String {
        self.shared.lock().input().to_string()
    }

    /// Copy of the timeline, oldest first.
    pub fn turns(&self) -> Vec<Turn> {
        self.shared.lock().turns().to_vec()
    }

    pub fn is_faq_panel_visible(&self) -> bool {
        self.shared.lock().is_faq_panel_visible()
    }

    pub fn is_reply_pending(&self) -> bool {
        self.shared.lock().is_reply_pending()
    }

    pub fn reply_status(&self) -> ReplyStatus {
        self.shared.lock().reply_status()
    }

    pub fn is_open(&self) -> bool {
        self.shared.lock().is_open()
    }

    pub fn snapshot(&self) -> ConversationSnapshot {
        self.shared.lock().snapshot()
    }

    fn reply_job(&self, reply_id: ReplyId, text: String) -> ReplyJob {
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        Box::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.deliver_reply(reply_id, &text);
            }
        })
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        let cancelled = self.shared.lock().cancel_replies();
        if !cancelled.is_empty() {
            tracing::debug!(
                conversation_id = %self.shared.id,
                count = cancelled.len(),
                "cancelled replies of dropped conversation"
            );
        }
    }
}

impl std::fmt::Debug for ConversationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationController")
            .field("id", &self.shared.id)
            .field("scheduler", &self.shared.scheduler.name())
            .field("settings", &self.shared.settings)
            .finish_non_exhaustive()
    }
}
