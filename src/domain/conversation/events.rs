//! Events a conversation emits to its observers.

use serde::{Deserialize, Serialize};

use super::turn::Turn;
use crate::domain::foundation::ReplyId;
use crate::domain::intent::Intent;

/// A change to an open conversation, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// One or more turns landed in the log together.
    TurnsAppended { turns: Vec<Turn> },
    FaqPanelChanged { visible: bool },
    ReplyScheduled {
        reply_id: ReplyId,
        intent: Intent,
        delay_ms: u64,
    },
    ReplyDelivered { reply_id: ReplyId },
    ReplyCancelled { reply_ids: Vec<ReplyId> },
    /// The user asked for a human. Hosts wire their ticketing here.
    EscalationRequested { request_number: u32 },
    Closed,
}

impl ConversationEvent {
    /// Stable name of the event, matching its serialized `type` tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TurnsAppended { .. } => "turns_appended",
            Self::FaqPanelChanged { .. } => "faq_panel_changed",
            Self::ReplyScheduled { .. } => "reply_scheduled",
            Self::ReplyDelivered { .. } => "reply_delivered",
            Self::ReplyCancelled { .. } => "reply_cancelled",
            Self::EscalationRequested { .. } => "escalation_requested",
            Self::Closed => "closed",
        }
    }
}
