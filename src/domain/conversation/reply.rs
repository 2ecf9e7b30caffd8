//! Scheduled bot replies: tokens, status, and overlap policy.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::{ReplyId, StateMachine};

/// Cancellable handle for one scheduled bot reply.
///
/// Clones share cancellation: cancelling any clone cancels them all. The
/// conversation state keeps one clone, the scheduler another.
#[derive(Debug, Clone)]
pub struct ReplyToken {
    id: ReplyId,
    cancel: CancellationToken,
}

impl ReplyToken {
    /// Creates a token for a newly scheduled reply.
    pub fn new() -> Self {
        Self {
            id: ReplyId::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Returns the id of the reply this token guards.
    pub fn id(&self) -> ReplyId {
        self.id
    }

    /// Invalidates the reply. Firing it afterwards does nothing.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true once cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Completes when the token is cancelled.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }
}

impl Default for ReplyToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether any bot reply is waiting to be delivered.
///
/// Drives the typing indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    /// Nothing pending.
    #[default]
    Idle,
    /// At least one reply is waiting for its delay to elapse.
    Scheduled,
}

impl StateMachine for ReplyStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ReplyStatus::*;
        matches!(
            (self, target),
            (Idle, Scheduled) |
            // another submission while a reply is still pending
            (Scheduled, Scheduled) |
            // last pending reply fired or was cancelled
            (Scheduled, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ReplyStatus::*;
        match self {
            Idle => vec![Scheduled],
            Scheduled => vec![Scheduled, Idle],
        }
    }
}

/// What a new submission does to replies that are still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplyPolicy {
    /// Each submission gets its own reply; pending ones still fire.
    #[default]
    Concurrent,
    /// A new submission cancels pending replies before scheduling its own.
    Replace,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod reply_token {
        use super::*;

        #[test]
        fn new_tokens_have_distinct_ids() {
            assert_ne!(ReplyToken::new().id(), ReplyToken::new().id());
        }

        #[test]
        fn cancel_is_shared_between_clones() {
            let token = ReplyToken::new();
            let held_by_scheduler = token.clone();

            token.cancel();

            assert!(held_by_scheduler.is_cancelled());
            assert_eq!(held_by_scheduler.id(), token.id());
        }

        #[tokio::test]
        async fn cancelled_future_completes_after_cancel() {
            let token = ReplyToken::new();
            let waiter = token.clone();
            let handle = tokio::spawn(async move { waiter.cancelled().await });

            token.cancel();

            handle.await.unwrap();
        }
    }

    mod reply_status {
        use super::*;

        #[test]
        fn default_is_idle() {
            assert_eq!(ReplyStatus::default(), ReplyStatus::Idle);
        }

        #[test]
        fn idle_cannot_go_idle_again() {
            assert!(ReplyStatus::Idle.transition_to(ReplyStatus::Idle).is_err());
        }

        #[test]
        fn scheduled_may_schedule_again() {
            assert_eq!(
                ReplyStatus::Scheduled
                    .transition_to(ReplyStatus::Scheduled)
                    .unwrap(),
                ReplyStatus::Scheduled
            );
        }

        #[test]
        fn never_terminal() {
            assert!(!ReplyStatus::Idle.is_terminal());
            assert!(!ReplyStatus::Scheduled.is_terminal());
        }
    }

    mod reply_policy {
        use super::*;

        #[test]
        fn default_is_concurrent() {
            assert_eq!(ReplyPolicy::default(), ReplyPolicy::Concurrent);
        }

        #[test]
        fn deserializes_from_snake_case() {
            let policy: ReplyPolicy = serde_json::from_str("\"replace\"").unwrap();
            assert_eq!(policy, ReplyPolicy::Replace);
        }
    }
}
