//! Tokio-backed reply scheduler.
//!
//! Each reply gets its own task that races the typing delay against the
//! reply's cancellation token.

use std::time::Duration;

use tokio::runtime::Handle;

use crate::domain::conversation::ReplyToken;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{ReplyJob, ReplyScheduler};

/// Runs reply jobs on a tokio runtime after `tokio::time::sleep`.
#[derive(Debug, Clone)]
pub struct TokioReplyScheduler {
    handle: Handle,
}

impl TokioReplyScheduler {
    /// Creates a scheduler that spawns onto the given runtime.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates a scheduler for the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// - `SchedulerUnavailable` if called outside a tokio runtime
    pub fn from_current() -> Result<Self, DomainError> {
        let handle = Handle::try_current().map_err(|e| {
            DomainError::new(
                ErrorCode::SchedulerUnavailable,
                format!("No tokio runtime available: {}", e),
            )
        })?;
        Ok(Self::new(handle))
    }
}

impl ReplyScheduler for TokioReplyScheduler {
    fn schedule(&self, delay: Duration, token: ReplyToken, job: ReplyJob) -> Result<(), DomainError> {
        let reply_id = token.id();
        self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(%reply_id, "reply cancelled before its delay elapsed");
                }
                _ = tokio::time::sleep(delay) => {
                    job();
                }
            }
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TokioReplyScheduler"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_job(counter: &Arc<AtomicUsize>) -> ReplyJob {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn runs_job_after_delay() {
        let scheduler = TokioReplyScheduler::from_current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        scheduler
            .schedule(Duration::from_millis(1000), ReplyToken::new(), counting_job(&fired))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_prevents_job() {
        let scheduler = TokioReplyScheduler::from_current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let token = ReplyToken::new();

        scheduler
            .schedule(Duration::from_millis(1000), token.clone(), counting_job(&fired))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        token.cancel();
        tokio::time::sleep(Duration::from_millis(2000)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn token_cancelled_up_front_never_fires() {
        let scheduler = TokioReplyScheduler::from_current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));
        let token = ReplyToken::new();
        token.cancel();

        scheduler
            .schedule(Duration::ZERO, token, counting_job(&fired))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn from_current_outside_runtime_is_unavailable() {
        let err = TokioReplyScheduler::from_current().unwrap_err();
        assert_eq!(err.code, ErrorCode::SchedulerUnavailable);
    }
}
