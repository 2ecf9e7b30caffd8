//! Manually driven reply scheduler.
//!
//! For hosts that run their own frame or event loop, and for deterministic
//! tests. Time only moves when [`ManualReplyScheduler::advance`] is called.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::conversation::ReplyToken;
use crate::domain::foundation::DomainError;
use crate::ports::{ReplyJob, ReplyScheduler};

struct QueuedReply {
    due: Duration,
    token: ReplyToken,
    job: ReplyJob,
}

#[derive(Default)]
struct Clock {
    elapsed: Duration,
    queue: Vec<QueuedReply>,
}

/// Queue of reply jobs released by explicit calls.
///
/// Jobs run outside the internal lock, in due order, ties in schedule order.
///
/// # Example
///
/// ```ignore
/// let scheduler = Arc::new(ManualReplyScheduler::new());
/// controller.submit_user_text("refund please")?;
/// scheduler.advance(Duration::from_millis(1000));
/// ```
#[derive(Default)]
pub struct ManualReplyScheduler {
    clock: Mutex<Clock>,
}

impl ManualReplyScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward and runs every job that is now due.
    ///
    /// Returns how many jobs ran. Cancelled jobs are dropped without running.
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let mut clock = self.lock();
            clock.elapsed = clock.elapsed.saturating_add(by);
            let now = clock.elapsed;
            let (due, waiting): (Vec<_>, Vec<_>) =
                clock.queue.drain(..).partition(|queued| queued.due <= now);
            clock.queue = waiting;
            due
        };
        Self::run(due)
    }

    /// Runs every queued job regardless of its delay.
    pub fn fire_all(&self) -> usize {
        let all = std::mem::take(&mut self.lock().queue);
        Self::run(all)
    }

    /// Number of queued jobs whose token is still live.
    pub fn pending_count(&self) -> usize {
        self.lock()
            .queue
            .iter()
            .filter(|queued| !queued.token.is_cancelled())
            .count()
    }

    /// Total simulated time passed so far.
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run(mut jobs: Vec<QueuedReply>) -> usize {
        // stable sort keeps schedule order for equal due times
        jobs.sort_by_key(|queued| queued.due);
        let mut ran = 0;
        for queued in jobs {
            if queued.token.is_cancelled() {
                tracing::debug!(reply_id = %queued.token.id(), "dropping cancelled reply");
                continue;
            }
            (queued.job)();
            ran += 1;
        }
        ran
    }
}

impl ReplyScheduler for ManualReplyScheduler {
    fn schedule(&self, delay: Duration, token: ReplyToken, job: ReplyJob) -> Result<(), DomainError> {
        let mut clock = self.lock();
        let due = clock.elapsed.saturating_add(delay);
        clock.queue.push(QueuedReply { due, token, job });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ManualReplyScheduler"
    }
}
