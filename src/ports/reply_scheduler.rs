//! ReplyScheduler port - Interface for running a bot reply after a delay.
//!
//! The conversation controller decides *what* the reply is and *when* it is
//! due; the scheduler only decides how waiting happens (a tokio timer, a host
//! UI loop, a test driving time by hand).

use std::time::Duration;

use crate::domain::conversation::ReplyToken;
use crate::domain::foundation::DomainError;

/// Work to run once the delay has elapsed.
pub type ReplyJob = Box<dyn FnOnce() + Send + 'static>;

/// Port for deferring bot replies.
///
/// Implementations must ensure:
/// - `job` runs at most once, and not before `delay` has elapsed
/// - `job` never runs if `token` was cancelled before the delay elapsed
/// - `schedule` returns without waiting for the delay
///
/// Jobs re-check their token under the conversation lock, so a job that
/// races a cancellation is still harmless.
pub trait ReplyScheduler: Send + Sync {
    /// Schedule `job` to run after `delay` unless `token` is cancelled first.
    ///
    /// # Errors
    ///
    /// - `SchedulerUnavailable` if the scheduler cannot accept work
    fn schedule(&self, delay: Duration, token: ReplyToken, job: ReplyJob) -> Result<(), DomainError>;

    /// Scheduler name for logging.
    fn name(&self) -> &'static str;
}
