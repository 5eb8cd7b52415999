use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use common::submission::SubmissionPoll;

/// Longest uninterrupted sleep between cancellation checks.
const CANCEL_CHECK: Duration = Duration::from_millis(50);

pub trait StatusSource {
    fn fetch(&self, id: i32) -> Result<SubmissionPoll>;
}

#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// Fixed wait between two polls.
    pub interval: Duration,
    /// Polls to make before giving up. At least one poll is always made.
    pub max_attempts: u32,
}

#[derive(Debug)]
pub enum PollOutcome {
    Resolved(SubmissionPoll),
    /// Budget exhausted while the submission was still pending.
    TimedOut {
        attempts: u32,
        last: SubmissionPoll,
    },
    Cancelled,
}

/// Poll until the submission leaves PENDING, the attempt budget runs out, or `cancel` is set.
///
/// Giving up only stops this loop; the submission keeps being judged server-side.
/// Request errors end the loop immediately.
pub fn poll_until_resolved(
    source: &dyn StatusSource,
    id: i32,
    policy: PollPolicy,
    cancel: &AtomicBool,
    mut on_progress: impl FnMut(&SubmissionPoll),
) -> Result<PollOutcome> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        if cancel.load(Ordering::SeqCst) {
            return Ok(PollOutcome::Cancelled);
        }

        attempt += 1;
        let current = source.fetch(id)?;
        if current.status.is_terminal() {
            return Ok(PollOutcome::Resolved(current));
        }
        on_progress(&current);

        if attempt >= max_attempts {
            return Ok(PollOutcome::TimedOut {
                attempts: attempt,
                last: current,
            });
        }

        if !sleep_unless_cancelled(policy.interval, cancel) {
            return Ok(PollOutcome::Cancelled);
        }
    }
}

/// Returns `false` if cancelled while sleeping.
fn sleep_unless_cancelled(total: Duration, cancel: &AtomicBool) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if cancel.load(Ordering::SeqCst) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(CANCEL_CHECK));
    }
}
