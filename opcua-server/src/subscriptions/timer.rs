//! C6: per-subscription periodic wake-ups with guaranteed, immediate
//! cancellation. A naive port would use a lambda capturing its subscription
//! cyclically through a timer handle; this adapter is deliberately the only
//! thing that knows how to sleep, so ownership of the subscription stays with
//! whoever spawns the task (see `InternalSubscription::start`).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::Notify;

/// A sleep that can be interrupted by `cancel()` instead of waiting out the
/// rest of the interval. Once cancelled, every subsequent `sleep_until` call
/// returns immediately without sleeping.
#[derive(Debug, Default)]
pub struct CancellableTimer {
    cancel: Notify,
    cancelled: AtomicBool,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps until `deadline`, or until cancelled. Returns `false` if the
    /// timer was cancelled (whether before or during the sleep); the caller
    /// must not tick again after a `false` result.
    pub async fn sleep_until(&self, deadline: Instant) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep_until(deadline.into()) => {}
            _ = self.cancel.notified() => {}
        }
        !self.cancelled.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
        self.cancel.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Computes the next absolute wake-up, stepping forward by whole intervals
/// from `previous` rather than from `now`, so a slow tick doesn't push every
/// later one back by the same amount (absolute scheduling, to avoid drift
/// under load).
pub fn next_deadline(previous: Instant, interval: Duration) -> Instant {
    let mut next = previous + interval;
    let now = Instant::now();
    if next < now {
        // We fell behind by more than one interval (e.g. a very slow tick or
        // a suspended process); resync to `now` rather than firing a burst
        // of catch-up ticks.
        next = now + interval;
    }
    next
}
