//! Scheduling capability injected into controls and inputs.
//!
//! Nothing in this crate calls `tokio::time` directly for deferred work; it asks
//! a [`TimerService`] instead. [`TokioTimer`] is the production implementation,
//! [`ManualTimer`] a virtual clock driven by hand.

mod manual;
mod runtime;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub use manual::ManualTimer;
pub use runtime::TokioTimer;

/// Work to run when a timer fires.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Identifies a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__timer_{}", self.0)
    }
}

/// Schedules and cancels one-shot timers.
pub trait TimerService: Send + Sync {
    /// Run `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;

    /// Cancel a timer that has not fired yet.
    ///
    /// Returns `false` if the timer already fired or was already cancelled.
    fn cancel(&self, handle: TimerHandle) -> bool;
}
