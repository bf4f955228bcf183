//! Trigger debouncing.
//!
//! A [`Debouncer`] turns a stream of triggers into at most one call per quiet
//! window. Each trigger cancels the pending timer and arms a fresh one, so the
//! call happens `delay` after the *last* trigger of a burst.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;

use crate::timer::{TimerHandle, TimerService};

/// Whether a debounced call is waiting to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer pending.
    Idle,
    /// A timer is pending.
    Armed,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    generation: u64,
    handle: TimerHandle,
}

/// Collapses bursts of triggers into a single deferred call.
///
/// With no delay (or a zero delay) every trigger calls through immediately.
/// Dropping the debouncer cancels any pending timer without firing it.
pub struct Debouncer {
    delay: Option<Duration>,
    timer: Arc<dyn TimerService>,
    pending: Arc<Mutex<Option<Pending>>>,
    generation: AtomicU64,
}

impl Debouncer {
    /// Create a debouncer scheduling on `timer`.
    ///
    /// `timer` must not run tasks from inside `schedule`.
    pub fn new(delay: Option<Duration>, timer: Arc<dyn TimerService>) -> Self {
        Self {
            delay: delay.filter(|delay| !delay.is_zero()),
            timer,
            pending: Arc::new(Mutex::new(None)),
            generation: AtomicU64::new(0),
        }
    }

    /// The debounce window, if any.
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Whether a call is pending.
    pub fn state(&self) -> DebounceState {
        let armed = self
            .pending
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        if armed {
            DebounceState::Armed
        } else {
            DebounceState::Idle
        }
    }

    /// Register a trigger.
    ///
    /// Without a delay `fire` runs before this returns. Otherwise any pending
    /// call is cancelled and `fire` is scheduled `delay` from now. Returns the
    /// resulting state.
    pub fn trigger<F>(&self, fire: F) -> DebounceState
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(delay) = self.delay else {
            fire();
            return DebounceState::Idle;
        };

        let Ok(mut pending) = self.pending.lock() else {
            return DebounceState::Idle;
        };

        if let Some(previous) = pending.take() {
            self.timer.cancel(previous.handle);
            trace!("Debounce timer {} replaced", previous.handle);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let slot = Arc::clone(&self.pending);
        let handle = self.timer.schedule(
            delay,
            Box::new(move || {
                // Only the timer that currently owns the slot may fire.
                let current = slot
                    .lock()
                    .map(|mut guard| {
                        if guard.is_some_and(|p| p.generation == generation) {
                            *guard = None;
                            true
                        } else {
                            false
                        }
                    })
                    .unwrap_or(false);
                if current {
                    fire();
                }
            }),
        );

        *pending = Some(Pending { generation, handle });
        DebounceState::Armed
    }

    /// Cancel the pending call without firing it.
    ///
    /// Returns `true` if a call was pending.
    pub fn cancel(&self) -> bool {
        let previous = self
            .pending
            .lock()
            .ok()
            .and_then(|mut guard| guard.take());

        match previous {
            Some(previous) => {
                self.timer.cancel(previous.handle);
                trace!("Debounce timer {} cancelled", previous.handle);
                true
            }
            None => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("state", &self.state())
            .finish()
    }
}
