//! Timers backed by the Tokio runtime.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;
use tokio_util::sync::CancellationToken;

use super::{TimerHandle, TimerService, TimerTask};

/// Timer service that spawns one Tokio task per scheduled timer.
///
/// Must be used from within a Tokio runtime. Cheap to clone; clones share the
/// set of pending timers.
#[derive(Clone, Default)]
pub struct TokioTimer {
    pending: Arc<Mutex<HashMap<TimerHandle, CancellationToken>>>,
}

impl TokioTimer {
    /// Create a timer service with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers scheduled but not yet fired or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl TimerService for TokioTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle::next();
        let token = CancellationToken::new();

        if let Ok(mut guard) = self.pending.lock() {
            guard.insert(handle, token.clone());
        }

        let pending = Arc::clone(&self.pending);
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!("Timer {} cancelled", handle);
                }
                _ = tokio::time::sleep(delay) => {
                    // A cancel that raced the sleep has already removed the entry.
                    let live = pending
                        .lock()
                        .map(|mut guard| guard.remove(&handle).is_some())
                        .unwrap_or(false);
                    if live {
                        trace!("Timer {} fired after {:?}", handle, delay);
                        task();
                    }
                }
            }
        });

        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let token = self
            .pending
            .lock()
            .ok()
            .and_then(|mut guard| guard.remove(&handle));

        match token {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for TokioTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioTimer")
            .field("pending", &self.pending())
            .finish()
    }
}
