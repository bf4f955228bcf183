//! Virtual clock for deterministic scheduling.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{TimerHandle, TimerService, TimerTask};

struct Entry {
    handle: TimerHandle,
    deadline: Duration,
    task: TimerTask,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    entries: Vec<Entry>,
}

/// Timer service whose clock only moves when [`ManualTimer::advance`] is called.
///
/// Time starts at zero. Cheap to clone; clones share the clock.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::time::Duration;
/// use fieldctl::timer::{ManualTimer, TimerService};
///
/// let timer = ManualTimer::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
/// timer.schedule(Duration::from_millis(300), Box::new(move || flag.store(true, Ordering::SeqCst)));
///
/// timer.advance(Duration::from_millis(299));
/// assert!(!fired.load(Ordering::SeqCst));
/// timer.advance(Duration::from_millis(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Arc<Mutex<Clock>>,
}

impl ManualTimer {
    /// Create a clock at time zero with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.clock
            .lock()
            .map(|guard| guard.now)
            .unwrap_or_default()
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.clock
            .lock()
            .map(|guard| guard.entries.len())
            .unwrap_or(0)
    }

    /// Deadline of the next timer to fire.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.clock
            .lock()
            .ok()
            .and_then(|guard| guard.entries.iter().map(|e| e.deadline).min())
    }

    /// Move the clock forward, firing every timer that falls due on the way.
    ///
    /// Timers fire in deadline order (ties in scheduling order) with the clock
    /// set to their deadline, so work they schedule is measured from there and
    /// fires within the same call if it falls due. Tasks run with no lock held.
    /// Returns the number of timers fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        let mut fired = 0;

        loop {
            let task = {
                let Ok(mut clock) = self.clock.lock() else {
                    break;
                };
                let next = clock
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline <= target)
                    .min_by_key(|(_, entry)| (entry.deadline, entry.handle))
                    .map(|(index, _)| index);

                match next {
                    Some(index) => {
                        let entry = clock.entries.remove(index);
                        clock.now = entry.deadline;
                        entry.task
                    }
                    None => {
                        clock.now = target;
                        break;
                    }
                }
            };

            task();
            fired += 1;
        }

        fired
    }
}

impl TimerService for ManualTimer {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle::next();
        if let Ok(mut clock) = self.clock.lock() {
            let deadline = clock.now + delay;
            clock.entries.push(Entry {
                handle,
                deadline,
                task,
            });
        }
        handle
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let Ok(mut clock) = self.clock.lock() else {
            return false;
        };
        let before = clock.entries.len();
        clock.entries.retain(|entry| entry.handle != handle);
        clock.entries.len() != before
    }
}

impl fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimer")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}
