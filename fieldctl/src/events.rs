//! Per-instance event registration.
//!
//! Every input, display and control owns its own [`Emitter`]. Listeners are
//! plain callbacks; [`Emitter::subscribe`] additionally hands out a channel for
//! async consumers.

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::control::Control;
use crate::error::PipelineError;
use crate::value::Value;

/// A registered event callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Typed event registry owned by a single component.
pub struct Emitter<E> {
    listeners: RwLock<Vec<Listener<E>>>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<E>>>,
}

impl<E: Clone + Send + 'static> Emitter<E> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Register a callback invoked for every emitted event.
    pub fn on<F>(&self, listener: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.add_listener(Arc::new(listener));
    }

    /// Register an already shared callback.
    pub fn add_listener(&self, listener: Listener<E>) {
        if let Ok(mut guard) = self.listeners.write() {
            guard.push(listener);
        }
    }

    /// Open a channel that receives a copy of every event emitted from now on.
    ///
    /// The subscription ends when the receiver is dropped.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut guard) = self.subscribers.lock() {
            guard.push(tx);
        }
        rx
    }

    /// Deliver an event to every listener, then to every live subscriber.
    ///
    /// Listeners run without any lock held, so they may register further
    /// listeners or emit on other emitters.
    pub fn emit(&self, event: E) {
        let listeners = self
            .listeners
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default();

        for listener in &listeners {
            listener(&event);
        }

        if let Ok(mut guard) = self.subscribers.lock() {
            guard.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }

    /// Number of registered callbacks (subscribers not included).
    pub fn listener_count(&self) -> usize {
        self.listeners.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl<E: Clone + Send + 'static> Default for Emitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read().map(|g| g.len()).unwrap_or(0);
        let subscribers = self.subscribers.lock().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("Emitter")
            .field("listeners", &listeners)
            .field("subscribers", &subscribers)
            .finish()
    }
}

/// Events emitted by an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputEvent {
    /// The input lost focus.
    Blur,
    /// The input (or one of its options) was clicked.
    Click,
    /// The value changed.
    Change,
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputEvent::Blur => "blur",
            InputEvent::Click => "click",
            InputEvent::Change => "change",
        };
        f.write_str(name)
    }
}

/// Events emitted by a control.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// The input value changed.
    Change,
    /// The input was clicked.
    Click,
    /// A validation run completed.
    Validate {
        /// Whether the filtered value passed validation.
        valid: bool,
        /// The filtered value that was validated.
        value: Value,
        /// The control that ran the validation.
        control: Control,
    },
    /// The validator pipeline failed; the value was neither accepted nor rejected.
    Failed {
        /// The pipeline failure.
        error: PipelineError,
        /// The control that ran the validation.
        control: Control,
    },
}

impl ControlEvent {
    /// Check if this is a completed validation outcome.
    pub fn is_validate(&self) -> bool {
        matches!(self, ControlEvent::Validate { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_listeners_receive_events_in_registration_order() {
        let emitter: Emitter<InputEvent> = Emitter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            emitter.on(move |event| seen.lock().unwrap().push(format!("{tag}:{event}")));
        }
        emitter.emit(InputEvent::Blur);

        assert_eq!(*seen.lock().unwrap(), vec!["first:blur", "second:blur"]);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let emitter: Emitter<InputEvent> = Emitter::new();
        let rx = emitter.subscribe();
        drop(rx);
        emitter.emit(InputEvent::Change);
        assert_eq!(emitter.subscribers.lock().unwrap().len(), 0);
    }

    #[test]
    fn test_listener_may_register_listener() {
        let emitter: Arc<Emitter<InputEvent>> = Arc::new(Emitter::new());
        let count = Arc::new(AtomicUsize::new(0));
        {
            let inner = Arc::clone(&emitter);
            let count = Arc::clone(&count);
            emitter.on(move |_| {
                let count = Arc::clone(&count);
                inner.on(move |_| {
                    count.fetch_add(1, Ordering::SeqCst);
                });
            });
        }
        emitter.emit(InputEvent::Click);
        emitter.emit(InputEvent::Click);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(emitter.listener_count(), 3);
    }
}
