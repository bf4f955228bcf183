//! The validation coordinator.
//!
//! A [`Control`] owns the validation state of one form field. Triggers from the
//! input pass through a [`Debouncer`], and each run reads the input, awaits the
//! filter, awaits the validator, updates the display and emits the outcome.
//!
//! At most one run is in flight per control. Triggers and `validate()` calls
//! that arrive meanwhile are dropped, not queued, so edits made during a run
//! need a later trigger to be validated. A run that has started cannot be
//! cancelled and always applies its result, even if `clear()` was called in
//! between.

mod builder;
mod handle;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, error, trace};
use tokio::sync::mpsc;

use crate::debounce::{DebounceState, Debouncer};
use crate::display::{DisplayAdapter, DisplayState, MessageKind};
use crate::error::ControlError;
use crate::events::{ControlEvent, Emitter, InputEvent};
use crate::input::InputAdapter;
use crate::pipeline::{Filter, Validator};
use crate::value::Value;

pub use builder::ControlBuilder;
pub use handle::ValidationHandle;

/// Last computed validation outcome of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Validity {
    /// No run has completed since creation or the last `clear()`.
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl Validity {
    /// True only for `Valid`.
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }

    /// True unless `Unknown`.
    pub fn is_known(self) -> bool {
        self != Validity::Unknown
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }
}

/// Result of a completed validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the filtered value passed.
    pub valid: bool,
    /// The filtered value that was validated.
    pub value: Value,
    /// The raw value read from the input when the run started.
    pub raw: Value,
    /// The error message shown, for failed runs.
    pub message: Option<String>,
}

pub(crate) struct ControlInner {
    name: String,
    input: Arc<dyn InputAdapter>,
    display: Arc<dyn DisplayAdapter>,
    filter: Arc<dyn Filter>,
    validator: Arc<dyn Validator>,
    debouncer: Debouncer,
    triggers: Vec<InputEvent>,
    validity: RwLock<Validity>,
    /// Held true from the start of a run until its outcome is delivered.
    validating: AtomicBool,
    events: Emitter<ControlEvent>,
}

impl ControlInner {
    fn set_validity(&self, validity: Validity) {
        if let Ok(mut guard) = self.validity.write() {
            *guard = validity;
        }
    }
}

/// Clears the `validating` flag when a run ends, however it ends.
struct RunGuard {
    inner: Arc<ControlInner>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.inner.validating.store(false, Ordering::SeqCst);
    }
}

/// Validation coordinator for a single form field.
///
/// Cheap to clone; clones share state. Validation runs are spawned onto the
/// current Tokio runtime, so `validate()` and triggering input events must
/// happen inside one.
///
/// `validating` is cleared before the `Validate` event is emitted, so a
/// listener may start the next run from the event. Outcome events are
/// delivered in run order on a `current_thread` runtime; on a multi-thread
/// runtime a run started from another thread in that gap may emit first.
#[derive(Clone)]
pub struct Control {
    inner: Arc<ControlInner>,
}

impl Control {
    /// Start building a control named `name`.
    pub fn builder(name: impl Into<String>) -> ControlBuilder {
        ControlBuilder::new(name)
    }

    /// Subscribe to the input's events. Holds the control weakly.
    fn bind_input(&self) {
        let weak = Arc::downgrade(&self.inner);
        self.inner.input.on_event(Arc::new(move |event: &InputEvent| {
            if let Some(inner) = weak.upgrade() {
                Control { inner }.on_input_event(*event);
            }
        }));
    }

    fn on_input_event(&self, event: InputEvent) {
        if self.inner.triggers.contains(&event) {
            trace!("Control '{}' triggered by {}", self.inner.name, event);
            self.trigger();
        }

        match event {
            InputEvent::Change => self.inner.events.emit(ControlEvent::Change),
            InputEvent::Click => self.inner.events.emit(ControlEvent::Click),
            InputEvent::Blur => {}
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the control name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the current input value.
    pub fn value(&self) -> Value {
        self.inner.input.value()
    }

    /// Get the last computed outcome. Never starts a run.
    pub fn validity(&self) -> Validity {
        self.inner
            .validity
            .read()
            .map(|guard| *guard)
            .unwrap_or_default()
    }

    /// Check whether the last computed outcome was `Valid`.
    pub fn is_valid(&self) -> bool {
        self.validity().is_valid()
    }

    /// Check whether a run is in flight.
    pub fn is_validating(&self) -> bool {
        self.inner.validating.load(Ordering::SeqCst)
    }

    /// Whether a debounced run is waiting to fire.
    pub fn debounce_state(&self) -> DebounceState {
        self.inner.debouncer.state()
    }

    /// Events that trigger validation.
    pub fn triggers(&self) -> &[InputEvent] {
        &self.inner.triggers
    }

    /// The bound input.
    pub fn input(&self) -> &Arc<dyn InputAdapter> {
        &self.inner.input
    }

    /// The bound display.
    pub fn display(&self) -> &Arc<dyn DisplayAdapter> {
        &self.inner.display
    }

    /// Check whether the input is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.input.is_disabled()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Set the input value. Does not validate.
    pub fn set_value(&self, value: impl Into<Value>) -> &Self {
        self.inner.input.set_value(value.into());
        self
    }

    /// Enable or disable the input.
    pub fn set_disabled(&self, disabled: bool) -> &Self {
        self.inner.input.set_disabled(disabled);
        self
    }

    /// Focus the input.
    pub fn focus(&self) -> &Self {
        self.inner.input.focus();
        self
    }

    /// Forget the outcome, empty the input and reset the display.
    ///
    /// A run already in flight is not affected and still applies its result
    /// when it completes.
    pub fn clear(&self) -> &Self {
        self.inner.set_validity(Validity::Unknown);
        self.inner.input.clear();
        self.inner.display.reset();
        self
    }

    /// Apply a plugin.
    pub fn use_plugin<F>(&self, plugin: F) -> &Self
    where
        F: FnOnce(&Control),
    {
        plugin(self);
        self
    }

    /// Cancel a pending debounced run. Runs already in flight continue.
    pub fn dispose(&self) {
        if self.inner.debouncer.cancel() {
            debug!("Control '{}' disposed with a pending run", self.inner.name);
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Register a callback for every control event.
    pub fn on<F>(&self, listener: F) -> &Self
    where
        F: Fn(&ControlEvent) + Send + Sync + 'static,
    {
        self.inner.events.on(listener);
        self
    }

    /// Subscribe to control events.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ControlEvent> {
        self.inner.events.subscribe()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Handle a trigger from the input.
    ///
    /// Dropped while a run is in flight. Otherwise validates immediately, or
    /// (re)arms the debounce timer when a delay is configured.
    pub fn trigger(&self) {
        if self.is_validating() {
            trace!("Control '{}' is validating, trigger dropped", self.inner.name);
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        self.inner.debouncer.trigger(move || {
            if let Some(inner) = weak.upgrade() {
                // Fire and forget; the outcome is delivered as an event.
                drop(Control { inner }.validate());
            }
        });
    }

    /// Start a validation run.
    ///
    /// The reentrancy check and the input read happen before this returns;
    /// the filter and validator run on a spawned task. Returns a skipped handle
    /// if a run is already in flight.
    pub fn validate(&self) -> ValidationHandle {
        let inner = &self.inner;
        if inner
            .validating
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Control '{}' is already validating, skipping", inner.name);
            return ValidationHandle::skipped(inner.name.clone());
        }

        let guard = RunGuard {
            inner: Arc::clone(inner),
        };
        let raw = inner.input.value();
        debug!("Validating control '{}'", inner.name);

        let control = self.clone();
        let task = tokio::spawn(async move { control.run(raw, guard).await });
        ValidationHandle::running(inner.name.clone(), task)
    }

    async fn run(self, raw: Value, guard: RunGuard) -> Result<Validation, ControlError> {
        let inner = &self.inner;

        let filtered = inner.filter.filter(raw.clone()).await;
        let verdict = match inner.validator.validate(&filtered).await {
            Ok(verdict) => verdict,
            Err(source) => {
                error!("Validator of control '{}' failed: {}", inner.name, source);
                drop(guard);
                inner.events.emit(ControlEvent::Failed {
                    error: source.clone(),
                    control: self.clone(),
                });
                return Err(ControlError::Pipeline {
                    name: inner.name.clone(),
                    source,
                });
            }
        };

        let valid = verdict.valid;
        inner.set_validity(Validity::from(valid));
        inner.display.set_state(DisplayState::from(valid));

        let message = if valid {
            // Only error messages belong to validation; leave others alone.
            let showing_error = inner
                .display
                .message()
                .is_some_and(|message| message.kind == MessageKind::Error);
            if showing_error {
                inner.display.hide_message().await;
                inner.display.clear_message();
            }
            None
        } else {
            let message = verdict.message(&raw);
            inner
                .display
                .set_message(MessageKind::Error, message.clone());
            inner.display.show_message().await;
            Some(message)
        };

        drop(guard);
        debug!(
            "Control '{}' validated: {}",
            inner.name,
            if valid { "valid" } else { "invalid" }
        );
        inner.events.emit(ControlEvent::Validate {
            valid,
            value: filtered.clone(),
            control: self.clone(),
        });

        Ok(Validation {
            valid,
            value: filtered,
            raw,
            message,
        })
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("name", &self.inner.name)
            .field("validity", &self.validity())
            .field("validating", &self.is_validating())
            .field("debounce", &self.inner.debouncer)
            .finish()
    }
}
