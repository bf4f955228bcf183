//! Single-choice option group (radio buttons).

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::trace;

use crate::error::ControlError;
use crate::events::{Emitter, InputEvent, Listener};
use crate::timer::{TimerHandle, TimerService};
use crate::value::Value;

use super::{ChoiceOption, InputAdapter};

/// How long a blur waits for a following click before it is emitted.
const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(200);

#[derive(Debug, Default)]
struct OptionInner {
    options: Vec<ChoiceOption>,
    /// Checked state as of the last emitted `Change`.
    snapshot: Vec<bool>,
    focused: Option<usize>,
    /// Bumped by every blur and click; a blur timer only fires for its own.
    blur_generation: u64,
    /// Timer of the blur waiting out its grace period.
    pending_blur: Option<TimerHandle>,
}

impl OptionInner {
    fn index_of(&self, value: &str) -> Result<usize, ControlError> {
        self.options
            .iter()
            .position(|option| option.value == value)
            .ok_or_else(|| ControlError::option_not_found(value))
    }

    fn select(&mut self, value: &str) {
        for option in &mut self.options {
            option.checked = option.value == value;
        }
    }

    fn checked_states(&self) -> Vec<bool> {
        self.options.iter().map(|option| option.checked).collect()
    }
}

/// A group of options where at most one is selected.
///
/// The value is the selected option's value, or empty text when nothing is
/// selected. `Change` is only emitted when the checked states differ from the
/// last observed snapshot, so repeated clicks on the selected option are quiet.
///
/// A blur is held back for a short grace period and dropped if a click lands
/// in the meantime: clicking a label blurs the current option just before the
/// click arrives, and validating twice in quick succession is wasted work.
#[derive(Clone)]
pub struct OptionInput {
    inner: Arc<RwLock<OptionInner>>,
    events: Arc<Emitter<InputEvent>>,
    timer: Arc<dyn TimerService>,
    blur_grace: Duration,
}

impl OptionInput {
    /// Create a group from `options`.
    ///
    /// If several options are marked checked only the first stays checked.
    pub fn new(options: Vec<ChoiceOption>, timer: Arc<dyn TimerService>) -> Self {
        let mut inner = OptionInner {
            options,
            ..Default::default()
        };
        if let Some(first) = inner.options.iter().find(|o| o.checked).map(|o| o.value.clone()) {
            inner.select(&first);
        }
        inner.snapshot = inner.checked_states();

        Self {
            inner: Arc::new(RwLock::new(inner)),
            events: Arc::new(Emitter::new()),
            timer,
            blur_grace: DEFAULT_BLUR_GRACE,
        }
    }

    /// Set how long a blur waits for a following click.
    pub fn with_blur_grace(mut self, grace: Duration) -> Self {
        self.blur_grace = grace;
        self
    }

    /// Get all options with their current state.
    pub fn options(&self) -> Vec<ChoiceOption> {
        self.inner
            .read()
            .map(|guard| guard.options.clone())
            .unwrap_or_default()
    }

    /// Check whether the option with `value` is the selected one.
    pub fn is_selected(&self, value: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.options.iter().any(|o| o.checked && o.value == value))
            .unwrap_or(false)
    }

    /// Get the value of the option holding focus.
    pub fn focused_option(&self) -> Option<String> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .focused
                .and_then(|index| guard.options.get(index))
                .map(|option| option.value.clone())
        })
    }

    /// Check whether a single option is disabled.
    pub fn is_option_disabled(&self, value: &str) -> Result<bool, ControlError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| ControlError::option_not_found(value))?;
        let index = guard.index_of(value)?;
        Ok(guard.options[index].disabled)
    }

    /// Enable or disable a single option.
    pub fn set_option_disabled(&self, value: &str, disabled: bool) -> Result<(), ControlError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| ControlError::option_not_found(value))?;
        let index = guard.index_of(value)?;
        guard.options[index].disabled = disabled;
        Ok(())
    }

    /// Click the option with `value`: select it and emit `Click`, then `Change`
    /// if the selection moved.
    ///
    /// Clicking a disabled option does nothing.
    pub fn click(&self, value: &str) -> Result<(), ControlError> {
        let (changed, pending_blur) = {
            let mut guard = self
                .inner
                .write()
                .map_err(|_| ControlError::option_not_found(value))?;
            let index = guard.index_of(value)?;
            if guard.options[index].disabled {
                return Ok(());
            }

            guard.blur_generation += 1;
            guard.focused = Some(index);
            guard.select(value);

            let current = guard.checked_states();
            let changed = current != guard.snapshot;
            guard.snapshot = current;
            (changed, guard.pending_blur.take())
        };

        if let Some(handle) = pending_blur {
            self.timer.cancel(handle);
            trace!("Blur suppressed by click");
        }

        self.events.emit(InputEvent::Click);
        if changed {
            self.events.emit(InputEvent::Change);
        }
        Ok(())
    }

    /// Leave the group. `Blur` is emitted after the grace period unless a click
    /// arrives first. A later blur replaces one still waiting.
    pub fn blur(&self) {
        let Ok((generation, previous)) = self.inner.write().map(|mut guard| {
            guard.focused = None;
            guard.blur_generation += 1;
            (guard.blur_generation, guard.pending_blur.take())
        }) else {
            return;
        };
        if let Some(handle) = previous {
            self.timer.cancel(handle);
        }

        let inner = Arc::clone(&self.inner);
        let events = Arc::clone(&self.events);
        let handle = self.timer.schedule(
            self.blur_grace,
            Box::new(move || {
                let current = inner
                    .write()
                    .map(|mut guard| {
                        if guard.blur_generation == generation {
                            guard.pending_blur = None;
                            true
                        } else {
                            false
                        }
                    })
                    .unwrap_or(false);
                if current {
                    events.emit(InputEvent::Blur);
                } else {
                    trace!("Blur superseded");
                }
            }),
        );

        if let Ok(mut guard) = self.inner.write()
            && guard.blur_generation == generation
        {
            guard.pending_blur = Some(handle);
        }
    }
}

impl InputAdapter for OptionInput {
    fn value(&self) -> Value {
        let selected = self.inner.read().ok().and_then(|guard| {
            guard
                .options
                .iter()
                .find(|option| option.checked)
                .map(|option| option.value.clone())
        });
        Value::Text(selected.unwrap_or_default())
    }

    fn set_value(&self, value: Value) {
        if let Ok(mut guard) = self.inner.write() {
            guard.select(&value.to_string());
            guard.snapshot = guard.checked_states();
        }
    }

    fn focus(&self) {
        if let Ok(mut guard) = self.inner.write()
            && !guard.options.is_empty()
        {
            let checked = guard.options.iter().position(|option| option.checked);
            guard.focused = Some(checked.unwrap_or(0));
        }
    }

    fn is_focused(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.focused.is_some())
            .unwrap_or(false)
    }

    /// True when every option is disabled.
    fn is_disabled(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.options.iter().all(|option| option.disabled))
            .unwrap_or(false)
    }

    fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            for option in &mut guard.options {
                option.disabled = disabled;
            }
        }
    }

    fn on_event(&self, listener: Listener<InputEvent>) {
        self.events.add_listener(listener);
    }
}

impl fmt::Debug for OptionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionInput")
            .field("inner", &self.inner)
            .field("blur_grace", &self.blur_grace)
            .finish()
    }
}
