//! Multiple-choice option group (checkboxes).

use std::sync::{Arc, RwLock};

use crate::error::ControlError;
use crate::events::{Emitter, InputEvent, Listener};
use crate::value::Value;

use super::{ChoiceOption, InputAdapter};

#[derive(Debug, Default)]
struct MultiInner {
    options: Vec<ChoiceOption>,
    focused: Option<usize>,
}

impl MultiInner {
    fn index_of(&self, value: &str) -> Result<usize, ControlError> {
        self.options
            .iter()
            .position(|option| option.value == value)
            .ok_or_else(|| ControlError::option_not_found(value))
    }
}

/// A group of options where any number may be selected.
///
/// The value is a [`Value::List`] of the selected option values, in option
/// order.
#[derive(Debug, Clone, Default)]
pub struct MultiOptionInput {
    inner: Arc<RwLock<MultiInner>>,
    events: Arc<Emitter<InputEvent>>,
}

impl MultiOptionInput {
    /// Create a group from `options`.
    pub fn new(options: Vec<ChoiceOption>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MultiInner {
                options,
                focused: None,
            })),
            events: Arc::new(Emitter::new()),
        }
    }

    /// Get all options with their current state.
    pub fn options(&self) -> Vec<ChoiceOption> {
        self.inner
            .read()
            .map(|guard| guard.options.clone())
            .unwrap_or_default()
    }

    /// Check whether the option with `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.inner
            .read()
            .map(|guard| guard.options.iter().any(|o| o.checked && o.value == value))
            .unwrap_or(false)
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

    /// Click the option with `value`: flip it and emit `Click` then `Change`.
    ///
    /// Clicking a disabled option does nothing.
    pub fn toggle(&self, value: &str) -> Result<(), ControlError> {
        {
            let mut guard = self
                .inner
                .write()
                .map_err(|_| ControlError::option_not_found(value))?;
            let index = guard.index_of(value)?;
            if guard.options[index].disabled {
                return Ok(());
            }
            guard.options[index].checked = !guard.options[index].checked;
            guard.focused = Some(index);
        }

        self.events.emit(InputEvent::Click);
        self.events.emit(InputEvent::Change);
        Ok(())
    }

    /// Leave the group and emit `Blur`.
    pub fn blur(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.focused = None;
        }
        self.events.emit(InputEvent::Blur);
    }
}

impl InputAdapter for MultiOptionInput {
    fn value(&self) -> Value {
        let selected: Vec<String> = self
            .inner
            .read()
            .map(|guard| {
                guard
                    .options
                    .iter()
                    .filter(|option| option.checked)
                    .map(|option| option.value.clone())
                    .collect()
            })
            .unwrap_or_default();
        Value::List(selected)
    }

    fn set_value(&self, value: Value) {
        if let Ok(mut guard) = self.inner.write() {
            for option in &mut guard.options {
                option.checked = match &value {
                    Value::List(items) => items.contains(&option.value),
                    Value::Text(text) => !text.is_empty() && *text == option.value,
                };
            }
        }
    }

    fn clear(&self) {
        self.set_value(Value::List(Vec::new()));
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
