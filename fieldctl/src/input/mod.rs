//! Input adapters.
//!
//! An input exposes its current [`Value`], accepts a new one, and emits
//! [`InputEvent`]s. Controls only talk to inputs through [`InputAdapter`]; the
//! [`Input`] enum closes over the built-in kinds.

mod multi;
mod option;
mod text;

use std::sync::Arc;

use serde::Deserialize;

use crate::events::{InputEvent, Listener};
use crate::timer::TimerService;
use crate::value::Value;

pub use multi::MultiOptionInput;
pub use option::OptionInput;
pub use text::TextInput;

/// Uniform capability interface over input kinds.
pub trait InputAdapter: Send + Sync {
    /// Get the current value.
    fn value(&self) -> Value;

    /// Replace the current value. Does not emit `Change`.
    fn set_value(&self, value: Value);

    /// Reset to the empty value of this input kind.
    fn clear(&self) {
        self.set_value(Value::empty());
    }

    /// Move focus to the input.
    fn focus(&self);

    /// Check whether the input has focus.
    fn is_focused(&self) -> bool;

    /// Check whether the input is disabled.
    fn is_disabled(&self) -> bool;

    /// Enable or disable the input.
    fn set_disabled(&self, disabled: bool);

    /// Register a callback for every event this input emits.
    fn on_event(&self, listener: Listener<InputEvent>);
}

/// The built-in input kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    /// Free text.
    #[default]
    Text,
    /// A group of options, at most one selected.
    Option,
    /// A group of options, any number selected.
    MultiOption,
}

/// One option of a choice input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Initially checked.
    #[serde(default)]
    pub checked: bool,
    /// Initially disabled.
    #[serde(default)]
    pub disabled: bool,
}

impl ChoiceOption {
    /// Create an unchecked, enabled option labelled with its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            checked: false,
            disabled: false,
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Mark as checked.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Mark as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// One of the built-in inputs.
#[derive(Debug, Clone)]
pub enum Input {
    Text(TextInput),
    Option(OptionInput),
    MultiOption(MultiOptionInput),
}

impl Input {
    /// Build the input for `kind`.
    ///
    /// `choices` is ignored for text inputs. `timer` drives the option input's
    /// blur grace period.
    pub fn new(kind: InputKind, choices: Vec<ChoiceOption>, timer: Arc<dyn TimerService>) -> Self {
        match kind {
            InputKind::Text => Input::Text(TextInput::new()),
            InputKind::Option => Input::Option(OptionInput::new(choices, timer)),
            InputKind::MultiOption => Input::MultiOption(MultiOptionInput::new(choices)),
        }
    }

    /// The kind tag of this input.
    pub fn kind(&self) -> InputKind {
        match self {
            Input::Text(_) => InputKind::Text,
            Input::Option(_) => InputKind::Option,
            Input::MultiOption(_) => InputKind::MultiOption,
        }
    }

    fn adapter(&self) -> &dyn InputAdapter {
        match self {
            Input::Text(input) => input,
            Input::Option(input) => input,
            Input::MultiOption(input) => input,
        }
    }
}

impl InputAdapter for Input {
    fn value(&self) -> Value {
        self.adapter().value()
    }

    fn set_value(&self, value: Value) {
        self.adapter().set_value(value)
    }

    fn clear(&self) {
        self.adapter().clear()
    }

    fn focus(&self) {
        self.adapter().focus()
    }

    fn is_focused(&self) -> bool {
        self.adapter().is_focused()
    }

    fn is_disabled(&self) -> bool {
        self.adapter().is_disabled()
    }

    fn set_disabled(&self, disabled: bool) {
        self.adapter().set_disabled(disabled)
    }

    fn on_event(&self, listener: Listener<InputEvent>) {
        self.adapter().on_event(listener)
    }
}

impl From<TextInput> for Input {
    fn from(input: TextInput) -> Self {
        Input::Text(input)
    }
}

impl From<OptionInput> for Input {
    fn from(input: OptionInput) -> Self {
        Input::Option(input)
    }
}

impl From<MultiOptionInput> for Input {
    fn from(input: MultiOptionInput) -> Self {
        Input::MultiOption(input)
    }
}
