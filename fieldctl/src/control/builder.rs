//! Control construction.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, warn};

use crate::config::{ControlConfig, InputPolicy};
use crate::debounce::Debouncer;
use crate::display::{ControlView, DisplayAdapter};
use crate::error::ControlError;
use crate::events::{Emitter, InputEvent};
use crate::input::{InputAdapter, TextInput};
use crate::pipeline::{Filter, FilterChain, Validator, ValidatorChain};
use crate::timer::{TimerService, TokioTimer};

use super::{Control, ControlInner, Validity};

type Plugin = Box<dyn FnOnce(&Control) + Send>;

/// Builder for [`Control`].
///
/// Only the input is required (under [`InputPolicy::Strict`]). Defaults: a
/// [`ControlView`] display, an identity [`FilterChain`], an always-valid
/// [`ValidatorChain`], a [`TokioTimer`], and [`ControlConfig::default`].
pub struct ControlBuilder {
    name: String,
    input: Option<Arc<dyn InputAdapter>>,
    display: Option<Arc<dyn DisplayAdapter>>,
    filter: Option<Arc<dyn Filter>>,
    validator: Option<Arc<dyn Validator>>,
    timer: Option<Arc<dyn TimerService>>,
    config: ControlConfig,
    plugins: Vec<Plugin>,
}

impl ControlBuilder {
    /// Create a builder for a control named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: None,
            display: None,
            filter: None,
            validator: None,
            timer: None,
            config: ControlConfig::default(),
            plugins: Vec::new(),
        }
    }

    /// Bind the input.
    pub fn input(mut self, input: impl InputAdapter + 'static) -> Self {
        self.input = Some(Arc::new(input));
        self
    }

    /// Bind the display.
    pub fn display(mut self, display: impl DisplayAdapter + 'static) -> Self {
        self.display = Some(Arc::new(display));
        self
    }

    /// Set the filter pipeline.
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Set the validator pipeline.
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Set the timer service used for debouncing.
    pub fn timer(mut self, timer: impl TimerService + 'static) -> Self {
        self.timer = Some(Arc::new(timer));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ControlConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the debounce window.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config = self.config.with_delay(delay);
        self
    }

    /// Set the events that trigger validation.
    pub fn triggers(mut self, triggers: impl IntoIterator<Item = InputEvent>) -> Self {
        self.config = self.config.with_triggers(triggers);
        self
    }

    /// Set the input policy.
    pub fn policy(mut self, policy: InputPolicy) -> Self {
        self.config = self.config.with_policy(policy);
        self
    }

    /// Add a plugin applied once the control is built.
    pub fn plugin<F>(mut self, plugin: F) -> Self
    where
        F: FnOnce(&Control) + Send + 'static,
    {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Build the control and subscribe it to its input.
    pub fn build(self) -> Result<Control, ControlError> {
        let input = match (self.input, self.config.policy) {
            (Some(input), _) => input,
            (None, InputPolicy::Strict) => {
                return Err(ControlError::MissingInput { name: self.name });
            }
            (None, InputPolicy::Lenient) => {
                warn!(
                    "Input not found for control '{}', binding a detached input",
                    self.name
                );
                Arc::new(TextInput::new())
            }
        };

        let timer = self
            .timer
            .unwrap_or_else(|| Arc::new(TokioTimer::new()));

        let delay = self.config.delay();
        let mut triggers: Vec<InputEvent> = Vec::new();
        for event in self.config.triggers {
            if !triggers.contains(&event) {
                triggers.push(event);
            }
        }

        let inner = ControlInner {
            name: self.name,
            input,
            display: self
                .display
                .unwrap_or_else(|| Arc::new(ControlView::new())),
            filter: self
                .filter
                .unwrap_or_else(|| Arc::new(FilterChain::new())),
            validator: self
                .validator
                .unwrap_or_else(|| Arc::new(ValidatorChain::new())),
            debouncer: Debouncer::new(delay, timer),
            triggers,
            validity: RwLock::new(Validity::Unknown),
            validating: AtomicBool::new(false),
            events: Emitter::new(),
        };

        let control = Control {
            inner: Arc::new(inner),
        };
        control.bind_input();

        debug!(
            "Control '{}' built (delay: {:?}, triggers: {:?})",
            control.name(),
            control.inner.debouncer.delay(),
            control.triggers()
        );

        for plugin in self.plugins {
            control.use_plugin(plugin);
        }

        Ok(control)
    }
}
