//! Control configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::events::InputEvent;

/// What to do when a control is built without an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Refuse to build the control.
    #[default]
    Strict,
    /// Log a warning and bind a detached, empty text input instead.
    Lenient,
}

/// Per-control configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use fieldctl::{ControlConfig, InputEvent};
///
/// let config = ControlConfig::new()
///     .with_delay(Duration::from_millis(300))
///     .with_triggers([InputEvent::Blur, InputEvent::Click]);
/// assert_eq!(config.delay(), Some(Duration::from_millis(300)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Debounce window. Loaded from `delay_ms`.
    ///
    /// Default: none (validate as soon as a trigger fires)
    #[serde(rename = "delay_ms", deserialize_with = "delay_from_millis")]
    pub delay: Option<Duration>,

    /// Input events that trigger validation.
    ///
    /// Default: blur only
    pub triggers: Vec<InputEvent>,

    /// Behavior when no input is bound.
    ///
    /// Default: strict
    pub policy: InputPolicy,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            delay: None,
            triggers: vec![InputEvent::Blur],
            policy: InputPolicy::default(),
        }
    }
}

impl ControlConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce window.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the events that trigger validation.
    pub fn with_triggers(mut self, triggers: impl IntoIterator<Item = InputEvent>) -> Self {
        self.triggers = triggers.into_iter().collect();
        self
    }

    /// Sets the input policy.
    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The debounce window, if any. A zero window counts as none.
    pub fn delay(&self) -> Option<Duration> {
        self.delay.filter(|delay| !delay.is_zero())
    }
}

fn delay_from_millis<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
}
