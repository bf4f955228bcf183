//! Display adapters.
//!
//! A display reflects a control's validation state and shows or hides a
//! feedback message. Showing and hiding may animate; both complete through
//! their returned futures.

mod transition;
mod view;

use std::fmt;

use async_trait::async_trait;

pub use transition::{Easing, InstantTransition, TimedTransition, Transition};
pub use view::ControlView;

/// Visual validation state of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// Not validated, or cleared.
    #[default]
    Neutral,
    /// Last validation passed.
    Valid,
    /// Last validation failed.
    Invalid,
}

impl DisplayState {
    /// The state class applied to the control, empty when neutral.
    pub fn class_name(self) -> &'static str {
        match self {
            DisplayState::Neutral => "",
            DisplayState::Valid => "is-valid",
            DisplayState::Invalid => "is-invalid",
        }
    }
}

impl From<bool> for DisplayState {
    fn from(valid: bool) -> Self {
        if valid {
            DisplayState::Valid
        } else {
            DisplayState::Invalid
        }
    }
}

/// Kind of feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Error,
    Warning,
    Info,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Error => "error",
            MessageKind::Warning => "warning",
            MessageKind::Info => "info",
        };
        f.write_str(name)
    }
}

/// A feedback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Completion notifications emitted by [`ControlView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    MessageShown,
    MessageHidden,
}

/// Display surface of a control.
#[async_trait]
pub trait DisplayAdapter: Send + Sync {
    /// Get the current state.
    fn state(&self) -> DisplayState;

    /// Set the current state.
    fn set_state(&self, state: DisplayState);

    /// Get the current message, if any.
    fn message(&self) -> Option<Message>;

    /// Replace the message. Visibility is unchanged.
    fn set_message(&self, kind: MessageKind, text: String);

    /// Remove the message. Visibility is unchanged.
    fn clear_message(&self);

    /// Check whether the message panel is showing.
    fn is_message_visible(&self) -> bool;

    /// Return to neutral immediately: no message, no animation.
    fn reset(&self) {
        self.set_state(DisplayState::Neutral);
        self.clear_message();
    }

    /// Show the message panel; resolves once it is fully shown.
    async fn show_message(&self);

    /// Hide the message panel; resolves once it is fully hidden.
    async fn hide_message(&self);
}
