//! Validation coordination for form controls.
//!
//! A [`Control`] watches an input, and on each configured trigger event runs the
//! current value through a filter pipeline and then a validator pipeline. The
//! outcome is reflected onto a display and broadcast as a [`ControlEvent`].
//!
//! Runs are serialized: while one is in flight, further triggers and
//! `validate()` calls are dropped. An optional debounce delay collapses bursts of
//! triggers into a single run that reads the value current at fire time.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use fieldctl::prelude::*;
//!
//! let input = TextInput::new();
//! let control = Control::builder("email")
//!     .input(input.clone())
//!     .filter(FilterChain::new().with(Trim))
//!     .validator(
//!         ValidatorChain::new()
//!             .required("Email is required")
//!             .email("Please enter a valid email"),
//!     )
//!     .delay(Duration::from_millis(300))
//!     .build()?;
//!
//! control.on(|event| {
//!     if let ControlEvent::Validate { valid, value, .. } = event {
//!         println!("{valid}: {value}");
//!     }
//! });
//!
//! input.input("someone@example.com");
//! input.blur();
//! ```

pub mod config;
pub mod control;
pub mod debounce;
pub mod display;
pub mod error;
pub mod events;
pub mod form;
pub mod input;
pub mod pipeline;
pub mod timer;
pub mod value;

pub use config::{ControlConfig, InputPolicy};
pub use control::{Control, ControlBuilder, Validation, ValidationHandle, Validity};
pub use error::{ControlError, PipelineError};
pub use events::{ControlEvent, InputEvent};
pub use value::Value;

pub mod prelude {
    pub use crate::config::{ControlConfig, InputPolicy};
    pub use crate::control::{Control, Validation, ValidationHandle, Validity};
    pub use crate::debounce::DebounceState;
    pub use crate::display::{
        ControlView, DisplayAdapter, DisplayEvent, DisplayState, Easing, InstantTransition, Message,
        MessageKind, TimedTransition, Transition,
    };
    pub use crate::error::{ControlError, PipelineError};
    pub use crate::events::{ControlEvent, InputEvent};
    pub use crate::form::{FieldOutcome, Form, FormReport};
    pub use crate::input::{
        ChoiceOption, Input, InputAdapter, InputKind, MultiOptionInput, OptionInput, TextInput,
    };
    pub use crate::pipeline::{
        CollapseWhitespace, Filter, FilterChain, Lowercase, MessageContext, Replace, Trim,
        Uppercase, Validator, ValidatorChain, Verdict, filter_fn,
    };
    pub use crate::timer::{ManualTimer, TimerService, TokioTimer};
    pub use crate::value::Value;
}
