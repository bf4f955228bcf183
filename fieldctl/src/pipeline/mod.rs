//! Filter and validator pipelines.
//!
//! A run first awaits the [`Filter`] with the raw value, then awaits the
//! [`Validator`] with the filtered value. Both are opaque to the control.

mod filter;
mod validator;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::value::Value;

pub use filter::{
    CollapseWhitespace, FilterChain, FnFilter, Lowercase, Replace, Trim, Uppercase, filter_fn,
};
pub use validator::ValidatorChain;

/// Transforms a raw value before validation.
#[async_trait]
pub trait Filter: Send + Sync {
    async fn filter(&self, value: Value) -> Value;
}

/// Decides whether a filtered value is acceptable.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Validate `value`.
    ///
    /// `Err` means the validator itself could not reach a decision.
    async fn validate(&self, value: &Value) -> Result<Verdict, PipelineError>;
}

/// Builds a message from the raw (unfiltered) value.
pub type MessageFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// Message attached to a failed verdict.
#[derive(Clone)]
pub enum MessageContext {
    /// A fixed message.
    Text(String),
    /// A message built from the raw value the user entered.
    Build(MessageFn),
}

impl MessageContext {
    /// Message built from the raw value by `f`.
    pub fn build<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        MessageContext::Build(Arc::new(f))
    }

    /// Render the message for `raw`.
    pub fn render(&self, raw: &Value) -> String {
        match self {
            MessageContext::Text(text) => text.clone(),
            MessageContext::Build(f) => f(raw),
        }
    }
}

impl fmt::Debug for MessageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageContext::Text(text) => f.debug_tuple("Text").field(text).finish(),
            MessageContext::Build(_) => f.write_str("Build(..)"),
        }
    }
}

impl From<&str> for MessageContext {
    fn from(text: &str) -> Self {
        MessageContext::Text(text.to_string())
    }
}

impl From<String> for MessageContext {
    fn from(text: String) -> Self {
        MessageContext::Text(text)
    }
}

/// Outcome of a validator.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Whether the value passed.
    pub valid: bool,
    /// Message for a failed value.
    pub context: Option<MessageContext>,
}

impl Verdict {
    /// A passing verdict.
    pub fn pass() -> Self {
        Self {
            valid: true,
            context: None,
        }
    }

    /// A failing verdict with a message.
    pub fn fail(context: impl Into<MessageContext>) -> Self {
        Self {
            valid: false,
            context: Some(context.into()),
        }
    }

    /// A failing verdict without a message.
    pub fn fail_silent() -> Self {
        Self {
            valid: false,
            context: None,
        }
    }

    /// The message to display for this verdict, built from `raw`.
    ///
    /// Empty when there is no context.
    pub fn message(&self, raw: &Value) -> String {
        self.context
            .as_ref()
            .map(|context| context.render(raw))
            .unwrap_or_default()
    }
}
