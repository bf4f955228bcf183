//! Validator chain with a fluent rule API.

use std::collections::HashSet;
use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use regex::Regex;

use crate::error::PipelineError;
use crate::value::Value;

use super::{MessageContext, Validator, Verdict};

/// Type alias for sync validation rule closures.
type SyncRule = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Type alias for async validation rule closures.
type AsyncRule = Box<dyn Fn(Value) -> BoxFuture<'static, Result<bool, PipelineError>> + Send + Sync>;

enum Check {
    Sync(SyncRule),
    Async(AsyncRule),
}

struct Rule {
    check: Check,
    message: MessageContext,
}

/// Ordered list of rules; the first rule that fails decides the verdict.
///
/// # Example
///
/// ```
/// use fieldctl::pipeline::{MessageContext, ValidatorChain};
///
/// let chain = ValidatorChain::new()
///     .required("Username is required")
///     .min_length(3, MessageContext::build(|raw| format!("\"{raw}\" is too short")));
/// assert_eq!(chain.len(), 2);
/// ```
#[derive(Default)]
pub struct ValidatorChain {
    rules: Vec<Rule>,
    optional: bool,
}

impl ValidatorChain {
    /// Create a chain with no rules. An empty chain accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// When optional, blank values pass without running any rule.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Add a custom synchronous rule.
    pub fn rule<F>(mut self, f: F, msg: impl Into<MessageContext>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            check: Check::Sync(Box::new(f)),
            message: msg.into(),
        });
        self
    }

    /// Add a custom asynchronous rule.
    pub fn rule_async<F, Fut>(self, f: F, msg: impl Into<MessageContext>) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        self.try_rule_async(move |value| f(value).map(Ok), msg)
    }

    /// Add an asynchronous rule that may fail to reach a decision.
    ///
    /// An `Err` aborts the chain and is reported as a pipeline failure rather
    /// than an invalid value.
    pub fn try_rule_async<F, Fut>(mut self, f: F, msg: impl Into<MessageContext>) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, PipelineError>> + Send + 'static,
    {
        self.rules.push(Rule {
            check: Check::Async(Box::new(move |value| f(value).boxed())),
            message: msg.into(),
        });
        self
    }

    /// Require a non-blank value.
    pub fn required(self, msg: impl Into<MessageContext>) -> Self {
        self.rule(|v| !v.is_blank(), msg)
    }

    /// Require at least `min` characters (or entries for lists).
    pub fn min_length(self, min: usize, msg: impl Into<MessageContext>) -> Self {
        self.rule(move |v| v.len() >= min, msg)
    }

    /// Require at most `max` characters (or entries for lists).
    pub fn max_length(self, max: usize, msg: impl Into<MessageContext>) -> Self {
        self.rule(move |v| v.len() <= max, msg)
    }

    /// Require the value (every entry for lists) to match `pattern`.
    pub fn pattern(self, pattern: Regex, msg: impl Into<MessageContext>) -> Self {
        self.rule(
            move |v| match v {
                Value::Text(text) => pattern.is_match(text),
                Value::List(items) => items.iter().all(|item| pattern.is_match(item)),
            },
            msg,
        )
    }

    /// Require a valid email address. Empty text passes; pair with
    /// [`required`](Self::required) to reject it.
    pub fn email(self, msg: impl Into<MessageContext>) -> Self {
        self.rule(
            |v| match v.as_text() {
                Some("") => true,
                Some(text) => email_address::EmailAddress::is_valid(text),
                None => false,
            },
            msg,
        )
    }

    /// Require the value to equal `other`.
    pub fn equals(self, other: impl Into<Value>, msg: impl Into<MessageContext>) -> Self {
        let other = other.into();
        self.rule(move |v| *v == other, msg)
    }

    /// Require text to contain `substr`, or a list to contain it as an entry.
    pub fn contains(self, substr: impl Into<String>, msg: impl Into<MessageContext>) -> Self {
        let substr = substr.into();
        self.rule(
            move |v| match v {
                Value::Text(text) => text.contains(&substr),
                Value::List(items) => items.contains(&substr),
            },
            msg,
        )
    }

    /// Require the value (every entry for lists) to be one of `allowed`.
    pub fn one_of<I, S>(self, allowed: I, msg: impl Into<MessageContext>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: HashSet<String> = allowed.into_iter().map(Into::into).collect();
        self.rule(
            move |v| match v {
                Value::Text(text) => allowed.contains(text),
                Value::List(items) => items.iter().all(|item| allowed.contains(item)),
            },
            msg,
        )
    }

    /// Require at least `min` selections. Non-blank text counts as one.
    pub fn min_selected(self, min: usize, msg: impl Into<MessageContext>) -> Self {
        self.rule(move |v| selection_count(v) >= min, msg)
    }

    /// Require at most `max` selections. Non-blank text counts as one.
    pub fn max_selected(self, max: usize, msg: impl Into<MessageContext>) -> Self {
        self.rule(move |v| selection_count(v) <= max, msg)
    }
}

fn selection_count(value: &Value) -> usize {
    match value {
        Value::Text(text) if text.trim().is_empty() => 0,
        Value::Text(_) => 1,
        Value::List(items) => items.len(),
    }
}

#[async_trait]
impl Validator for ValidatorChain {
    async fn validate(&self, value: &Value) -> Result<Verdict, PipelineError> {
        if self.optional && value.is_blank() {
            return Ok(Verdict::pass());
        }

        for rule in &self.rules {
            let passed = match &rule.check {
                Check::Sync(check) => check(value),
                Check::Async(check) => check(value.clone()).await?,
            };
            if !passed {
                return Ok(Verdict::fail(rule.message.clone()));
            }
        }

        Ok(Verdict::pass())
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("rules", &self.rules.len())
            .field("optional", &self.optional)
            .finish()
    }
}
