//! Error types.

use thiserror::Error;

/// Failure inside a filter or validator pipeline.
///
/// This is an infrastructure failure (a lookup service is down, a rule could
/// not be evaluated) and is distinct from a value being invalid.
#[derive(Debug, Clone, Error)]
#[error("validation pipeline failed: {message}")]
pub struct PipelineError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl PipelineError {
    /// Creates a new pipeline error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced by controls and their inputs.
#[derive(Debug, Clone, Error)]
pub enum ControlError {
    /// The control was built without an input under the strict input policy.
    #[error("Input not found for control '{name}'")]
    MissingInput {
        /// The control name.
        name: String,
    },

    /// A choice input was asked about a value that is not one of its options.
    #[error("Option \"{value}\" not found")]
    OptionNotFound {
        /// The offending value.
        value: String,
    },

    /// The validator pipeline reported a failure.
    #[error("Validation of control '{name}' failed: {source}")]
    Pipeline {
        /// The control name.
        name: String,
        /// The underlying pipeline failure.
        #[source]
        source: PipelineError,
    },

    /// The task running a validation ended without producing an outcome.
    #[error("Validation task of control '{name}' aborted: {message}")]
    TaskAborted {
        /// The control name.
        name: String,
        /// Panic or cancellation message.
        message: String,
    },
}

impl ControlError {
    /// Creates a new option-not-found error.
    pub fn option_not_found(value: impl Into<String>) -> Self {
        Self::OptionNotFound {
            value: value.into(),
        }
    }

    /// Check whether this error is a pipeline failure.
    pub fn is_pipeline(&self) -> bool {
        matches!(self, Self::Pipeline { .. })
    }
}
