//! Per-field results of a form-wide validation.

use crate::error::ControlError;

/// Outcome of one control within a form-wide validation.
#[derive(Debug, Clone)]
pub enum FieldOutcome {
    Valid,
    /// The value was rejected with this message.
    Invalid { message: String },
    /// The control was already validating; its run was not awaited.
    Pending,
    /// The pipeline itself failed.
    Failed { error: ControlError },
}

impl FieldOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Report for a single control.
#[derive(Debug, Clone)]
pub struct FieldReport {
    /// Control name.
    pub name: String,
    pub outcome: FieldOutcome,
}

/// Result of [`Form::validate_all`](super::Form::validate_all).
#[derive(Debug, Clone, Default)]
pub struct FormReport {
    fields: Vec<FieldReport>,
}

impl FormReport {
    pub(crate) fn new(fields: Vec<FieldReport>) -> Self {
        Self { fields }
    }

    /// Check if every field passed validation.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|field| field.outcome.is_valid())
    }

    /// Check if any field did not pass.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// All fields, in form order.
    pub fn fields(&self) -> &[FieldReport] {
        &self.fields
    }

    /// Get the report for a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields rejected by their validator.
    pub fn errors(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields
            .iter()
            .filter(|field| matches!(field.outcome, FieldOutcome::Invalid { .. }))
    }

    /// Get the first rejected field (if any).
    pub fn first_error(&self) -> Option<&FieldReport> {
        self.errors().next()
    }

    /// Fields whose pipeline failed.
    pub fn failures(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields
            .iter()
            .filter(|field| matches!(field.outcome, FieldOutcome::Failed { .. }))
    }
}
