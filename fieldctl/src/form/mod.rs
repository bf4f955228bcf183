//! A named collection of controls.

mod report;

use log::debug;

use crate::control::{Control, Validity};
use crate::value::Value;

pub use report::{FieldOutcome, FieldReport, FormReport};

/// Controls keyed by name, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Form {
    controls: Vec<Control>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control. A control with the same name is replaced in place.
    pub fn add(&mut self, control: Control) -> &mut Self {
        match self
            .controls
            .iter_mut()
            .find(|existing| existing.name() == control.name())
        {
            Some(existing) => *existing = control,
            None => self.controls.push(control),
        }
        self
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, control: Control) -> Self {
        self.add(control);
        self
    }

    /// Remove a control by name.
    pub fn remove(&mut self, name: &str) -> Option<Control> {
        let index = self.controls.iter().position(|c| c.name() == name)?;
        Some(self.controls.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.controls.iter().map(Control::name).collect()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    /// Current values by control name.
    pub fn values(&self) -> Vec<(String, Value)> {
        self.controls
            .iter()
            .map(|c| (c.name().to_string(), c.value()))
            .collect()
    }

    /// Check whether every control's last outcome was `Valid`.
    ///
    /// Does not start any run; controls never validated count as not valid.
    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(Control::is_valid)
    }

    /// Validate every control and wait for all runs.
    ///
    /// All runs are started before any is awaited, so slow validators overlap.
    /// A control that was already validating is reported as
    /// [`FieldOutcome::Pending`].
    pub async fn validate_all(&self) -> FormReport {
        let handles: Vec<_> = self
            .controls
            .iter()
            .map(|control| (control.name().to_string(), control.validate()))
            .collect();

        let mut fields = Vec::with_capacity(handles.len());
        for (name, handle) in handles {
            let outcome = match handle.await {
                Ok(Some(validation)) if validation.valid => FieldOutcome::Valid,
                Ok(Some(validation)) => FieldOutcome::Invalid {
                    message: validation.message.unwrap_or_default(),
                },
                Ok(None) => FieldOutcome::Pending,
                Err(error) => FieldOutcome::Failed { error },
            };
            fields.push(FieldReport { name, outcome });
        }

        let report = FormReport::new(fields);
        debug!(
            "Form validated: {} field(s), {} invalid",
            report.fields().len(),
            report.errors().count()
        );
        report
    }

    /// Clear every control.
    pub fn clear(&self) {
        for control in &self.controls {
            control.clear();
        }
    }

    /// Focus the first control whose last outcome was `Invalid`.
    pub fn focus_first_invalid(&self) -> Option<&Control> {
        let control = self
            .controls
            .iter()
            .find(|c| c.validity() == Validity::Invalid)?;
        control.focus();
        Some(control)
    }
}
