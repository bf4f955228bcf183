//! Handle to a validation run.

use std::future::IntoFuture;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::error::ControlError;

use super::Validation;

/// Handle returned by [`Control::validate`](super::Control::validate).
///
/// Awaiting the handle yields `Ok(None)` for a call that was skipped because a
/// run was already in flight. Dropping the handle does not stop the run.
#[derive(Debug)]
pub struct ValidationHandle {
    name: String,
    task: Option<JoinHandle<Result<Validation, ControlError>>>,
}

impl ValidationHandle {
    pub(super) fn skipped(name: String) -> Self {
        Self { name, task: None }
    }

    pub(super) fn running(name: String, task: JoinHandle<Result<Validation, ControlError>>) -> Self {
        Self {
            name,
            task: Some(task),
        }
    }

    /// Check whether this call was dropped by the reentrancy guard.
    pub fn is_skipped(&self) -> bool {
        self.task.is_none()
    }

    /// Check whether the run has completed. Skipped handles count as finished.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Wait for the run to complete.
    pub async fn outcome(self) -> Result<Option<Validation>, ControlError> {
        let Some(task) = self.task else {
            return Ok(None);
        };

        match task.await {
            Ok(result) => result.map(Some),
            Err(err) => Err(ControlError::TaskAborted {
                name: self.name,
                message: err.to_string(),
            }),
        }
    }
}

impl IntoFuture for ValidationHandle {
    type Output = Result<Option<Validation>, ControlError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        self.outcome().boxed()
    }
}
