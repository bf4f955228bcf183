//! Shared test helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use simplelog::{Config, LevelFilter, TestLogger};
use tokio::sync::{Semaphore, mpsc};

use fieldctl::pipeline::{Filter, Validator, Verdict};
use fieldctl::{ControlEvent, PipelineError, Value};

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Let spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Wait for the next `Validate` or `Failed` event, skipping proxied events.
pub async fn next_outcome(rx: &mut mpsc::UnboundedReceiver<ControlEvent>) -> ControlEvent {
    loop {
        match rx.recv().await {
            Some(event @ (ControlEvent::Validate { .. } | ControlEvent::Failed { .. })) => {
                return event;
            }
            Some(_) => continue,
            None => panic!("control event channel closed"),
        }
    }
}

/// Drain every event already delivered.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<ControlEvent>) -> Vec<ControlEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn outcome_count(events: &[ControlEvent]) -> usize {
    events.iter().filter(|event| event.is_validate()).count()
}

type Decide = Arc<dyn Fn(&Value) -> Result<Verdict, PipelineError> + Send + Sync>;

/// Validator that records every call and holds each one until released.
#[derive(Clone)]
pub struct GatedValidator {
    gate: Arc<Semaphore>,
    calls: Arc<Mutex<Vec<Value>>>,
    decide: Decide,
}

impl GatedValidator {
    pub fn new<F>(decide: F) -> Self
    where
        F: Fn(&Value) -> Result<Verdict, PipelineError> + Send + Sync + 'static,
    {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            decide: Arc::new(decide),
        }
    }

    /// Let one held call complete.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Validator for GatedValidator {
    async fn validate(&self, value: &Value) -> Result<Verdict, PipelineError> {
        self.calls.lock().unwrap().push(value.clone());
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|err| PipelineError::new(err.to_string()))?;
        permit.forget();
        (self.decide)(value)
    }
}

/// Filter that records the raw values it receives and passes them through.
#[derive(Clone, Default)]
pub struct RecordingFilter {
    calls: Arc<Mutex<Vec<Value>>>,
}

impl RecordingFilter {
    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Filter for RecordingFilter {
    async fn filter(&self, value: Value) -> Value {
        self.calls.lock().unwrap().push(value.clone());
        value
    }
}
