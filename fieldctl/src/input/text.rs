//! Text input.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::events::{Emitter, InputEvent, Listener};
use crate::value::Value;

use super::InputAdapter;

#[derive(Debug, Default)]
struct TextInner {
    value: String,
    disabled: bool,
}

/// A single-line text input.
///
/// Cheap to clone; clones share state. `input`, `blur` and `click` stand in
/// for user interaction and emit the matching events.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    inner: Arc<RwLock<TextInner>>,
    focused: Arc<AtomicBool>,
    events: Arc<Emitter<InputEvent>>,
}

impl TextInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let input = Self::new();
        if let Ok(mut guard) = input.inner.write() {
            guard.value = value.into();
        }
        input
    }

    /// Get the current text.
    pub fn text(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.value.clone())
            .unwrap_or_default()
    }

    /// Type into the input: replace the text and emit `Change`.
    ///
    /// Ignored while disabled.
    pub fn input(&self, text: impl Into<String>) {
        let changed = match self.inner.write() {
            Ok(mut guard) if !guard.disabled => {
                let text = text.into();
                let changed = guard.value != text;
                guard.value = text;
                changed
            }
            _ => false,
        };
        if changed {
            self.events.emit(InputEvent::Change);
        }
    }

    /// Leave the input: drop focus and emit `Blur`.
    pub fn blur(&self) {
        self.focused.store(false, Ordering::SeqCst);
        self.events.emit(InputEvent::Blur);
    }

    /// Click the input: take focus and emit `Click`.
    pub fn click(&self) {
        if self.is_disabled() {
            return;
        }
        self.focused.store(true, Ordering::SeqCst);
        self.events.emit(InputEvent::Click);
    }
}

impl InputAdapter for TextInput {
    fn value(&self) -> Value {
        Value::Text(self.text())
    }

    fn set_value(&self, value: Value) {
        if let Ok(mut guard) = self.inner.write() {
            guard.value = value.to_string();
        }
    }

    fn focus(&self) {
        self.focused.store(true, Ordering::SeqCst);
    }

    fn is_focused(&self) -> bool {
        self.focused.load(Ordering::SeqCst)
    }

    fn is_disabled(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.disabled)
            .unwrap_or(false)
    }

    fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.disabled = disabled;
        }
    }

    fn on_event(&self, listener: Listener<InputEvent>) {
        self.events.add_listener(listener);
    }
}
