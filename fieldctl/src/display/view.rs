//! In-memory control display with an animated feedback panel.

use std::fmt;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::Emitter;

use super::{
    DisplayAdapter, DisplayEvent, DisplayState, InstantTransition, Message, MessageKind,
    Transition,
};

#[derive(Debug, Default)]
struct ViewInner {
    state: DisplayState,
    message: Option<Message>,
    visible: bool,
    /// Feedback panel openness, 0.0 closed to 1.0 open.
    openness: f32,
}

/// Default display: tracks state and message, and opens or closes its feedback
/// panel through a [`Transition`].
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ControlView {
    inner: Arc<RwLock<ViewInner>>,
    transition: Arc<dyn Transition>,
    events: Arc<Emitter<DisplayEvent>>,
}

impl ControlView {
    /// Create a view whose panel opens and closes instantly.
    pub fn new() -> Self {
        Self::with_transition(InstantTransition)
    }

    /// Create a view animating its panel with `transition`.
    pub fn with_transition(transition: impl Transition + 'static) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ViewInner::default())),
            transition: Arc::new(transition),
            events: Arc::new(Emitter::new()),
        }
    }

    /// Current panel openness.
    pub fn panel_openness(&self) -> f32 {
        self.inner.read().map(|guard| guard.openness).unwrap_or(0.0)
    }

    /// The message text, or empty.
    pub fn message_text(&self) -> String {
        self.message().map(|message| message.text).unwrap_or_default()
    }

    /// Register a callback for show/hide completion.
    pub fn on<F>(&self, listener: F)
    where
        F: Fn(&DisplayEvent) + Send + Sync + 'static,
    {
        self.events.on(listener);
    }

    /// Subscribe to show/hide completion.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<DisplayEvent> {
        self.events.subscribe()
    }

    async fn animate(&self, to: f32) {
        let from = self.panel_openness();
        let inner = Arc::clone(&self.inner);
        let frame = move |level: f32| {
            if let Ok(mut guard) = inner.write() {
                guard.openness = level;
            }
        };
        self.transition.run(from, to, &frame).await;
    }
}

impl Default for ControlView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DisplayAdapter for ControlView {
    fn state(&self) -> DisplayState {
        self.inner.read().map(|guard| guard.state).unwrap_or_default()
    }

    fn set_state(&self, state: DisplayState) {
        if let Ok(mut guard) = self.inner.write() {
            guard.state = state;
        }
    }

    fn message(&self) -> Option<Message> {
        self.inner.read().ok().and_then(|guard| guard.message.clone())
    }

    fn set_message(&self, kind: MessageKind, text: String) {
        if let Ok(mut guard) = self.inner.write() {
            guard.message = Some(Message { kind, text });
        }
    }

    fn clear_message(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.message = None;
        }
    }

    fn is_message_visible(&self) -> bool {
        self.inner.read().map(|guard| guard.visible).unwrap_or(false)
    }

    fn reset(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = ViewInner::default();
        }
    }

    async fn show_message(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.visible = true;
        }
        self.animate(1.0).await;
        self.events.emit(DisplayEvent::MessageShown);
    }

    async fn hide_message(&self) {
        self.animate(0.0).await;
        if let Ok(mut guard) = self.inner.write() {
            guard.visible = false;
        }
        self.events.emit(DisplayEvent::MessageHidden);
    }
}

impl fmt::Debug for ControlView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlView")
            .field("inner", &self.inner)
            .finish()
    }
}
