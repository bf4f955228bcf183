//! Transitions for opening and closing the feedback panel.

use std::time::Duration;

use async_trait::async_trait;

/// Progress curve of a [`TimedTransition`].
///
/// All curves are quadratic and map 0.0 to 0.0 and 1.0 to 1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow.
    EaseIn,
    /// Ends slow.
    EaseOut,
    /// Slow at both ends, symmetric around the midpoint.
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `0.0..=1.0` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut if t < 0.5 => 2.0 * t * t,
            Easing::EaseInOut => {
                let rest = 1.0 - t;
                1.0 - 2.0 * rest * rest
            }
        }
    }
}

/// Moves the panel between two openness levels (0.0 closed, 1.0 open).
#[async_trait]
pub trait Transition: Send + Sync {
    /// Animate from `from` to `to`, reporting every intermediate level to
    /// `frame`. The last reported level is `to`.
    async fn run(&self, from: f32, to: f32, frame: &(dyn Fn(f32) + Send + Sync));
}

/// Jumps straight to the target level.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantTransition;

#[async_trait]
impl Transition for InstantTransition {
    async fn run(&self, _from: f32, to: f32, frame: &(dyn Fn(f32) + Send + Sync)) {
        frame(to);
    }
}

/// Animates over a fixed duration in evenly spaced frames.
#[derive(Debug, Clone, Copy)]
pub struct TimedTransition {
    pub duration: Duration,
    pub easing: Easing,
    pub frames: u32,
}

impl TimedTransition {
    /// A transition over `duration` at roughly 60 frames per second.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        let frames = (duration.as_millis() / 16).max(1) as u32;
        Self {
            duration,
            easing,
            frames,
        }
    }

    /// Override the number of frames.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames.max(1);
        self
    }
}

#[async_trait]
impl Transition for TimedTransition {
    async fn run(&self, from: f32, to: f32, frame: &(dyn Fn(f32) + Send + Sync)) {
        let frames = self.frames.max(1);
        let step = self.duration / frames;
        for i in 1..=frames {
            tokio::time::sleep(step).await;
            let t = self.easing.apply(i as f32 / frames as f32);
            frame(from + (to - from) * t);
        }
    }
}
