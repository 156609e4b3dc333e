//! Frame timing for animated transitions.
//!
//! Animations are driven by host frame ticks rather than background tasks:
//! the host awaits a [`FrameSource`] and forwards each elapsed interval to
//! the session, which hands it to the active mode. A mode that waits for an
//! animation accumulates time in a [`Tween`] until its ratio reaches 1.0.
use std::time::Duration;

use async_trait::async_trait;
use game_core::{Cell, CreatureId};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Elapsed-time accumulator with a clamped progress ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    pub const fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Adds `dt` and returns the new progress in `0.0..=1.0`.
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.ratio()
    }

    pub fn ratio(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Time `dt` would carry past the end of the tween.
    pub fn overshoot(&self, dt: Duration) -> Duration {
        (self.elapsed + dt).saturating_sub(self.duration)
    }
}

/// Store chunk describing a creature sliding between two cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub creature: CreatureId,
    pub from: Cell,
    pub to: Cell,
    pub progress: f32,
}

/// Source of host frame ticks.
#[async_trait]
pub trait FrameSource: Send {
    /// Waits for the next frame and returns the time since the previous one.
    ///
    /// `None` means the source is exhausted.
    async fn next_frame(&mut self) -> Option<Duration>;
}

/// Fixed-rate frame source over a tokio interval.
#[derive(Debug)]
pub struct FrameClock {
    interval: Interval,
    last: Instant,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// Clock ticking `fps` times per second; zero is treated as one.
    pub fn with_rate(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

#[async_trait]
impl FrameSource for FrameClock {
    async fn next_frame(&mut self) -> Option<Duration> {
        let now = self.interval.tick().await;
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        Some(dt)
    }
}
