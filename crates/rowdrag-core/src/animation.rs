#![forbid(unsafe_code)]

//! Minimal time-driven animation primitives.
//!
//! An [`Animation`] is advanced by explicit `tick(dt)` calls from the host's
//! frame loop; nothing here owns a clock. [`Tween`] is the only concrete
//! animation: a normalized progress value shaped by [`ease_out_cubic`].
//!
//! # Invariants
//!
//! 1. `value()` is always in `[0.0, 1.0]`.
//! 2. Once `is_complete()` returns true it stays true until `reset()`.
//! 3. A zero duration completes on the first tick (and `value()` is 1.0
//!    immediately).

use std::time::Duration;

/// Something that progresses over time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// True once the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current eased progress in `[0.0, 1.0]`.
    fn value(&self) -> f64;

    /// Return to the initial state.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Cubic ease-out, the curve every ghost transition follows.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Progress from 0 to 1 over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    duration: Duration,
    elapsed: Duration,
}

impl Tween {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
    }

    fn linear_progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        ease_out_cubic(self.linear_progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
