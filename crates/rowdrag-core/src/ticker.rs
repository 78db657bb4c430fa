#![forbid(unsafe_code)]

//! Frame-paced repeating ticker for auto-scroll.
//!
//! The ticker owns no thread and no run-loop registration. The host's frame
//! loop polls it with the current time; it answers how many whole intervals
//! elapsed since the previous poll. Arming and disarming are explicit, so the
//! owner can keep "armed iff dragging" as a simple invariant.
//!
//! # Invariants
//!
//! 1. `poll()` returns 0 while disarmed.
//! 2. The first poll after `arm(now)` counts intervals from `now`.
//! 3. A single poll never reports more than [`MAX_CATCH_UP_TICKS`], so a
//!    stalled frame loop does not cause a scroll jump.

use std::time::Duration;

use web_time::Instant;

/// Nominal frame interval (60 Hz).
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Upper bound on ticks reported by one poll.
pub const MAX_CATCH_UP_TICKS: u32 = 4;

/// A repeating ticker that can be armed and disarmed.
#[derive(Debug, Clone)]
pub struct AutoScrollTicker {
    interval: Duration,
    last: Option<Instant>,
}

impl Default for AutoScrollTicker {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

impl AutoScrollTicker {
    /// Create a disarmed ticker. A zero interval is clamped to 1µs.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            last: None,
        }
    }

    /// Start ticking from `now`. Re-arming restarts the phase.
    pub fn arm(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Stop ticking. Safe to call repeatedly.
    pub fn disarm(&mut self) {
        self.last = None;
    }

    #[inline]
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.last.is_some()
    }

    #[inline]
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval. Takes effect at the next poll.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_micros(1));
    }

    /// Number of ticks due at `now`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(last);
        let due = elapsed.as_nanos() / self.interval.as_nanos();
        if due == 0 {
            return 0;
        }
        let due = u32::try_from(due).unwrap_or(u32::MAX);
        if due > MAX_CATCH_UP_TICKS {
            self.last = Some(now);
            return MAX_CATCH_UP_TICKS;
        }
        self.last = Some(last + self.interval * due);
        due
    }
}
