#![forbid(unsafe_code)]

//! Long-press recognition: turns raw pointer events into a press-and-drag
//! gesture.
//!
//! [`LongPressRecognizer`] is a stateful processor. Feed it every
//! [`PointerEvent`] through [`process`](LongPressRecognizer::process) and call
//! [`check_long_press`](LongPressRecognizer::check_long_press) on every frame;
//! it emits [`PressGesture`]s in the phases `Began → Changed* → Ended` (or
//! `Cancelled`).
//!
//! # State Machine
//!
//! ```text
//!   Idle ──down──▶ Pending ──held ≥ min_press_duration──▶ Active
//!    ▲               │ moved > allowable_movement / up        │ up / cancel / disable
//!    └───────────────┴────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `Began` is emitted at most once per press, and always before any
//!    `Changed`.
//! 2. Every `Began` is eventually followed by exactly one `Ended` or
//!    `Cancelled` (disabling the recognizer cancels).
//! 3. A press that moves beyond the tolerance before `Began` fails silently:
//!    nothing is emitted for it.
//! 4. While disabled, all events are ignored.
//!
//! # Failure Modes
//!
//! - A NaN position is recorded as-is; consumers that need a usable location
//!   must check [`Point::is_nan`].

use std::time::Duration;

use web_time::Instant;

use crate::event::{PointerEvent, PointerEventKind};
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for long-press recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LongPressConfig {
    /// How long the pointer must be held before the gesture begins
    /// (default: 500ms).
    pub min_press_duration: Duration,
    /// Maximum distance the pointer may wander before the gesture begins
    /// (default: 10.0).
    pub allowable_movement: f64,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            min_press_duration: Duration::from_millis(500),
            allowable_movement: 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Gesture
// ---------------------------------------------------------------------------

/// Lifecycle phase of a recognized press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// True for `Ended` and `Cancelled`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// A snapshot of the recognized gesture, handed to the reorder controller
/// and to delegate hooks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressGesture {
    pub phase: GesturePhase,
    /// Current pointer location.
    pub location: Point,
    /// Where the pointer first went down.
    pub start_location: Point,
    /// When the pointer first went down.
    pub pressed_at: Instant,
}

impl PressGesture {
    /// How long the pointer has been down at `now`.
    #[must_use]
    pub fn held_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.pressed_at)
    }

    /// Same gesture expressed in a coordinate space shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            location: self.location.offset(dx, dy),
            start_location: self.start_location.offset(dx, dy),
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Press {
    start: Point,
    last: Point,
    down_at: Instant,
}

#[derive(Debug, Clone, Copy)]
enum Track {
    Idle,
    Pending(Press),
    Active(Press),
}

// ---------------------------------------------------------------------------
// LongPressRecognizer
// ---------------------------------------------------------------------------

/// Stateful long-press recognizer.
pub struct LongPressRecognizer {
    config: LongPressConfig,
    enabled: bool,
    track: Track,
}

impl std::fmt::Debug for LongPressRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LongPressRecognizer")
            .field("enabled", &self.enabled)
            .field("active", &self.is_active())
            .field("pending", &matches!(self.track, Track::Pending(_)))
            .finish()
    }
}

impl Default for LongPressRecognizer {
    fn default() -> Self {
        Self::new(LongPressConfig::default())
    }
}

impl LongPressRecognizer {
    /// Create a new, enabled recognizer.
    #[must_use]
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            config,
            enabled: true,
            track: Track::Idle,
        }
    }

    /// Process a raw pointer event, returning the gesture update it produced.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Option<PressGesture> {
        if !self.enabled {
            return None;
        }
        match event.kind {
            PointerEventKind::Down => {
                self.on_down(event.position, now);
                None
            }
            PointerEventKind::Move => self.on_move(event.position),
            PointerEventKind::Up => self.on_up(event.position),
            PointerEventKind::Cancel => self.on_cancel(),
        }
    }

    /// Check the press timer. Call on every frame.
    ///
    /// Returns a `Began` gesture once the pointer has been held for the
    /// configured duration without wandering.
    pub fn check_long_press(&mut self, now: Instant) -> Option<PressGesture> {
        if !self.enabled {
            return None;
        }
        let Track::Pending(press) = self.track else {
            return None;
        };
        if now.saturating_duration_since(press.down_at) < self.config.min_press_duration {
            return None;
        }
        self.track = Track::Active(press);
        #[cfg(feature = "tracing")]
        tracing::debug!(x = press.last.x, y = press.last.y, "long press began");
        Some(Self::gesture(GesturePhase::Began, &press))
    }

    /// Latest pointer location of an active gesture.
    #[must_use]
    pub fn location(&self) -> Option<Point> {
        match self.track {
            Track::Active(press) => Some(press.last),
            _ => None,
        }
    }

    /// The active gesture as a `Changed` update at its latest location.
    ///
    /// Lets a frame-driven caller re-run drag logic without a pointer event.
    #[must_use]
    pub fn current(&self) -> Option<PressGesture> {
        match self.track {
            Track::Active(press) => Some(Self::gesture(GesturePhase::Changed, &press)),
            _ => None,
        }
    }

    /// Whether a gesture has begun and not yet ended.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.track, Track::Active(_))
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable recognition.
    ///
    /// Disabling drops any pending press and cancels an active gesture; the
    /// `Cancelled` update is returned so the caller can forward it.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<PressGesture> {
        self.enabled = enabled;
        if enabled {
            return None;
        }
        let cancelled = match self.track {
            Track::Active(press) => Some(Self::gesture(GesturePhase::Cancelled, &press)),
            _ => None,
        };
        self.track = Track::Idle;
        cancelled
    }

    /// Cancel whatever is in flight by disabling and re-enabling.
    ///
    /// The recognizer stays enabled afterwards (unless it was disabled before
    /// the call, in which case it stays disabled).
    pub fn reset(&mut self) -> Option<PressGesture> {
        let was_enabled = self.enabled;
        let cancelled = self.set_enabled(false);
        self.enabled = was_enabled;
        cancelled
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &LongPressConfig {
        &self.config
    }

    /// Update the configuration. Takes effect for the next press.
    pub fn set_config(&mut self, config: LongPressConfig) {
        self.config = config;
    }

    #[inline]
    #[must_use]
    pub fn min_press_duration(&self) -> Duration {
        self.config.min_press_duration
    }

    pub fn set_min_press_duration(&mut self, duration: Duration) {
        self.config.min_press_duration = duration;
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl LongPressRecognizer {
    fn gesture(phase: GesturePhase, press: &Press) -> PressGesture {
        PressGesture {
            phase,
            location: press.last,
            start_location: press.start,
            pressed_at: press.down_at,
        }
    }

    fn on_down(&mut self, pos: Point, now: Instant) {
        // Single pointer: a second down while tracking is ignored.
        if matches!(self.track, Track::Idle) {
            self.track = Track::Pending(Press {
                start: pos,
                last: pos,
                down_at: now,
            });
        }
    }

    fn on_move(&mut self, pos: Point) -> Option<PressGesture> {
        match &mut self.track {
            Track::Idle => None,
            Track::Pending(press) => {
                if press.start.distance(pos) > self.config.allowable_movement {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("long press failed: pointer wandered");
                    self.track = Track::Idle;
                } else {
                    press.last = pos;
                }
                None
            }
            Track::Active(press) => {
                press.last = pos;
                Some(Self::gesture(GesturePhase::Changed, press))
            }
        }
    }

    fn on_up(&mut self, pos: Point) -> Option<PressGesture> {
        let track = std::mem::replace(&mut self.track, Track::Idle);
        match track {
            Track::Active(mut press) => {
                press.last = pos;
                Some(Self::gesture(GesturePhase::Ended, &press))
            }
            _ => None,
        }
    }

    fn on_cancel(&mut self) -> Option<PressGesture> {
        let track = std::mem::replace(&mut self.track, Track::Idle);
        match track {
            Track::Active(press) => Some(Self::gesture(GesturePhase::Cancelled, &press)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn short_tap_never_begins() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        assert!(rec.process(&PointerEvent::down(10.0, 10.0), t0).is_none());
        assert!(rec.check_long_press(at(t0, 100)).is_none());
        assert!(rec.process(&PointerEvent::up(10.0, 10.0), at(t0, 150)).is_none());
        assert!(rec.check_long_press(at(t0, 600)).is_none());
        assert!(!rec.is_active());
    }

    #[test]
    fn held_press_begins_then_changes_then_ends() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(10.0, 10.0), t0);
        let began = rec.check_long_press(at(t0, 500)).expect("began");
        assert_eq!(began.phase, GesturePhase::Began);
        assert_eq!(began.location, Point::new(10.0, 10.0));
        assert!(rec.check_long_press(at(t0, 600)).is_none(), "began fires once");

        let changed = rec
            .process(&PointerEvent::moved(10.0, 80.0), at(t0, 650))
            .expect("changed");
        assert_eq!(changed.phase, GesturePhase::Changed);
        assert_eq!(rec.location(), Some(Point::new(10.0, 80.0)));

        let ended = rec
            .process(&PointerEvent::up(10.0, 90.0), at(t0, 700))
            .expect("ended");
        assert_eq!(ended.phase, GesturePhase::Ended);
        assert_eq!(ended.start_location, Point::new(10.0, 10.0));
        assert!(rec.location().is_none());
    }

    #[test]
    fn wandering_before_begin_fails_silently() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(10.0, 10.0), t0);
        assert!(rec.process(&PointerEvent::moved(10.0, 40.0), at(t0, 100)).is_none());
        assert!(rec.check_long_press(at(t0, 700)).is_none());
    }

    #[test]
    fn small_jitter_is_tolerated() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(10.0, 10.0), t0);
        rec.process(&PointerEvent::moved(13.0, 14.0), at(t0, 100));
        let began = rec.check_long_press(at(t0, 500)).expect("began");
        assert_eq!(began.location, Point::new(13.0, 14.0));
    }

    #[test]
    fn disabling_cancels_active_gesture() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(0.0, 0.0), t0);
        rec.check_long_press(at(t0, 500));
        let cancelled = rec.set_enabled(false).expect("cancelled");
        assert_eq!(cancelled.phase, GesturePhase::Cancelled);
        assert!(rec.process(&PointerEvent::down(0.0, 0.0), at(t0, 600)).is_none());
        assert!(rec.check_long_press(at(t0, 2000)).is_none());
    }

    #[test]
    fn reset_cancels_and_stays_enabled() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(0.0, 0.0), t0);
        rec.check_long_press(at(t0, 500));
        assert!(rec.reset().is_some());
        assert!(rec.is_enabled());
        assert!(!rec.is_active());
        assert!(rec.reset().is_none(), "second reset has nothing to cancel");
        // Further moves from the same finger are ignored.
        assert!(rec.process(&PointerEvent::moved(0.0, 50.0), at(t0, 600)).is_none());
    }

    #[test]
    fn platform_cancel_emits_cancelled() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(0.0, 0.0), t0);
        rec.check_long_press(at(t0, 500));
        let g = rec.process(&PointerEvent::cancel(), at(t0, 550)).expect("cancelled");
        assert_eq!(g.phase, GesturePhase::Cancelled);
        assert!(g.phase.is_terminal());
    }

    #[test]
    fn current_reports_active_press_as_changed() {
        let mut rec = LongPressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(5.0, 5.0), t0);
        assert!(rec.current().is_none(), "pending press is not current");
        rec.check_long_press(at(t0, 500));
        rec.process(&PointerEvent::moved(5.0, 60.0), at(t0, 520));
        let g = rec.current().expect("current");
        assert_eq!(g.phase, GesturePhase::Changed);
        assert_eq!(g.location, Point::new(5.0, 60.0));
        rec.process(&PointerEvent::up(5.0, 60.0), at(t0, 540));
        assert!(rec.current().is_none());
    }

    #[test]
    fn custom_press_duration() {
        let mut rec = LongPressRecognizer::default();
        rec.set_min_press_duration(Duration::from_millis(100));
        let t0 = Instant::now();
        rec.process(&PointerEvent::down(0.0, 0.0), t0);
        assert!(rec.check_long_press(at(t0, 99)).is_none());
        assert!(rec.check_long_press(at(t0, 100)).is_some());
    }
}
