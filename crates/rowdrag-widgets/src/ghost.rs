#![forbid(unsafe_code)]

//! The floating snapshot of the dragged row, and its transitions.
//!
//! A [`GhostView`] is pure data: the host draws it wherever it draws
//! overlays. Its [`GhostPose`] (unscaled frame, scale, style) is what
//! transitions interpolate.
//!
//! # Transitions
//!
//! Lift and drop are two-phase: [`GhostTransition::new`] starts the visual
//! change and [`GhostTransition::apply`] samples it on each frame. Completion
//! is detected by the owner, which then runs its cleanup. With animations
//! disabled the owner applies the target pose directly and runs cleanup
//! without ever creating a transition.

use std::time::Duration;

use rowdrag_core::animation::{Animation, Tween};
use rowdrag_core::config::GhostStyle;
use rowdrag_core::geometry::{Point, Rect};
use rowdrag_core::row::RowIndex;
use web_time::Instant;

/// Geometry and styling of the ghost at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPose {
    /// Unscaled frame (the source row's size).
    pub frame: Rect,
    /// Scale applied around the frame's center.
    pub scale: f64,
    pub style: GhostStyle,
}

impl GhostPose {
    /// The resting pose of a row: its own frame, unscaled, flat.
    #[must_use]
    pub fn resting(frame: Rect) -> Self {
        Self {
            frame,
            scale: 1.0,
            style: GhostStyle::FLAT,
        }
    }

    /// Interpolate toward `to`.
    #[must_use]
    pub fn lerp(&self, to: &GhostPose, t: f64) -> GhostPose {
        GhostPose {
            frame: self.frame.lerp(&to.frame, t),
            scale: self.scale * (1.0 - t) + to.scale * t,
            style: self.style.lerp(&to.style, t),
        }
    }
}

/// The floating representation of the dragged row.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostView<C> {
    content: C,
    source: RowIndex,
    pose: GhostPose,
}

impl<C> GhostView<C> {
    /// Create a ghost resting exactly over `frame`.
    #[must_use]
    pub fn new(content: C, source: RowIndex, frame: Rect) -> Self {
        Self {
            content,
            source,
            pose: GhostPose::resting(frame),
        }
    }

    /// Snapshot content.
    #[inline]
    pub fn content(&self) -> &C {
        &self.content
    }

    /// The row the ghost was lifted from.
    #[inline]
    pub fn source(&self) -> RowIndex {
        self.source
    }

    #[inline]
    pub fn pose(&self) -> &GhostPose {
        &self.pose
    }

    pub fn set_pose(&mut self, pose: GhostPose) {
        self.pose = pose;
    }

    /// Frame as drawn, with the scale applied.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.pose.frame.scaled(self.pose.scale)
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.pose.scale
    }

    #[inline]
    pub fn style(&self) -> &GhostStyle {
        &self.pose.style
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.pose.frame.center()
    }

    /// Height as drawn.
    #[inline]
    pub fn visual_height(&self) -> f64 {
        self.pose.frame.height * self.pose.scale
    }

    /// Move the ghost so its center is at `y`, keeping `x`.
    pub fn set_center_y(&mut self, y: f64) {
        let center = Point::new(self.pose.frame.center().x, y);
        self.pose.frame = self.pose.frame.with_center(center);
    }
}

/// Which way the ghost is going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Row → floating.
    Lift,
    /// Floating → resting row.
    Drop,
}

/// A time-based interpolation between two ghost poses.
#[derive(Debug, Clone)]
pub struct GhostTransition {
    kind: TransitionKind,
    from: GhostPose,
    to: GhostPose,
    started: Instant,
    tween: Tween,
}

impl GhostTransition {
    /// Start a transition at `now`.
    #[must_use]
    pub fn new(
        kind: TransitionKind,
        from: GhostPose,
        to: GhostPose,
        now: Instant,
        duration: Duration,
    ) -> Self {
        Self {
            kind,
            from,
            to,
            started: now,
            tween: Tween::new(duration),
        }
    }

    #[inline]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    #[inline]
    pub fn target(&self) -> &GhostPose {
        &self.to
    }

    /// Keep tracking the pointer while a lift is still playing.
    pub fn retarget_center_y(&mut self, y: f64) {
        let center = Point::new(self.to.frame.center().x, y);
        self.to.frame = self.to.frame.with_center(center);
    }

    /// Sample the transition at `now` onto `ghost`.
    pub fn apply<C>(&mut self, now: Instant, ghost: &mut GhostView<C>) {
        self.tween.reset();
        self.tween.tick(now.saturating_duration_since(self.started));
        ghost.set_pose(self.from.lerp(&self.to, self.tween.value()));
    }

    /// Jump to the end pose.
    pub fn finish<C>(&mut self, ghost: &mut GhostView<C>) {
        self.tween.finish();
        ghost.set_pose(self.to);
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lifted(frame: Rect) -> GhostPose {
        GhostPose {
            frame,
            scale: 1.1,
            style: GhostStyle::default(),
        }
    }

    #[test]
    fn new_ghost_rests_over_row() {
        let rect = Rect::new(0.0, 88.0, 320.0, 44.0);
        let ghost = GhostView::new("row 2", RowIndex::row(2), rect);
        assert_eq!(ghost.frame(), rect);
        assert_eq!(ghost.scale(), 1.0);
        assert_eq!(*ghost.style(), GhostStyle::FLAT);
        assert_eq!(*ghost.content(), "row 2");
    }

    #[test]
    fn scaled_frame_shares_center() {
        let rect = Rect::new(0.0, 88.0, 320.0, 44.0);
        let mut ghost = GhostView::new((), RowIndex::row(2), rect);
        ghost.set_pose(lifted(rect));
        assert_eq!(ghost.frame().center(), rect.center());
        assert!((ghost.visual_height() - 48.4).abs() < 1e-9);
    }

    #[test]
    fn transition_samples_then_completes() {
        let rect = Rect::new(0.0, 0.0, 320.0, 44.0);
        let target = lifted(rect.with_center(Point::new(160.0, 200.0)));
        let t0 = Instant::now();
        let mut transition = GhostTransition::new(
            TransitionKind::Lift,
            GhostPose::resting(rect),
            target,
            t0,
            Duration::from_millis(300),
        );
        let mut ghost = GhostView::new((), RowIndex::row(0), rect);

        transition.apply(t0 + Duration::from_millis(100), &mut ghost);
        assert!(!transition.is_complete());
        assert!(ghost.center().y > 22.0 && ghost.center().y < 200.0);

        transition.apply(t0 + Duration::from_millis(300), &mut ghost);
        assert!(transition.is_complete());
        assert_eq!(*ghost.pose(), target);
    }

    #[test]
    fn retarget_moves_end_pose() {
        let rect = Rect::new(0.0, 0.0, 320.0, 44.0);
        let t0 = Instant::now();
        let mut transition = GhostTransition::new(
            TransitionKind::Lift,
            GhostPose::resting(rect),
            lifted(rect),
            t0,
            Duration::from_millis(300),
        );
        transition.retarget_center_y(150.0);
        let mut ghost = GhostView::new((), RowIndex::row(0), rect);
        transition.finish(&mut ghost);
        assert_eq!(ghost.center().y, 150.0);
        assert_eq!(transition.kind(), TransitionKind::Lift);
    }
}
