#![forbid(unsafe_code)]

//! Raw pointer input.
//!
//! Hosts translate their platform's touch or mouse events into
//! [`PointerEvent`]s. Positions are in viewport coordinates (relative to the
//! visible top-left corner of the list); the reorder shim converts them to
//! list-local coordinates by adding the current content offset.

use crate::geometry::Point;

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Primary pointer pressed (finger down, primary button down).
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// The platform took the pointer away (system gesture, window lost focus).
    Cancel,
}

/// A single-pointer input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y))
    }

    #[must_use]
    pub const fn cancel() -> Self {
        Self::new(PointerEventKind::Cancel, Point::NAN)
    }

    /// Copy of this event with the position translated by `(dx, dy)`.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            kind: self.kind,
            position: self.position.offset(dx, dy),
        }
    }
}
