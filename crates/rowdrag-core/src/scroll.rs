#![forbid(unsafe_code)]

//! Scroll-zone and ghost-placement math.
//!
//! Pure functions over the list's viewport, content size and insets. All
//! inputs are list-local: the viewport's origin is the current content
//! offset.
//!
//! # Scroll zones
//!
//! ```text
//!   offset.y + inset.top ┬──────────────┐
//!                        │   top zone   │  rate -1 .. 0
//!                        ├──────────────┤  ← top_begin
//!                        │              │  rate 0
//!                        ├──────────────┤  ← bottom_begin
//!                        │ bottom zone  │  rate 0 .. +1
//!                        └──────────────┘
//! ```
//!
//! Each zone is one sixth of the visible height (viewport height minus the
//! top inset).

use crate::geometry::{Insets, Point, Size};

/// Each scroll zone covers `1 / SCROLL_ZONE_DIVISOR` of the visible height.
pub const SCROLL_ZONE_DIVISOR: f64 = 6.0;

/// Default content-offset step per tick at full scroll rate.
pub const DEFAULT_SCROLL_STEP: f64 = 10.0;

/// The list geometry the scroll helper needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current content offset (top-left of the visible region).
    pub offset: Point,
    /// Size of the visible region.
    pub viewport: Size,
    /// Total size of the scrollable content.
    pub content: Size,
    pub inset: Insets,
}

/// Top and bottom zone boundaries for the current metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollZones {
    /// Height of each zone.
    pub zone_height: f64,
    /// Pointer `y` at or above which the top zone applies.
    pub top_begin: f64,
    /// Pointer `y` at or below which the bottom zone applies.
    pub bottom_begin: f64,
}

impl ScrollMetrics {
    /// Visible height available for scroll zones.
    #[inline]
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.viewport.height - self.inset.top
    }

    /// Compute the zone boundaries.
    #[must_use]
    pub fn zones(&self) -> ScrollZones {
        let visible = self.visible_height();
        let zone_height = visible / SCROLL_ZONE_DIVISOR;
        let top = self.offset.y + self.inset.top;
        ScrollZones {
            zone_height,
            top_begin: top + zone_height,
            bottom_begin: top + visible - zone_height,
        }
    }

    /// Signed scroll rate for a pointer at `y`.
    ///
    /// `0` between the zones, growing linearly to `-1` at the top edge and
    /// `+1` at the bottom edge. Past the edges the rate stays saturated.
    #[must_use]
    pub fn scroll_rate(&self, y: f64) -> f64 {
        let zones = self.zones();
        if y.is_nan() || zones.zone_height <= 0.0 {
            return 0.0;
        }
        let rate = if y >= zones.bottom_begin {
            (y - zones.bottom_begin) / zones.zone_height
        } else if y <= zones.top_begin {
            (y - zones.top_begin) / zones.zone_height
        } else {
            0.0
        };
        rate.clamp(-1.0, 1.0)
    }

    /// Largest content offset that still shows content.
    #[inline]
    #[must_use]
    pub fn max_offset_y(&self) -> f64 {
        self.content.height + self.inset.bottom - self.viewport.height
    }

    /// Smallest content offset (scrolled all the way up into the top inset).
    #[inline]
    #[must_use]
    pub fn min_offset_y(&self) -> f64 {
        -self.inset.top
    }

    /// True if the content does not fill the viewport, so nothing can scroll.
    #[inline]
    #[must_use]
    pub fn is_content_short(&self) -> bool {
        self.content.height + self.inset.bottom < self.viewport.height
    }

    /// Offset after one auto-scroll tick of `step * rate`.
    ///
    /// The offset is left untouched when the content is shorter than the
    /// viewport; otherwise it is clamped to `[min_offset_y, max_offset_y]`.
    #[must_use]
    pub fn next_offset(&self, rate: f64, step: f64) -> Point {
        if self.is_content_short() || rate == 0.0 || rate.is_nan() {
            return self.offset;
        }
        let min = self.min_offset_y();
        let y = (self.offset.y + rate * step).clamp(min, self.max_offset_y().max(min));
        Point::new(self.offset.x, y)
    }
}

/// Vertical center for the ghost so that its full height stays inside
/// `[0, content_height]`.
///
/// A ghost taller than the content is centered on the content.
#[must_use]
pub fn ghost_center_y(pointer_y: f64, ghost_height: f64, content_height: f64) -> f64 {
    let half = ghost_height / 2.0;
    let lo = half;
    let hi = content_height - half;
    if hi < lo {
        return content_height / 2.0;
    }
    if pointer_y.is_nan() {
        return lo;
    }
    pointer_y.clamp(lo, hi)
}
