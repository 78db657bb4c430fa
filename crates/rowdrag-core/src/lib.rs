#![forbid(unsafe_code)]

//! Core: geometry, pointer input, long-press recognition and scroll math.
//!
//! # Role in rowdrag
//! `rowdrag-core` holds everything the reorder interaction needs that does not
//! depend on a list host: plain geometry, the long-press recognizer that turns
//! raw pointer events into a press-and-drag gesture, the scroll-zone helper,
//! the auto-scroll ticker and the tween used by ghost transitions.
//!
//! # How it fits in the system
//! `rowdrag-widgets` builds the reorder state machine on top of these pieces
//! and talks to the host list through traits. Nothing in this crate draws or
//! owns a clock; callers pass `Instant`s and `Duration`s in.

pub mod animation;
pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod row;
pub mod scroll;
pub mod ticker;

pub use config::{GhostStyle, ReorderConfig};
pub use geometry::{Insets, Point, Rect, Size};
pub use row::RowIndex;

// Re-export web-time so hosts construct the same `Instant` type.
pub use web_time::Instant;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
