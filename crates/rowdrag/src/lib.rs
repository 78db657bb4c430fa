#![forbid(unsafe_code)]

//! rowdrag public facade crate.
//!
//! Re-exports the types most hosts need from `rowdrag-core` and
//! `rowdrag-widgets`, a prelude, and JSON loading for [`ReorderConfig`].
//!
//! ```
//! use rowdrag::prelude::*;
//!
//! let config = rowdrag::config_from_json(r#"{ "lift_scale": 1.05 }"#)?;
//! let list = MemoryList::uniform(["a", "b"], 44.0, Size::new(320.0, 480.0));
//! let data = VecDataSource::new(vec!["a", "b"]);
//! let reorder = ReorderList::new(list, data).with_config(config);
//! assert_eq!(reorder.config().lift_scale, 1.05);
//! # Ok::<(), rowdrag::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use rowdrag_core::Instant;
pub use rowdrag_core::config::{GhostStyle, ReorderConfig};
pub use rowdrag_core::event::{PointerEvent, PointerEventKind};
pub use rowdrag_core::geometry::{Insets, Point, Rect, Size};
pub use rowdrag_core::gesture::{GesturePhase, LongPressConfig, LongPressRecognizer, PressGesture};
pub use rowdrag_core::row::RowIndex;
pub use rowdrag_core::scroll::ScrollMetrics;

#[cfg(feature = "tracing-json")]
pub use rowdrag_core::logging::init_json_logging;

// --- Widget re-exports -----------------------------------------------------

pub use rowdrag_widgets::{
    Disposition, GhostView, ListHost, MemoryList, MemoryRow, NoFeedback, NoopDelegate,
    RejectReason, ReorderController, ReorderDataSource, ReorderDelegate, ReorderEnv, ReorderList,
    RowAnimation, SelectionFeedback, VecDataSource,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for rowdrag.
#[derive(Debug)]
pub enum Error {
    /// The configuration text could not be parsed.
    Config(serde_json::Error),
    /// The configuration parsed but a value is out of range.
    Invalid(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid reorder config: {err}"),
            Self::Invalid(msg) => write!(f, "invalid reorder config: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for rowdrag APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Configuration --------------------------------------------------------

/// Parse a [`ReorderConfig`] from JSON. Missing fields take their defaults.
pub fn config_from_json(text: &str) -> Result<ReorderConfig> {
    let config: ReorderConfig = serde_json::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Serialize a [`ReorderConfig`] as pretty-printed JSON.
pub fn config_to_json(config: &ReorderConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

fn validate(config: &ReorderConfig) -> Result<()> {
    if !(config.lift_scale.is_finite() && config.lift_scale > 0.0) {
        return Err(Error::Invalid(format!(
            "lift_scale must be positive, got {}",
            config.lift_scale
        )));
    }
    if !(config.scroll_step.is_finite() && config.scroll_step >= 0.0) {
        return Err(Error::Invalid(format!(
            "scroll_step must be non-negative, got {}",
            config.scroll_step
        )));
    }
    let movement = config.press.allowable_movement;
    if movement.is_nan() || movement < 0.0 {
        return Err(Error::Invalid(format!(
            "press.allowable_movement must be non-negative, got {movement}"
        )));
    }
    if config.frame_interval.is_zero() {
        return Err(Error::Invalid("frame_interval must be non-zero".to_string()));
    }
    Ok(())
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, GesturePhase, Instant, ListHost, MemoryList, MemoryRow, PointerEvent, PressGesture,
        ReorderConfig, ReorderDataSource, ReorderDelegate, ReorderList, Result, RowIndex,
        SelectionFeedback, Size, VecDataSource,
    };

    pub use crate::{core, widgets};
}

pub use rowdrag_core as core;
pub use rowdrag_widgets as widgets;
