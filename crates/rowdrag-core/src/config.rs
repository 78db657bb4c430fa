#![forbid(unsafe_code)]

//! Reorder configuration.
//!
//! [`ReorderConfig`] is plain data with `Default` values matching the
//! classic long-press reorder behavior and `with_*` builders for overrides.
//! With the `serde` feature it round-trips through any serde format; missing
//! fields fall back to their defaults.

use std::time::Duration;

use crate::gesture::LongPressConfig;
use crate::scroll::DEFAULT_SCROLL_STEP;
use crate::ticker::DEFAULT_FRAME_INTERVAL;

/// Visual styling applied to the ghost once it is lifted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GhostStyle {
    /// Opacity of the ghost content (default: 0.85).
    pub opacity: f64,
    /// Drop-shadow blur radius (default: 4.0).
    pub shadow_radius: f64,
    /// Drop-shadow opacity (default: 0.7).
    pub shadow_opacity: f64,
    /// Drop-shadow offset (default: none).
    pub shadow_offset: (f64, f64),
    /// Drop-shadow color as `0xRRGGBBAA` (default: opaque black).
    pub shadow_color: u32,
}

impl GhostStyle {
    /// The style of a row that has not been lifted: fully opaque, no shadow.
    pub const FLAT: Self = Self {
        opacity: 1.0,
        shadow_radius: 0.0,
        shadow_opacity: 0.0,
        shadow_offset: (0.0, 0.0),
        shadow_color: 0x0000_00FF,
    };

    /// Interpolate every numeric field toward `to` (`t` in `[0, 1]`).
    #[must_use]
    pub fn lerp(&self, to: &GhostStyle, t: f64) -> GhostStyle {
        let mix = |a: f64, b: f64| a * (1.0 - t) + b * t;
        GhostStyle {
            opacity: mix(self.opacity, to.opacity),
            shadow_radius: mix(self.shadow_radius, to.shadow_radius),
            shadow_opacity: mix(self.shadow_opacity, to.shadow_opacity),
            shadow_offset: (
                mix(self.shadow_offset.0, to.shadow_offset.0),
                mix(self.shadow_offset.1, to.shadow_offset.1),
            ),
            shadow_color: to.shadow_color,
        }
    }
}

impl Default for GhostStyle {
    fn default() -> Self {
        Self {
            opacity: 0.85,
            shadow_radius: 4.0,
            shadow_opacity: 0.7,
            shadow_offset: (0.0, 0.0),
            shadow_color: 0x0000_00FF,
        }
    }
}

/// Everything tunable about the reorder interaction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderConfig {
    /// Master switch for the long-press gesture (default: true).
    pub enabled: bool,
    /// Long-press recognition thresholds.
    pub press: LongPressConfig,
    /// Content-offset step per auto-scroll tick at full rate (default: 10.0).
    pub scroll_step: f64,
    /// Auto-scroll tick interval (default: 1/60 s).
    pub frame_interval: Duration,
    /// Scale applied to the lifted ghost (default: 1.1).
    pub lift_scale: f64,
    /// Duration of the lift and drop transitions (default: 300ms).
    pub animation_duration: Duration,
    /// When false, lift and drop are applied instantly (default: true).
    ///
    /// Intended for tests and reduced-motion settings; teardown still runs.
    pub animations_enabled: bool,
    /// Styling of the lifted ghost.
    pub ghost_style: GhostStyle,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            press: LongPressConfig::default(),
            scroll_step: DEFAULT_SCROLL_STEP,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            lift_scale: 1.1,
            animation_duration: Duration::from_millis(300),
            animations_enabled: true,
            ghost_style: GhostStyle::default(),
        }
    }
}

impl ReorderConfig {
    /// Set whether the gesture is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the minimum press duration.
    #[must_use]
    pub fn with_min_press_duration(mut self, duration: Duration) -> Self {
        self.press.min_press_duration = duration;
        self
    }

    /// Set the allowable pre-press movement.
    #[must_use]
    pub fn with_allowable_movement(mut self, distance: f64) -> Self {
        self.press.allowable_movement = distance;
        self
    }

    /// Set the auto-scroll step.
    #[must_use]
    pub fn with_scroll_step(mut self, step: f64) -> Self {
        self.scroll_step = step;
        self
    }

    /// Set the auto-scroll tick interval.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Set the lift scale.
    #[must_use]
    pub fn with_lift_scale(mut self, scale: f64) -> Self {
        self.lift_scale = scale;
        self
    }

    /// Set the transition duration.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Disable lift/drop transitions.
    #[must_use]
    pub fn without_animations(mut self) -> Self {
        self.animations_enabled = false;
        self
    }

    /// Set the lifted ghost style.
    #[must_use]
    pub fn with_ghost_style(mut self, style: GhostStyle) -> Self {
        self.ghost_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_behavior() {
        let config = ReorderConfig::default();
        assert!(config.enabled);
        assert_eq!(config.press.min_press_duration, Duration::from_millis(500));
        assert_eq!(config.scroll_step, 10.0);
        assert_eq!(config.lift_scale, 1.1);
        assert_eq!(config.animation_duration, Duration::from_millis(300));
        assert!(config.animations_enabled);
        assert_eq!(config.ghost_style.opacity, 0.85);
        assert_eq!(config.ghost_style.shadow_radius, 4.0);
        assert_eq!(config.ghost_style.shadow_opacity, 0.7);
    }

    #[test]
    fn builders_override_fields() {
        let config = ReorderConfig::default()
            .with_enabled(false)
            .with_min_press_duration(Duration::from_millis(200))
            .with_scroll_step(25.0)
            .without_animations();
        assert!(!config.enabled);
        assert_eq!(config.press.min_press_duration, Duration::from_millis(200));
        assert_eq!(config.scroll_step, 25.0);
        assert!(!config.animations_enabled);
    }

    #[test]
    fn style_lerp_endpoints() {
        let lifted = GhostStyle::default();
        assert_eq!(GhostStyle::FLAT.lerp(&lifted, 0.0).opacity, 1.0);
        assert_eq!(GhostStyle::FLAT.lerp(&lifted, 1.0), lifted);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let config: ReorderConfig =
            serde_json::from_str(r#"{ "enabled": false, "scroll_step": 12.5 }"#).expect("parse");
        assert!(!config.enabled);
        assert_eq!(config.scroll_step, 12.5);
        assert_eq!(config.lift_scale, 1.1);
    }
}
