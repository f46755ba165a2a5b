use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::breakpoint::Responsive;
use crate::geometry::Axis;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Base id for the accessible attributes of dots and slides
    #[serde(default = "default_id")]
    pub id: String,
    /// Pointer-drag interaction on/off
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cap multi-slide flings to a single slide
    #[serde(default)]
    pub one_at_time: bool,
    /// Disable snapping, the container may rest at any offset
    #[serde(default)]
    pub drag_free: bool,
    /// Seconds between auto-advances (0 = disabled)
    #[serde(default)]
    pub auto_play: f64,
    /// Pause autoplay while the pointer is over the container
    #[serde(default)]
    pub pause_on_hover: bool,
    /// Scroll axis, fixed or per breakpoint
    #[serde(default = "default_axis")]
    pub axis: Responsive<Axis>,
    /// Slides per view
    pub layout: Responsive<usize>,
    /// Visible pixels of the next slide
    #[serde(default)]
    pub partial_delta: Responsive<f64>,
    /// Gap between slides in pixels
    #[serde(default)]
    pub gap: Responsive<f64>,
    /// Disable native scrolling at a breakpoint (exposed as a styling attribute)
    #[serde(default)]
    pub disable_native_scroll: Responsive<bool>,
    /// Size the container height from its slides on the vertical axis.
    /// Unset means "only when the resolved axis is `y`".
    #[serde(default)]
    pub auto_height: Option<bool>,
    /// Animation and gesture tuning
    #[serde(default)]
    pub motion: MotionConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            enabled: default_true(),
            one_at_time: false,
            drag_free: false,
            auto_play: 0.0,
            pause_on_hover: false,
            axis: default_axis(),
            layout: Responsive::fixed(1),
            partial_delta: Responsive::default(),
            gap: Responsive::default(),
            disable_native_scroll: Responsive::default(),
            auto_height: None,
            motion: MotionConfig::default(),
        }
    }
}

/// Easing curve used for snap animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the target on the last frame
    None,
    Linear,
    /// Soft ease-out, `1 - (1 - t)^3.5`
    #[default]
    Glide,
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Snap animation duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate the host is expected to tick at while animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Time the animation guard stays set after an animation completes
    #[serde(default = "default_guard_grace")]
    pub guard_grace_ms: u64,
    /// Delay between `navigate` and the change event it produces
    #[serde(default = "default_navigate_settle")]
    pub navigate_settle_ms: u64,
    /// Pointer travel below which a gesture is treated as a click
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f64,
    /// Upper bound of the fling speed multiplier
    #[serde(default = "default_max_speed_multiplier")]
    pub max_speed_multiplier: f64,
    /// Fraction of a slide removed from the snap stride when converting a
    /// fling into a slide count
    #[serde(default = "default_overshoot_ratio")]
    pub overshoot_ratio: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            guard_grace_ms: default_guard_grace(),
            navigate_settle_ms: default_navigate_settle(),
            drag_threshold_px: default_drag_threshold(),
            max_speed_multiplier: default_max_speed_multiplier(),
            overshoot_ratio: default_overshoot_ratio(),
        }
    }
}

/// Partial configuration applied with `Carousel::update`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarouselUpdate {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub one_at_time: Option<bool>,
    #[serde(default)]
    pub drag_free: Option<bool>,
    #[serde(default)]
    pub auto_play: Option<f64>,
    #[serde(default)]
    pub pause_on_hover: Option<bool>,
    #[serde(default)]
    pub axis: Option<Responsive<Axis>>,
    #[serde(default)]
    pub layout: Option<Responsive<usize>>,
    #[serde(default)]
    pub partial_delta: Option<Responsive<f64>>,
    #[serde(default)]
    pub gap: Option<Responsive<f64>>,
    #[serde(default)]
    pub auto_height: Option<bool>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub disable_native_scroll: Option<Responsive<bool>>,
    /// Replaces the whole motion table
    #[serde(default)]
    pub motion: Option<MotionConfig>,
}

fn default_id() -> String {
    "carousel".to_string()
}

fn default_true() -> bool {
    true
}

fn default_axis() -> Responsive<Axis> {
    Responsive::fixed(Axis::X)
}

fn default_animation_duration() -> u64 {
    1000
}

fn default_animation_fps() -> u32 {
    60
}

fn default_guard_grace() -> u64 {
    110
}

fn default_navigate_settle() -> u64 {
    1010 // leaves room for a native smooth scroll to finish
}

fn default_drag_threshold() -> f64 {
    10.0
}

fn default_max_speed_multiplier() -> f64 {
    3.0
}

fn default_overshoot_ratio() -> f64 {
    0.25
}

impl CarouselConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load_default() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/dragscroll/carousel.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("dragscroll")
            .join("carousel.toml")
    }

    /// Reject values the engine cannot lay out
    pub fn validate(&self) -> crate::Result<()> {
        if self.layout.values().any(|spv| spv == 0) {
            return Err(crate::Error::Config(
                "layout entries must be at least 1 slide per view".to_string(),
            ));
        }
        if !self.auto_play.is_finite() || self.auto_play < 0.0 {
            return Err(crate::Error::Config(format!(
                "auto_play must be a non-negative number of seconds, got {}",
                self.auto_play
            )));
        }
        for (name, map) in [("partial_delta", &self.partial_delta), ("gap", &self.gap)] {
            if map.values().any(|v| !v.is_finite() || v < 0.0) {
                return Err(crate::Error::Config(format!(
                    "{} entries must be non-negative pixel values",
                    name
                )));
            }
        }
        if !(0.0..1.0).contains(&self.motion.overshoot_ratio) {
            return Err(crate::Error::Config(format!(
                "motion.overshoot_ratio must be in [0, 1), got {}",
                self.motion.overshoot_ratio
            )));
        }
        Ok(())
    }

    /// Autoplay is active when a positive interval is configured
    pub fn autoplay_enabled(&self) -> bool {
        self.auto_play > 0.0
    }

    /// Merge a partial update into this configuration
    pub fn apply(&mut self, update: CarouselUpdate) {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        if let Some(one_at_time) = update.one_at_time {
            self.one_at_time = one_at_time;
        }
        if let Some(drag_free) = update.drag_free {
            self.drag_free = drag_free;
        }
        if let Some(auto_play) = update.auto_play {
            self.auto_play = auto_play;
        }
        if let Some(pause_on_hover) = update.pause_on_hover {
            self.pause_on_hover = pause_on_hover;
        }
        if let Some(axis) = update.axis {
            self.axis = axis;
        }
        if let Some(layout) = update.layout {
            self.layout = layout;
        }
        if let Some(partial_delta) = update.partial_delta {
            self.partial_delta = partial_delta;
        }
        if let Some(gap) = update.gap {
            self.gap = gap;
        }
        if update.auto_height.is_some() {
            self.auto_height = update.auto_height;
        }
        if let Some(id) = update.id {
            self.id = id;
        }
        if let Some(disable_native_scroll) = update.disable_native_scroll {
            self.disable_native_scroll = disable_native_scroll;
        }
        if let Some(motion) = update.motion {
            self.motion = motion;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::Breakpoint;

    #[test]
    fn test_minimal_config() {
        let config = CarouselConfig::from_toml_str("layout = 3").unwrap();
        assert!(config.enabled);
        assert!(!config.drag_free);
        assert_eq!(config.id, "carousel");
        assert_eq!(config.layout.resolve(1400.0, 1), 3);
        assert_eq!(config.axis.resolve(1400.0, Axis::Y), Axis::X);
        assert_eq!(config.motion.animation_duration_ms, 1000);
        assert_eq!(config.motion.guard_grace_ms, 110);
        assert_eq!(config.motion.navigate_settle_ms, 1010);
        assert_eq!(config.motion.easing, EasingType::Glide);
    }

    #[test]
    fn test_layout_is_required() {
        let err = CarouselConfig::from_toml_str("enabled = true").unwrap_err();
        assert!(matches!(err, crate::Error::Toml(_)));
    }

    #[test]
    fn test_full_config() {
        let content = r#"
            id = "gallery"
            one_at_time = true
            auto_play = 2.5
            pause_on_hover = true
            axis = { default = "x", xs = "y" }
            layout = { default = 3, sm = 2, xs = 1 }
            partial_delta = { default = 40 }

            [motion]
            easing = "quintic"
            navigate_settle_ms = 400
        "#;
        let config = CarouselConfig::from_toml_str(content).unwrap();
        assert_eq!(config.id, "gallery");
        assert!(config.autoplay_enabled());
        assert_eq!(config.axis.resolve_at(Breakpoint::Xs, Axis::X), Axis::Y);
        assert_eq!(config.layout.resolve_at(Breakpoint::Sm, 1), 2);
        assert_eq!(config.layout.resolve_at(Breakpoint::Xl, 1), 3);
        assert_eq!(config.partial_delta.resolve_at(Breakpoint::Md, 0.0), 40.0);
        assert_eq!(config.motion.easing, EasingType::Quintic);
        assert_eq!(config.motion.navigate_settle_ms, 400);
        assert_eq!(config.motion.guard_grace_ms, 110);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(CarouselConfig::from_toml_str("layout = 0").is_err());
        assert!(CarouselConfig::from_toml_str("layout = 1\nauto_play = -1.0").is_err());
        assert!(CarouselConfig::from_toml_str("layout = 1\ngap = { md = -4.0 }").is_err());
    }

    #[test]
    fn test_apply_update() {
        let mut config = CarouselConfig {
            auto_play: 3.0,
            ..Default::default()
        };
        config.apply(CarouselUpdate {
            enabled: Some(false),
            auto_play: Some(0.0),
            ..Default::default()
        });
        assert!(!config.enabled);
        assert!(!config.autoplay_enabled());
        assert_eq!(config.layout.resolve(1000.0, 0), 1);

        config.apply(CarouselUpdate {
            id: Some("hero".to_string()),
            disable_native_scroll: Some(Responsive::fixed(false).with(Breakpoint::Xs, true)),
            motion: Some(MotionConfig {
                navigate_settle_ms: 300,
                easing: EasingType::Linear,
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(config.id, "hero");
        assert!(config.disable_native_scroll.resolve_at(Breakpoint::Xs, false));
        assert!(!config.disable_native_scroll.resolve_at(Breakpoint::Lg, true));
        assert_eq!(config.motion.navigate_settle_ms, 300);
        assert_eq!(config.motion.easing, EasingType::Linear);
        assert_eq!(config.motion.guard_grace_ms, 110);
        // untouched by the second update
        assert!(!config.enabled);
    }

    #[test]
    fn test_update_deserializes_partial_motion() {
        let update: CarouselUpdate =
            serde_json::from_str(r#"{ "id": "x", "motion": { "animation_duration_ms": 250 } }"#)
                .unwrap();
        let motion = update.motion.unwrap();
        assert_eq!(motion.animation_duration_ms, 250);
        assert_eq!(motion.navigate_settle_ms, 1010);
        assert_eq!(update.id.as_deref(), Some("x"));
    }
}
