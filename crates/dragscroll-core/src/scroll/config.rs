//! Duration helpers over `MotionConfig`

use std::time::Duration;

pub use crate::config::MotionConfig;

/// Extension trait for MotionConfig with utility methods
pub trait MotionConfigExt {
    /// Snap animation duration
    fn animation_duration(&self) -> Duration;

    /// Interval between animation frames
    fn frame_interval(&self) -> Duration;

    /// How long the animation guard outlives the animation
    fn guard_grace(&self) -> Duration;

    /// Delay between `navigate` and its change event
    fn navigate_settle(&self) -> Duration;
}

impl MotionConfigExt for MotionConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn frame_interval(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn guard_grace(&self) -> Duration {
        Duration::from_millis(self.guard_grace_ms)
    }

    #[inline]
    fn navigate_settle(&self) -> Duration {
        Duration::from_millis(self.navigate_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let config = MotionConfig::default();
        assert_eq!(config.animation_duration(), Duration::from_millis(1000));
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.guard_grace(), Duration::from_millis(110));
        assert_eq!(config.navigate_settle(), Duration::from_millis(1010));
    }

    #[test]
    fn test_zero_fps_falls_back() {
        let config = MotionConfig {
            animation_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }
}
