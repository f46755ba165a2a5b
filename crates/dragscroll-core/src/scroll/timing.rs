//! Time calculation utilities for snap animations
//!
//! Progress is a pure function of elapsed time, so frames can be sampled
//! from explicit instants.

use std::time::Duration;

/// Progress (0.0 to 1.0) after `elapsed` of an animation lasting `duration`
#[inline]
pub fn progress_elapsed(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
