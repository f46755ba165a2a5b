//! Snap animation and the single-flight driver
//!
//! `SnapAnimation` interpolates the scroll offset over elapsed time. Its start
//! instant is pinned by the first frame that samples it, the same way a frame
//! callback receives its first timestamp. `AnimationDriver` owns at most one
//! animation plus the grace period after it, and refuses new work while busy.

use std::time::{Duration, Instant};

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{lerp, progress_elapsed};

/// One sampled animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub offset: f64,
    pub finished: bool,
}

/// Eased interpolation between two scroll offsets
#[derive(Debug, Clone)]
pub struct SnapAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
    started: Option<Instant>,
}

impl SnapAnimation {
    pub fn new(from: f64, to: f64, duration: Duration, easing: EasingType) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            started: None,
        }
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    /// Offset after `elapsed`; exactly `to` once the duration has passed
    pub fn sample(&self, elapsed: Duration) -> f64 {
        let t = progress_elapsed(elapsed, self.duration);
        if t >= 1.0 {
            self.to
        } else {
            lerp(self.from, self.to, self.easing.apply(t))
        }
    }

    /// Advance to `now`, pinning the start on the first call
    pub fn step(&mut self, now: Instant) -> Frame {
        let start = *self.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(start);
        Frame {
            offset: self.sample(elapsed),
            finished: elapsed >= self.duration,
        }
    }

    /// Offsets sampled at a fixed frame interval, ending on `to`
    pub fn frames(&self, interval: Duration) -> Frames {
        Frames {
            animation: SnapAnimation {
                started: None,
                ..self.clone()
            },
            interval: if interval.is_zero() { self.duration } else { interval },
            elapsed: Duration::ZERO,
            done: false,
        }
    }
}

/// Iterator over the offsets of a `SnapAnimation`
#[derive(Debug, Clone)]
pub struct Frames {
    animation: SnapAnimation,
    interval: Duration,
    elapsed: Duration,
    done: bool,
}

impl Iterator for Frames {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        if self.elapsed >= self.animation.duration || self.interval.is_zero() {
            self.done = true;
            return Some(self.animation.to);
        }
        let offset = self.animation.sample(self.elapsed);
        self.elapsed += self.interval;
        Some(offset)
    }
}

/// Busy guard around a single in-flight animation
#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    active: Option<SnapAnimation>,
    release_at: Option<Instant>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animating, or still inside the grace period after the last animation
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.active.is_some() || self.release_at.is_some()
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Target offset of the animation in flight
    pub fn target(&self) -> Option<f64> {
        self.active.as_ref().map(SnapAnimation::to)
    }

    /// Start `animation` unless another one holds the guard
    pub fn try_start(&mut self, animation: SnapAnimation) -> bool {
        if self.is_busy() {
            return false;
        }
        self.active = Some(animation);
        true
    }

    /// Sample the active animation; the last frame clears it
    pub fn step(&mut self, now: Instant) -> Option<Frame> {
        let frame = self.active.as_mut()?.step(now);
        if frame.finished {
            self.active = None;
        }
        Some(frame)
    }

    /// Keep the guard set until `at`
    pub fn hold_until(&mut self, at: Instant) {
        self.release_at = Some(at);
    }

    /// Release the guard if its grace period is over
    pub fn release_due(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(at) if now >= at => {
                self.release_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn release_deadline(&self) -> Option<Instant> {
        self.release_at
    }
}
