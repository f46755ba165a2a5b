//! Pointer-drag state machine and fling resolution
//!
//! Idle -> Dragging on a primary press, one-to-one drag-to-scroll while
//! dragging, and back to Idle on release. The release is turned into either a
//! slide delta (snap mode) or a raw travel distance (drag-free mode).

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::MotionConfig;
use crate::geometry::{Axis, Point};

/// Which way a release moves the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Pointer moved toward the origin, content advances
    Forward,
    /// Pointer moved away from the origin, content goes back
    Backward,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    started_at: Instant,
    start: Point,
    current: Point,
    start_scroll: f64,
    target: Option<usize>,
}

/// Offset to apply for a pointer move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMove {
    pub offset: f64,
    /// Slide whose click should be suppressed, once the drag passes the threshold
    pub suppress: Option<usize>,
}

/// Raw measurements of a finished drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragMeasure {
    /// Distance on the active axis
    pub distance: f64,
    /// Distance on the other axis
    pub cross_distance: f64,
    pub elapsed: Duration,
    pub direction: Direction,
}

/// Inputs that turn a measured drag into an outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingParams {
    pub stride: f64,
    pub drag_free: bool,
    pub one_at_time: bool,
    pub threshold: f64,
    pub max_multiplier: f64,
    pub overshoot_ratio: f64,
}

impl FlingParams {
    pub fn new(motion: &MotionConfig, stride: f64, drag_free: bool, one_at_time: bool) -> Self {
        Self {
            stride,
            drag_free,
            one_at_time,
            threshold: motion.drag_threshold_px,
            max_multiplier: motion.max_speed_multiplier,
            overshoot_ratio: motion.overshoot_ratio,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ReleaseOutcome {
    /// Too short, or mostly across the active axis
    Click,
    /// Move `delta` slides in `direction`
    Snap { delta: usize, direction: Direction },
    /// Glide `distance` pixels further in `direction`
    Free { distance: f64, direction: Direction },
}

/// Turn a measured drag into a release outcome
pub fn resolve_release(measure: &DragMeasure, params: &FlingParams) -> ReleaseOutcome {
    if measure.distance <= params.threshold || measure.distance <= measure.cross_distance {
        return ReleaseOutcome::Click;
    }

    let elapsed_ms = measure.elapsed.as_secs_f64().max(0.001) * 1000.0;
    let velocity = measure.distance / elapsed_ms;
    let multiplier = velocity.sqrt().clamp(0.0, params.max_multiplier).ceil();

    if params.drag_free {
        return ReleaseOutcome::Free {
            distance: measure.distance * multiplier,
            direction: measure.direction,
        };
    }

    let effective = params.stride * (1.0 - params.overshoot_ratio);
    if effective <= 0.0 {
        return ReleaseOutcome::Click;
    }
    let travel = measure.distance * multiplier / effective;

    // Backward drags are biased to move one extra slide
    let mut delta = match measure.direction {
        Direction::Backward => travel.ceil(),
        Direction::Forward => travel.round(),
    } as usize;
    if params.one_at_time && delta > 1 {
        delta = 1;
    }

    ReleaseOutcome::Snap {
        delta,
        direction: measure.direction,
    }
}

/// Drag state owned by one carousel
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    session: Option<DragSession>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Idle -> Dragging
    pub fn press(&mut self, at: Instant, position: Point, start_scroll: f64, target: Option<usize>) {
        self.session = Some(DragSession {
            started_at: at,
            start: position,
            current: position,
            start_scroll,
            target,
        });
    }

    /// Follow the pointer; `None` when not dragging
    pub fn drag_to(&mut self, position: Point, axis: Axis, threshold: f64) -> Option<DragMove> {
        let session = self.session.as_mut()?;
        session.current = position;

        let moved = position - session.start;
        let suppress = if moved.x.abs() > threshold || moved.y.abs() > threshold {
            session.target
        } else {
            None
        };

        Some(DragMove {
            offset: session.start_scroll - moved.along(axis),
            suppress,
        })
    }

    /// Dragging -> Idle, returning what the drag measured
    pub fn release(&mut self, at: Instant, position: Point, axis: Axis) -> Option<DragMeasure> {
        let session = self.session.take()?;
        let moved = position - session.start;
        let cross = match axis {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        };
        let direction = if moved.along(axis) < 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };

        Some(DragMeasure {
            distance: moved.along(axis).abs(),
            cross_distance: moved.along(cross).abs(),
            elapsed: at.saturating_duration_since(session.started_at),
            direction,
        })
    }

    /// Drop any drag in progress
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
