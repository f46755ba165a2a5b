//! Snap animation system
//!
//! Eased interpolation of the scroll offset, decoupled from frame scheduling:
//! a `SnapAnimation` is a pure function of elapsed time, and `AnimationDriver`
//! is the busy guard that keeps at most one of them in flight.
//!
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Elapsed-time progress and interpolation
//! - `config` - Duration helpers over `MotionConfig`
//! - `animation` - Snap animation, frame stream and driver

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::{AnimationDriver, Frame, Frames, SnapAnimation};
pub use config::MotionConfigExt;
pub use easing::EasingTypeExt;
