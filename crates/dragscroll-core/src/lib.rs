pub mod autoplay;
pub mod breakpoint;
pub mod config;
pub mod device;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod runtime;
pub mod scroll;
pub mod surface;

pub use breakpoint::{Breakpoint, Responsive};
pub use config::{CarouselConfig, CarouselUpdate, EasingType, MotionConfig};
pub use emitter::{ChangeEvent, InitInfo};
pub use engine::{Carousel, CarouselBuilder, CarouselEvent, CarouselObserver, Disposition, Notification};
pub use error::{Error, Result};
pub use geometry::{Axis, Point, Size};
pub use runtime::{CarouselRuntime, Command};
pub use surface::{MemorySurface, Surface};
