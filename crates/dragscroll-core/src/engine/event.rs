use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::emitter::{ChangeEvent, InitInfo};
use crate::geometry::Point;

/// Input the host feeds into a carousel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// Pointer pressed inside the container
    PointerDown {
        at: Instant,
        /// Page coordinates
        position: Point,
        /// Slide element directly under the pointer, if any
        target: Option<usize>,
        /// Primary button
        primary: bool,
    },
    /// Pointer moved anywhere in the window
    PointerMove { at: Instant, position: Point },
    /// Pointer released anywhere in the window
    PointerUp { at: Instant, position: Point },
    PointerEnter { at: Instant },
    PointerLeave { at: Instant },
    /// Viewport resized; the surface already reports the new width
    Resize { at: Instant },
    /// Container scrolled by something other than the engine
    Scroll { at: Instant },
    /// Time advanced: step the animation and fire due timers
    FrameTick { at: Instant },
    /// Autoplay interval elapsed (for hosts running their own timer)
    AutoplayTick { at: Instant },
}

impl CarouselEvent {
    pub fn at(&self) -> Instant {
        match *self {
            CarouselEvent::PointerDown { at, .. }
            | CarouselEvent::PointerMove { at, .. }
            | CarouselEvent::PointerUp { at, .. }
            | CarouselEvent::PointerEnter { at }
            | CarouselEvent::PointerLeave { at }
            | CarouselEvent::Resize { at }
            | CarouselEvent::Scroll { at }
            | CarouselEvent::FrameTick { at }
            | CarouselEvent::AutoplayTick { at } => at,
        }
    }
}

/// What the host should do with the native event it translated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No listener attached for this event
    Ignored,
    Handled,
    /// Handled, and the browser default (native drag) must be cancelled
    PreventDefault,
}

/// Outbound notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    Init(InitInfo),
    Change(ChangeEvent),
}

/// Receives init and change notifications
pub trait CarouselObserver {
    fn on_init(&mut self, info: &InitInfo) {
        let _ = info;
    }

    fn on_change(&mut self, event: &ChangeEvent);
}

impl CarouselObserver for mpsc::UnboundedSender<Notification> {
    fn on_init(&mut self, info: &InitInfo) {
        if self.send(Notification::Init(info.clone())).is_err() {
            warn!("Failed to send carousel init: receiver dropped");
        }
    }

    fn on_change(&mut self, event: &ChangeEvent) {
        if self.send(Notification::Change(event.clone())).is_err() {
            warn!("Failed to send carousel change: receiver dropped");
        }
    }
}
