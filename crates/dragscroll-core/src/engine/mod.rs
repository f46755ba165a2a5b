//! The carousel engine
//!
//! One `Carousel` owns one container surface and a private state record.
//! Every input arrives as a `CarouselEvent`; gesture tracking, animation,
//! change emission and autoplay are operations over that one record.
//!
//! ```ignore
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut carousel = CarouselBuilder::new(config)
//!     .observer(tx)
//!     .build(surface, Instant::now())?;
//!
//! carousel.scroll_to(2, Instant::now());
//! loop {
//!     carousel.handle(CarouselEvent::FrameTick { at: Instant::now() });
//! }
//! ```

mod event;


use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::autoplay::{next_autoplay_slide, Autoplay};
use crate::config::{CarouselConfig, CarouselUpdate};
use crate::device::{AlwaysDrag, DragPolicy};
use crate::emitter::{build_change, current_slide_from_offset, ChangeEvent, InitInfo};
use crate::geometry::{Axis, Geometry, Point};
use crate::gesture::{resolve_release, DragMeasure, FlingParams, GestureTracker, ReleaseOutcome};
use crate::scroll::{AnimationDriver, MotionConfigExt, SnapAnimation};
use crate::surface::{Surface, ATTR_DRAGGING, ATTR_DRAG_DISABLED, ATTR_NATIVE_SCROLL_DISABLED};

pub use event::{CarouselEvent, CarouselObserver, Disposition, Notification};

/// Offsets closer than this are treated as equal
const OFFSET_EPSILON: f64 = 0.5;

/// Which host listeners are currently attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Listeners {
    pointer_down: bool,
    /// Window-level move/up, only while a drag is in progress
    window_drag: bool,
    hover: bool,
    scroll: bool,
    resize: bool,
}

/// Configures and builds a `Carousel`
pub struct CarouselBuilder {
    config: CarouselConfig,
    policy: Box<dyn DragPolicy + Send>,
    observer: Option<Box<dyn CarouselObserver + Send>>,
}

impl CarouselBuilder {
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            config,
            policy: Box::new(AlwaysDrag),
            observer: None,
        }
    }

    /// Decide whether pointer drag is attached (defaults to always)
    pub fn drag_policy(mut self, policy: impl DragPolicy + Send + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Receive init and change notifications
    pub fn observer(mut self, observer: impl CarouselObserver + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Validate the config, initialize geometry and attach listeners
    pub fn build<S: Surface>(self, surface: S, now: Instant) -> crate::Result<Carousel<S>> {
        self.config.validate()?;

        let geometry = Geometry::measure(&surface, &self.config);
        let mut carousel = Carousel {
            autoplay: Autoplay::new(self.config.auto_play),
            surface,
            config: self.config,
            policy: self.policy,
            observer: self.observer,
            geometry,
            current_slide: 0,
            gesture: GestureTracker::new(),
            driver: AnimationDriver::new(),
            listeners: Listeners::default(),
            navigate_at: None,
            suppressed: None,
            height_forced: false,
            destroyed: false,
            clock: now,
            last_change: None,
        };

        carousel.attach_listeners();
        carousel.init();
        carousel.emit_change();
        Ok(carousel)
    }
}

/// Drag/snap/autoplay engine bound to one container
pub struct Carousel<S> {
    surface: S,
    config: CarouselConfig,
    policy: Box<dyn DragPolicy + Send>,
    observer: Option<Box<dyn CarouselObserver + Send>>,
    geometry: Geometry,
    current_slide: usize,
    gesture: GestureTracker,
    driver: AnimationDriver,
    autoplay: Autoplay,
    listeners: Listeners,
    navigate_at: Option<Instant>,
    /// Slide whose pointer interaction was disabled by a drag
    suppressed: Option<usize>,
    height_forced: bool,
    destroyed: bool,
    /// Latest instant seen on any event
    clock: Instant,
    last_change: Option<ChangeEvent>,
}

impl<S: Surface> Carousel<S> {
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Index computed at the last emission
    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn last_change(&self) -> Option<&ChangeEvent> {
        self.last_change.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Animation guard is set (animating or in its grace period)
    pub fn is_busy(&self) -> bool {
        self.driver.is_busy()
    }

    pub fn animation_target(&self) -> Option<f64> {
        self.driver.target()
    }

    pub fn is_autoplay_paused(&self) -> bool {
        self.autoplay.is_paused()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn drag_enabled(&self) -> bool {
        self.listeners.pointer_down
    }

    /// Earliest instant at which a `FrameTick` has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let frame = self
            .driver
            .is_animating()
            .then(|| self.clock + self.config.motion.frame_interval());
        [
            frame,
            self.driver.release_deadline(),
            self.navigate_at,
            self.autoplay.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Apply one host event
    pub fn handle(&mut self, event: CarouselEvent) -> Disposition {
        self.advance_clock(event.at());

        match event {
            CarouselEvent::PointerDown {
                at,
                position,
                target,
                primary,
            } => {
                if !self.listeners.pointer_down || !primary {
                    return Disposition::Ignored;
                }
                let axis = self.geometry.axis;
                let local = position - self.surface.origin();
                self.gesture
                    .press(at, local, self.surface.scroll_offset(axis), target);
                self.listeners.window_drag = true;
                self.surface.set_attribute(ATTR_DRAGGING, "true");
                trace!(x = local.x, y = local.y, ?target, "Drag started");
                Disposition::Handled
            }
            CarouselEvent::PointerMove { position, .. } => {
                if !self.listeners.window_drag {
                    return Disposition::Ignored;
                }
                self.drag_to(position)
            }
            CarouselEvent::PointerUp { at, position } => {
                if !self.listeners.window_drag {
                    return Disposition::Ignored;
                }
                self.listeners.window_drag = false;
                let local = position - self.surface.origin();
                match self.gesture.release(at, local, self.geometry.axis) {
                    Some(measure) => {
                        self.finish_drag(measure);
                        Disposition::Handled
                    }
                    None => Disposition::Ignored,
                }
            }
            CarouselEvent::PointerEnter { .. } => {
                if !self.listeners.hover {
                    return Disposition::Ignored;
                }
                self.autoplay.pause();
                Disposition::Handled
            }
            CarouselEvent::PointerLeave { at } => {
                if !self.listeners.hover {
                    return Disposition::Ignored;
                }
                self.autoplay.resume(at);
                Disposition::Handled
            }
            CarouselEvent::Resize { .. } => {
                if !self.listeners.resize {
                    return Disposition::Ignored;
                }
                self.init();
                let target = self.snap_offset(self.current_slide as isize);
                self.surface.set_scroll_offset(self.geometry.axis, target);
                self.emit_change();
                Disposition::Handled
            }
            CarouselEvent::Scroll { .. } => {
                if !self.listeners.scroll {
                    return Disposition::Ignored;
                }
                // Transient while dragging or animating
                if !self.gesture.is_dragging() && !self.driver.is_busy() {
                    self.emit_change();
                }
                Disposition::Handled
            }
            CarouselEvent::FrameTick { at } => {
                self.advance(at);
                Disposition::Handled
            }
            CarouselEvent::AutoplayTick { at } => {
                if self.destroyed || !self.autoplay.is_enabled() || self.autoplay.is_paused() {
                    return Disposition::Ignored;
                }
                self.autoplay.restart(at);
                self.autoplay_advance();
                Disposition::Handled
            }
        }
    }

    /// Animate to a slide, or refresh state if an animation holds the guard
    pub fn scroll_to(&mut self, slide: isize, now: Instant) {
        self.advance_clock(now);
        self.scroll_to_slide(slide);
    }

    /// Jump to a slide without animation and emit once it has settled
    pub fn navigate(&mut self, slide: usize, now: Instant) {
        self.advance_clock(now);
        let target = self.snap_offset(slide as isize);
        self.surface.set_scroll_offset(self.geometry.axis, target);
        self.navigate_at = Some(self.clock + self.config.motion.navigate_settle());
        debug!(slide, target, "Navigate");
    }

    pub fn next(&mut self, now: Instant) {
        self.scroll_to(self.current_slide as isize + 1, now);
    }

    pub fn prev(&mut self, now: Instant) {
        self.scroll_to(self.current_slide as isize - 1, now);
    }

    /// Merge a partial config, re-attach listeners and re-initialize
    pub fn update(&mut self, update: CarouselUpdate, now: Instant) -> crate::Result<()> {
        let mut config = self.config.clone();
        config.apply(update);
        config.validate()?;
        self.config = config;
        self.advance_clock(now);

        self.destroyed = false;
        self.autoplay.set_interval(self.config.auto_play);
        self.attach_listeners();
        self.init();
        self.emit_change();

        if !self.config.autoplay_enabled() {
            self.autoplay.cancel();
        }
        debug!(enabled = self.config.enabled, "Carousel updated");
        Ok(())
    }

    /// Remove all listeners and stop timers; the surface is left as is
    pub fn destroy(&mut self) {
        self.listeners = Listeners::default();
        self.gesture.cancel();
        self.autoplay.cancel();
        self.navigate_at = None;
        self.destroyed = true;
        debug!("Carousel destroyed");
    }

    fn attach_listeners(&mut self) {
        let enabled = self.config.enabled;
        self.listeners = Listeners {
            pointer_down: enabled && self.policy.allows_pointer_drag(),
            window_drag: false,
            hover: enabled && self.config.autoplay_enabled() && self.config.pause_on_hover,
            scroll: enabled,
            resize: true,
        };
        if self.gesture.is_dragging() {
            self.surface.set_attribute(ATTR_DRAGGING, "false");
        }
        self.gesture.cancel();
        if !self.listeners.hover && self.autoplay.is_paused() {
            self.autoplay.resume(self.clock);
        }
    }

    /// Host time never runs backwards
    fn advance_clock(&mut self, now: Instant) {
        if now > self.clock {
            self.clock = now;
        }
    }

    fn scroll_to_slide(&mut self, slide: isize) {
        let target = self.snap_offset(slide);
        let from = self.surface.scroll_offset(self.geometry.axis);
        self.animate(from, target);
    }

    /// Re-derive geometry from the live surface
    fn init(&mut self) {
        self.geometry = Geometry::measure(&self.surface, &self.config);

        if !self.geometry.is_measurable() {
            warn!(
                slide_count = self.geometry.slide_count,
                "Carousel has no measurable slides"
            );
        }

        if self.geometry.auto_height.is_some() || self.height_forced {
            self.surface.set_height(self.geometry.auto_height);
            self.height_forced = self.geometry.auto_height.is_some();
        }

        let drag_disabled = if self.listeners.pointer_down { "false" } else { "true" };
        self.surface.set_attribute(ATTR_DRAG_DISABLED, drag_disabled);
        let native_disabled = if self.geometry.native_scroll_disabled { "true" } else { "false" };
        self.surface
            .set_attribute(ATTR_NATIVE_SCROLL_DISABLED, native_disabled);

        debug!(
            breakpoint = %self.geometry.breakpoint,
            axis = ?self.geometry.axis,
            slide_count = self.geometry.slide_count,
            slides_per_view = self.geometry.slides_per_view,
            "Carousel initialized"
        );

        let info = InitInfo {
            slide_count: self.geometry.slide_count,
            slides_per_view: self.geometry.slides_per_view,
            scroll_extent: self.surface.scroll_extent(self.geometry.axis),
            axis: self.geometry.axis,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_init(&info);
        }
    }

    /// Scroll offset that shows `slide` first; both ends snap fully
    fn snap_offset(&self, slide: isize) -> f64 {
        let max = self.surface.max_offset(self.geometry.axis);
        if slide <= 0 {
            return 0.0;
        }
        if slide as usize >= self.geometry.max_index() {
            return max;
        }
        (slide as f64 * self.geometry.stride()).clamp(0.0, max)
    }

    fn drag_to(&mut self, position: Point) -> Disposition {
        let axis = self.geometry.axis;
        let local = position - self.surface.origin();
        let threshold = self.config.motion.drag_threshold_px;
        let Some(step) = self.gesture.drag_to(local, axis, threshold) else {
            return Disposition::Ignored;
        };

        self.surface.set_scroll_offset(axis, step.offset);
        if let Some(index) = step.suppress {
            if self.suppressed != Some(index) {
                self.surface.set_slide_interactive(index, false);
                self.suppressed = Some(index);
            }
        }
        Disposition::PreventDefault
    }

    fn finish_drag(&mut self, measure: DragMeasure) {
        let params = FlingParams::new(
            &self.config.motion,
            self.geometry.stride(),
            self.config.drag_free,
            self.config.one_at_time,
        );
        let outcome = resolve_release(&measure, &params);
        debug!(
            distance = measure.distance,
            elapsed_ms = measure.elapsed.as_millis() as u64,
            ?outcome,
            "Drag released"
        );

        match outcome {
            ReleaseOutcome::Click => {
                if self.config.drag_free {
                    self.settle();
                } else {
                    self.scroll_to_slide(self.current_slide as isize);
                }
            }
            ReleaseOutcome::Snap { delta, direction } => {
                let step = delta as isize * direction.sign() as isize;
                self.scroll_to_slide(self.current_slide as isize + step);
            }
            ReleaseOutcome::Free {
                distance,
                direction,
            } => {
                let axis = self.geometry.axis;
                let from = self.surface.scroll_offset(axis);
                let target =
                    (from + distance * direction.sign()).clamp(0.0, self.surface.max_offset(axis));
                self.animate(from, target);
            }
        }
    }

    fn animate(&mut self, from: f64, target: f64) {
        if self.driver.is_busy() {
            // Concurrent requests collapse into a state refresh
            self.emit_change();
            return;
        }
        if (target - from).abs() < OFFSET_EPSILON {
            self.surface.set_scroll_offset(self.geometry.axis, target);
            self.settle();
            return;
        }

        let motion = &self.config.motion;
        let animation =
            SnapAnimation::new(from, target, motion.animation_duration(), motion.easing);
        if self.driver.try_start(animation) {
            trace!(from, target, "Animation started");
        }
    }

    /// Step the animation and fire every timer that is due
    fn advance(&mut self, now: Instant) {
        if self.driver.release_due(now) {
            trace!("Animation guard released");
        }

        if let Some(frame) = self.driver.step(now) {
            let axis = self.geometry.axis;
            self.surface.set_scroll_offset(axis, frame.offset);
            if frame.finished {
                self.surface.set_attribute(ATTR_DRAGGING, "false");
                self.driver
                    .hold_until(now + self.config.motion.guard_grace());
                self.emit_change();
            }
        }

        if let Some(at) = self.navigate_at {
            if now >= at {
                self.navigate_at = None;
                self.emit_change();
            }
        }

        if !self.destroyed && self.autoplay.fire_due(now) {
            self.autoplay_advance();
        }
    }

    fn autoplay_advance(&mut self) {
        if !self.geometry.is_measurable() {
            return;
        }
        let next = next_autoplay_slide(
            self.current_slide,
            self.geometry.slides_per_view,
            self.geometry.slide_count,
        );
        debug!(from = self.current_slide, to = next, "Autoplay advance");
        self.scroll_to_slide(next as isize);
    }

    fn settle(&mut self) {
        self.surface.set_attribute(ATTR_DRAGGING, "false");
        self.emit_change();
    }

    /// Recompute the current slide from the live offset and notify
    fn emit_change(&mut self) {
        let axis: Axis = self.geometry.axis;
        let offset = self.surface.scroll_offset(axis);
        let max_offset = self.surface.max_offset(axis);

        self.current_slide = current_slide_from_offset(&self.geometry, offset, max_offset);
        let event = build_change(
            &self.config.id,
            &self.geometry,
            self.current_slide,
            offset,
            max_offset,
        );
        if let Some(observer) = self.observer.as_mut() {
            observer.on_change(&event);
        }
        self.last_change = Some(event);

        if let Some(index) = self.suppressed.take() {
            self.surface.set_slide_interactive(index, true);
        }
        if !self.destroyed && !self.autoplay.is_paused() {
            self.autoplay.restart(self.clock);
        }
    }
}
