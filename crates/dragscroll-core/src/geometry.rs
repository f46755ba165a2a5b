//! Slide geometry derived from the live container

use serde::{Deserialize, Serialize};

use crate::breakpoint::Breakpoint;
use crate::config::CarouselConfig;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Snapshot of the layout, valid until the next `init`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub breakpoint: Breakpoint,
    pub axis: Axis,
    pub slide_count: usize,
    pub slides_per_view: usize,
    pub slide: Size,
    pub gap: f64,
    pub partial_delta: f64,
    pub auto_height: Option<f64>,
    pub native_scroll_disabled: bool,
}

impl Geometry {
    /// Read the surface and resolve responsive settings for its viewport
    pub fn measure<S: Surface + ?Sized>(surface: &S, config: &CarouselConfig) -> Self {
        let breakpoint = Breakpoint::from_width(surface.viewport_width());
        let axis = config.axis.resolve_at(breakpoint, Axis::X);
        let slides_per_view = config.layout.resolve_at(breakpoint, 1).max(1);
        let partial_delta = config.partial_delta.resolve_at(breakpoint, 0.0);
        let slide_count = surface.slide_count();
        let slide = surface.slide_size().unwrap_or_default();

        let auto_height = if config.auto_height.unwrap_or(axis == Axis::Y) && axis == Axis::Y {
            Some(slides_per_view as f64 * slide.height + partial_delta)
        } else {
            None
        };

        Self {
            breakpoint,
            axis,
            slide_count,
            slides_per_view,
            slide,
            gap: config.gap.resolve_at(breakpoint, 0.0),
            partial_delta,
            auto_height,
            native_scroll_disabled: config.disable_native_scroll.resolve_at(breakpoint, false),
        }
    }

    /// Distance between the leading edges of two neighbouring slides
    pub fn stride(&self) -> f64 {
        self.slide.along(self.axis) + self.gap
    }

    /// Whether slides have a measurable size on the active axis
    pub fn is_measurable(&self) -> bool {
        self.slide_count > 0 && self.stride() > 0.0
    }

    /// Highest index `current_slide` may take
    pub fn max_index(&self) -> usize {
        self.slide_count.saturating_sub(self.slides_per_view)
    }

    /// Number of valid snap positions
    pub fn snap_count(&self) -> usize {
        if self.slide_count == 0 {
            0
        } else {
            self.max_index() + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::Responsive;
    use crate::surface::MemorySurface;

    #[test]
    fn test_measure_horizontal() {
        let surface = MemorySurface::new(1024.0, 6, Size::new(200.0, 120.0));
        let config = CarouselConfig {
            layout: Responsive::fixed(2).with(Breakpoint::Lg, 3),
            gap: Responsive::fixed(20.0),
            ..Default::default()
        };
        let geometry = Geometry::measure(&surface, &config);
        assert_eq!(geometry.breakpoint, Breakpoint::Lg);
        assert_eq!(geometry.axis, Axis::X);
        assert_eq!(geometry.slides_per_view, 3);
        assert_eq!(geometry.stride(), 220.0);
        assert_eq!(geometry.max_index(), 3);
        assert_eq!(geometry.snap_count(), 4);
        assert_eq!(geometry.auto_height, None);
    }

    #[test]
    fn test_auto_height_only_on_vertical_axis() {
        let surface = MemorySurface::new(500.0, 4, Size::new(300.0, 80.0));
        let mut config = CarouselConfig {
            axis: Responsive::fixed(Axis::Y),
            layout: Responsive::fixed(2),
            partial_delta: Responsive::fixed(20.0),
            ..Default::default()
        };
        let geometry = Geometry::measure(&surface, &config);
        assert_eq!(geometry.auto_height, Some(180.0));

        config.auto_height = Some(false);
        assert_eq!(Geometry::measure(&surface, &config).auto_height, None);

        config.axis = Responsive::fixed(Axis::X);
        config.auto_height = Some(true);
        assert_eq!(Geometry::measure(&surface, &config).auto_height, None);
    }

    #[test]
    fn test_empty_container_is_not_measurable() {
        let surface = MemorySurface::new(500.0, 0, Size::new(300.0, 80.0));
        let geometry = Geometry::measure(&surface, &CarouselConfig::default());
        assert!(!geometry.is_measurable());
        assert_eq!(geometry.max_index(), 0);
        assert_eq!(geometry.snap_count(), 0);
    }
}
