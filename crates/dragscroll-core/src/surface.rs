//! Container capability the engine drives
//!
//! A `Surface` stands in for the scrollable container element: the engine reads
//! slide measurements and scroll extents from it and writes scroll offsets,
//! attributes and slide interactivity back. `MemorySurface` lays slides out
//! arithmetically and is what tests and the CLI run against.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Point, Size};

pub const ATTR_DRAGGING: &str = "data-dragging";
pub const ATTR_DRAG_DISABLED: &str = "data-drag-disabled";
pub const ATTR_NATIVE_SCROLL_DISABLED: &str = "data-disable-native-scroll";

pub trait Surface {
    /// Width of the viewport the container lives in
    fn viewport_width(&self) -> f64;

    /// Number of direct children (slides)
    fn slide_count(&self) -> usize;

    /// Box size of the first slide, `None` when there are no slides
    fn slide_size(&self) -> Option<Size>;

    /// Container origin in page coordinates
    fn origin(&self) -> Point {
        Point::default()
    }

    fn scroll_offset(&self, axis: Axis) -> f64;

    /// Set the scroll offset; implementations clamp to the scrollable range
    fn set_scroll_offset(&mut self, axis: Axis, offset: f64);

    /// Total scrollable content length (scrollWidth / scrollHeight)
    fn scroll_extent(&self, axis: Axis) -> f64;

    /// Visible length of the container (clientWidth / clientHeight)
    fn client_extent(&self, axis: Axis) -> f64;

    fn set_attribute(&mut self, name: &str, value: &str);

    /// Force the rendered container height, or release it with `None`
    fn set_height(&mut self, height: Option<f64>);

    /// Toggle pointer interaction on one slide
    fn set_slide_interactive(&mut self, index: usize, interactive: bool);

    /// Largest reachable scroll offset on an axis
    fn max_offset(&self, axis: Axis) -> f64 {
        (self.scroll_extent(axis) - self.client_extent(axis)).max(0.0)
    }
}

/// Arithmetic container: slides of equal size separated by a fixed gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySurface {
    pub viewport_width: f64,
    pub slides: usize,
    pub slide: Size,
    #[serde(default)]
    pub gap: f64,
    /// Visible container size; defaults to one slide
    #[serde(default)]
    pub client: Option<Size>,
    #[serde(default)]
    pub origin: Point,
    #[serde(skip)]
    offset: Point,
    #[serde(skip)]
    height: Option<f64>,
    #[serde(skip)]
    attributes: BTreeMap<String, String>,
    #[serde(skip)]
    inert: BTreeSet<usize>,
}

impl MemorySurface {
    pub fn new(viewport_width: f64, slides: usize, slide: Size) -> Self {
        Self {
            viewport_width,
            slides,
            slide,
            gap: 0.0,
            client: None,
            origin: Point::default(),
            offset: Point::default(),
            height: None,
            attributes: BTreeMap::new(),
            inert: BTreeSet::new(),
        }
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_client_size(mut self, client: Size) -> Self {
        self.client = Some(client);
        self
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn is_slide_interactive(&self, index: usize) -> bool {
        !self.inert.contains(&index)
    }

    fn client_size(&self) -> Size {
        let client = self.client.unwrap_or(self.slide);
        Size::new(client.width, self.height.unwrap_or(client.height))
    }
}

impl Surface for MemorySurface {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn slide_count(&self) -> usize {
        self.slides
    }

    fn slide_size(&self) -> Option<Size> {
        (self.slides > 0).then_some(self.slide)
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn scroll_offset(&self, axis: Axis) -> f64 {
        self.offset.along(axis)
    }

    fn set_scroll_offset(&mut self, axis: Axis, offset: f64) {
        let clamped = offset.clamp(0.0, self.max_offset(axis));
        match axis {
            Axis::X => self.offset.x = clamped,
            Axis::Y => self.offset.y = clamped,
        }
    }

    fn scroll_extent(&self, axis: Axis) -> f64 {
        if self.slides == 0 {
            return 0.0;
        }
        let n = self.slides as f64;
        n * self.slide.along(axis) + (n - 1.0) * self.gap
    }

    fn client_extent(&self, axis: Axis) -> f64 {
        self.client_size().along(axis)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_height(&mut self, height: Option<f64>) {
        self.height = height;
    }

    fn set_slide_interactive(&mut self, index: usize, interactive: bool) {
        if interactive {
            self.inert.remove(&index);
        } else {
            self.inert.insert(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extents_and_clamping() {
        let mut surface = MemorySurface::new(1024.0, 5, Size::new(100.0, 50.0))
            .with_gap(10.0)
            .with_client_size(Size::new(210.0, 50.0));
        assert_eq!(surface.scroll_extent(Axis::X), 540.0);
        assert_eq!(surface.max_offset(Axis::X), 330.0);

        surface.set_scroll_offset(Axis::X, 1000.0);
        assert_eq!(surface.scroll_offset(Axis::X), 330.0);
        surface.set_scroll_offset(Axis::X, -5.0);
        assert_eq!(surface.scroll_offset(Axis::X), 0.0);
    }

    #[test]
    fn test_explicit_height_changes_vertical_client() {
        let mut surface = MemorySurface::new(500.0, 4, Size::new(300.0, 80.0));
        assert_eq!(surface.max_offset(Axis::Y), 240.0);
        surface.set_height(Some(180.0));
        assert_eq!(surface.client_extent(Axis::Y), 180.0);
        assert_eq!(surface.max_offset(Axis::Y), 140.0);
    }

    #[test]
    fn test_empty_surface() {
        let surface = MemorySurface::new(500.0, 0, Size::new(300.0, 80.0));
        assert_eq!(surface.slide_size(), None);
        assert_eq!(surface.max_offset(Axis::X), 0.0);
    }
}
