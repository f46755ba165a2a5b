//! Normalized carousel state handed to renderers
//!
//! The current slide is always derived from the live scroll offset, never from
//! cached state, using one rule for both axes: within half a stride of either
//! end it snaps to that end, otherwise it is the nearest stride multiple.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Geometry};

/// Accessibility attributes of one pagination dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotA11y {
    #[serde(rename = "aria-controls")]
    pub aria_controls: String,
    #[serde(rename = "aria-label")]
    pub aria_label: String,
    pub role: String,
    pub id: String,
    #[serde(rename = "aria-selected")]
    pub aria_selected: bool,
    #[serde(rename = "tabIndex", skip_serializing_if = "Option::is_none")]
    pub tab_index: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot {
    pub active: bool,
    pub a11y: DotA11y,
}

impl Dot {
    fn new(id: &str, index: usize, current: usize) -> Self {
        let n = index + 1;
        let active = index == current;
        Self {
            active,
            a11y: DotA11y {
                aria_controls: format!("{}-slide-{}", id, n),
                aria_label: format!("Slide {}", n),
                role: "tab".to_string(),
                id: format!("{}-tab-{}", id, n),
                aria_selected: active,
                tab_index: if active { None } else { Some(-1) },
            },
        }
    }
}

/// State emitted on every meaningful change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub current_slide: usize,
    /// 0-100, scrolled offset over the maximum offset
    pub progress: f64,
    pub slides_in_view: Vec<usize>,
    pub dots: Vec<Dot>,
    pub can_scroll_next: bool,
    pub can_scroll_prev: bool,
}

/// Emitted on every (re)initialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitInfo {
    pub slide_count: usize,
    pub slides_per_view: usize,
    pub scroll_extent: f64,
    pub axis: Axis,
}

/// Current slide index for a scroll offset
pub fn current_slide_from_offset(geometry: &Geometry, offset: f64, max_offset: f64) -> usize {
    if !geometry.is_measurable() {
        return 0;
    }
    let stride = geometry.stride();
    let last = geometry.max_index();

    if offset < stride / 2.0 {
        return 0;
    }
    if offset > max_offset - stride / 2.0 {
        return last;
    }
    ((offset / stride).round().max(0.0) as usize).min(last)
}

/// Scroll progress as a percentage
pub fn progress(offset: f64, max_offset: f64) -> f64 {
    if max_offset <= 0.0 {
        return 0.0;
    }
    (offset / max_offset * 100.0).clamp(0.0, 100.0)
}

/// Build the change event for `current_slide`
pub fn build_change(
    id: &str,
    geometry: &Geometry,
    current_slide: usize,
    offset: f64,
    max_offset: f64,
) -> ChangeEvent {
    let last = geometry.max_index();
    let in_view_end = (current_slide + geometry.slides_per_view).min(geometry.slide_count);

    ChangeEvent {
        current_slide,
        progress: progress(offset, max_offset),
        slides_in_view: (current_slide..in_view_end).collect(),
        dots: (0..geometry.snap_count())
            .map(|index| Dot::new(id, index, current_slide))
            .collect(),
        can_scroll_next: current_slide < last,
        can_scroll_prev: current_slide > 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::Breakpoint;
    use crate::geometry::Size;

    fn geometry(slide_count: usize, slides_per_view: usize) -> Geometry {
        Geometry {
            breakpoint: Breakpoint::Lg,
            axis: Axis::X,
            slide_count,
            slides_per_view,
            slide: Size::new(100.0, 60.0),
            gap: 0.0,
            partial_delta: 0.0,
            auto_height: None,
            native_scroll_disabled: false,
        }
    }

    #[test]
    fn test_current_slide_edges_and_rounding() {
        let g = geometry(5, 1);
        let max = 400.0;
        assert_eq!(current_slide_from_offset(&g, 0.0, max), 0);
        assert_eq!(current_slide_from_offset(&g, 49.0, max), 0);
        assert_eq!(current_slide_from_offset(&g, 140.0, max), 1);
        assert_eq!(current_slide_from_offset(&g, 160.0, max), 2);
        assert_eq!(current_slide_from_offset(&g, 351.0, max), 4);
        assert_eq!(current_slide_from_offset(&g, 400.0, max), 4);
    }

    #[test]
    fn test_current_slide_respects_slides_per_view() {
        // 6 slides, 3 in view: at most index 3
        let g = geometry(6, 3);
        let max = 300.0;
        for offset in [0.0, 75.0, 150.0, 260.0, 300.0, 1000.0] {
            assert!(current_slide_from_offset(&g, offset, max) <= 3);
        }
        assert_eq!(current_slide_from_offset(&g, 300.0, max), 3);
    }

    #[test]
    fn test_unmeasurable_geometry_is_slide_zero() {
        let g = geometry(0, 1);
        assert_eq!(current_slide_from_offset(&g, 120.0, 0.0), 0);
    }

    #[test]
    fn test_build_change() {
        let g = geometry(5, 2);
        let event = build_change("gallery", &g, 1, 100.0, 300.0);
        assert_eq!(event.current_slide, 1);
        assert!((event.progress - 33.333).abs() < 0.01);
        assert_eq!(event.slides_in_view, vec![1, 2]);
        assert_eq!(event.dots.len(), 4);
        assert!(event.dots[1].active);
        assert_eq!(event.dots[1].a11y.tab_index, None);
        assert_eq!(event.dots[0].a11y.tab_index, Some(-1));
        assert_eq!(event.dots[2].a11y.aria_controls, "gallery-slide-3");
        assert_eq!(event.dots[2].a11y.id, "gallery-tab-3");
        assert_eq!(event.dots[2].a11y.aria_label, "Slide 3");
        assert!(event.can_scroll_next);
        assert!(event.can_scroll_prev);

        let last = build_change("gallery", &g, 3, 300.0, 300.0);
        assert!(!last.can_scroll_next);
        assert_eq!(last.slides_in_view, vec![3, 4]);
        assert_eq!(last.progress, 100.0);
    }

    #[test]
    fn test_progress_without_overflow() {
        assert_eq!(progress(0.0, 0.0), 0.0);
        assert_eq!(progress(50.0, 200.0), 25.0);
    }

    #[test]
    fn test_change_event_json_shape() {
        let event = build_change("c", &geometry(2, 1), 0, 0.0, 100.0);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["currentSlide"], 0);
        assert_eq!(json["canScrollNext"], true);
        assert_eq!(json["dots"][0]["a11y"]["aria-selected"], true);
        assert!(json["dots"][0]["a11y"].get("tabIndex").is_none());
        assert_eq!(json["dots"][1]["a11y"]["tabIndex"], -1);
    }
}
