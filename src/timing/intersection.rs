//! Viewport intersection geometry.
//!
//! Mirrors how a browser intersection observer measures an element against a
//! root whose edges are moved by a root margin. Negative margins shrink the
//! root, so `-100px` on top and bottom means an element must clear a 100px
//! band at either edge before it counts as on screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertical root margin in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

impl RootMargin {
    /// Same offset on top and bottom, as in `"-100px 0px"`.
    #[must_use]
    pub const fn vertical(px: f64) -> Self {
        Self { top: px, bottom: px }
    }
}

impl fmt::Display for RootMargin {
    /// Formats as a CSS `rootMargin` string (`top right bottom left`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px 0px {}px 0px", self.top, self.bottom)
    }
}

/// Element position relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub top: f64,
    pub height: f64,
}

/// Fraction of `rect` that lies inside the margin-adjusted viewport.
///
/// Zero-height elements count as fully inside when their top edge is inside
/// the root, and fully outside otherwise.
///
/// # Examples
///
/// ```
/// use portfolio::timing::{intersection_ratio, ElementRect, RootMargin};
///
/// let rect = ElementRect { top: 700.0, height: 200.0 };
/// // 800px viewport shrunk by 100px at the bottom leaves no overlap.
/// assert_eq!(intersection_ratio(rect, 800.0, RootMargin::vertical(-100.0)), 0.0);
/// // Without a margin, half the element is on screen.
/// assert_eq!(intersection_ratio(rect, 800.0, RootMargin::default()), 0.5);
/// ```
#[must_use]
pub fn intersection_ratio(rect: ElementRect, viewport_height: f64, margin: RootMargin) -> f64 {
    let root_top = -margin.top;
    let root_bottom = viewport_height + margin.bottom;

    if rect.height <= 0.0 {
        return if rect.top >= root_top && rect.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }

    let overlap = (rect.top + rect.height).min(root_bottom) - rect.top.max(root_top);
    (overlap.max(0.0) / rect.height).clamp(0.0, 1.0)
}

/// Whether an intersection ratio counts as visible for `threshold`.
///
/// A ratio of zero is never visible, even with a zero threshold.
#[must_use]
pub fn crosses_threshold(ratio: f64, threshold: f64) -> bool {
    ratio > 0.0 && ratio >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_inside_element_has_ratio_one() {
        let rect = ElementRect { top: 100.0, height: 300.0 };
        assert!((intersection_ratio(rect, 800.0, RootMargin::default()) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_margin_trims_both_edges() {
        let rect = ElementRect { top: 0.0, height: 200.0 };
        let ratio = intersection_ratio(rect, 800.0, RootMargin::vertical(-100.0));
        assert!((ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn element_above_viewport_is_not_visible() {
        let rect = ElementRect { top: -500.0, height: 200.0 };
        let ratio = intersection_ratio(rect, 800.0, RootMargin::default());
        assert!(!crosses_threshold(ratio, 0.1));
    }

    #[test]
    fn zero_threshold_still_needs_some_overlap() {
        assert!(!crosses_threshold(0.0, 0.0));
        assert!(crosses_threshold(0.01, 0.0));
    }

    #[test]
    fn margin_renders_as_css_root_margin() {
        assert_eq!(RootMargin::vertical(-50.0).to_string(), "-50px 0px -50px 0px");
    }
}
