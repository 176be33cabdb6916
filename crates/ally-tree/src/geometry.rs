//! Geometry value types for tree nodes
//!
//! Provides [`Rect`] for node bounds and [`Padding`] for auto-layout
//! insets. All coordinates are document-space pixels.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Rect {
    /// Create a rect from position and size
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`)
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Rect of the same size positioned directly below this one
    ///
    /// Used for vertical stacking of annotation blocks: the next block
    /// starts exactly at this block's bottom edge, same `x`.
    #[inline]
    #[must_use]
    pub fn stacked_below(&self, height: f64) -> Self {
        Self {
            x: self.x,
            y: self.bottom(),
            width: self.width,
            height,
        }
    }

    /// Rect translated by the given offsets
    #[inline]
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether two rects overlap on the vertical axis
    #[inline]
    #[must_use]
    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Auto-layout insets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    /// Top inset
    pub top: f64,
    /// Right inset
    pub right: f64,
    /// Bottom inset
    pub bottom: f64,
    /// Left inset
    pub left: f64,
}

impl Padding {
    /// Same inset on all four sides
    #[inline]
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_below_starts_at_bottom_edge() {
        let top = Rect::new(10.0, 20.0, 100.0, 40.0);
        let next = top.stacked_below(32.0);
        assert_eq!(next.x, 10.0);
        assert_eq!(next.y, 60.0);
        assert_eq!(next.height, 32.0);
    }

    #[test]
    fn stacked_rects_do_not_overlap() {
        let top = Rect::new(0.0, 0.0, 50.0, 30.0);
        let next = top.stacked_below(30.0);
        assert!(!top.overlaps_vertically(&next));
    }

    #[test]
    fn uniform_padding() {
        let pad = Padding::uniform(16.0);
        assert_eq!(pad.top, 16.0);
        assert_eq!(pad.left, 16.0);
    }
}
