//! Page geometry of rendered segments
//!
//! The navigation protocol only needs segment boxes in page coordinates and
//! the current scroll offset. The DOM backend lives in `layout::dom`;
//! `MapGeometry` serves hosts that push rectangles in, and tests.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::SegmentId;

/// Axis-aligned box in page (document) coordinates
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Horizontal distance from `x` to the box; zero inside it
    pub fn dx(&self, x: f64) -> f64 {
        if x < self.left {
            self.left - x
        } else if x > self.right() {
            x - self.right()
        } else {
            0.0
        }
    }

    /// Vertical distance from `y` to the box; zero inside it
    pub fn dy(&self, y: f64) -> f64 {
        if y < self.top {
            self.top - y
        } else if y > self.bottom() {
            y - self.bottom()
        } else {
            0.0
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}

pub trait PageGeometry {
    /// Page-coordinate box of a rendered segment
    fn segment_rect(&self, segment_id: &str) -> Option<Rect>;

    /// Current `(scrollX, scrollY)` of the viewport
    fn scroll_offset(&self) -> (f64, f64);
}

/// Geometry with nothing rendered
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGeometry;

impl PageGeometry for NoGeometry {
    fn segment_rect(&self, _segment_id: &str) -> Option<Rect> {
        None
    }

    fn scroll_offset(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
}

/// Host-supplied segment boxes
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapGeometry {
    #[serde(default)]
    pub rects: HashMap<SegmentId, Rect>,
    #[serde(default)]
    pub scroll_x: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl MapGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rect(mut self, segment_id: &str, rect: Rect) -> Self {
        self.rects.insert(segment_id.to_string(), rect);
        self
    }

    pub fn with_scroll(mut self, x: f64, y: f64) -> Self {
        self.scroll_x = x;
        self.scroll_y = y;
        self
    }
}

impl PageGeometry for MapGeometry {
    fn segment_rect(&self, segment_id: &str) -> Option<Rect> {
        self.rects.get(segment_id).copied()
    }

    fn scroll_offset(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_distances() {
        let rect = Rect::new(10.0, 20.0, 30.0, 10.0);
        assert_eq!(rect.dx(25.0), 0.0);
        assert_eq!(rect.dx(0.0), 10.0);
        assert_eq!(rect.dx(45.0), 5.0);
        assert_eq!(rect.dy(35.0), 5.0);
        assert_eq!(rect.dy(25.0), 0.0);
    }
}
