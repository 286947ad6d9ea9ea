//! Geometric types for the drawing canvas
//!
//! All coordinates are in logical canvas units.

use serde::{Deserialize, Serialize};

/// A point on the canvas in logical units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point from coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Translate the point by the given offset
    pub fn translate(&self, dx: f32, dy: f32) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned bounding rectangle in logical canvas units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Create a new bounds rectangle from edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds containing a single point
    pub fn from_point(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Smallest bounds containing both rectangles
    pub fn union(&self, other: Bounds) -> Bounds {
        Bounds {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grow the rectangle by the given margin on every side
    pub fn inflate(&self, margin: f32) -> Bounds {
        Bounds {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Translate the rectangle by the given offset
    pub fn translate(&self, dx: f32, dy: f32) -> Bounds {
        Bounds {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Normalize min/max coordinates from arbitrary anchor/cursor points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Heading of a line segment in degrees, rotated so that an arrowhead
/// triangle (apex up at zero rotation) points along the segment
#[inline]
pub fn arrowhead_angle(start: Point, end: Point) -> f32 {
    (end.y - start.y).atan2(end.x - start.x).to_degrees() + 90.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn normalize_rect_orders_corners() {
        assert_eq!(normalize_rect(10.0, 20.0, 4.0, 2.0), (4.0, 2.0, 10.0, 20.0));
    }

    #[test]
    fn arrowhead_angle_points_along_segment() {
        // Pointing straight right: atan2 = 0, head rotated 90
        let a = arrowhead_angle(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((a - 90.0).abs() < 1e-4);
        // Pointing straight down: atan2 = 90, head rotated 180
        let a = arrowhead_angle(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        assert!((a - 180.0).abs() < 1e-4);
    }
}
