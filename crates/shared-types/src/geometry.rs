//! Geometric primitives for the table markup editor
//!
//! All coordinates are f64 in image space. Screen-to-image mapping is the
//! responsibility of the embedding view, not of these types.

use serde::{Deserialize, Serialize};

/// A 2D point in image space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Coordinate along the given axis
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Width/height pair, e.g. a canvas or image size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scaled(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

/// Axis along which separators are placed and dragged.
///
/// `X` addresses columns (vertical separators moving horizontally), `Y`
/// addresses rows (horizontal separators moving vertically).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn perpendicular(&self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Corner of a boundary rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// An ordered pair of points.
///
/// Separator lines keep `p1` as the reference end: the top end of a
/// vertical separator and the left end of a horizontal one, as generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSeg {
    pub p1: Point,
    pub p2: Point,
}

impl LineSeg {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn length(&self) -> f64 {
        self.p1.distance_to(self.p2)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> LineSeg {
        LineSeg::new(self.p1.translated(dx, dy), self.p2.translated(dx, dy))
    }

    /// Perpendicular distance from a point to the carrier line of this
    /// segment (`|cross product| / segment length`). Degenerate segments
    /// fall back to the point-to-point distance.
    pub fn carrier_distance_to(&self, point: Point) -> f64 {
        let length = self.length();
        if length == 0.0 {
            return self.p1.distance_to(point);
        }
        let double_triangle_area = ((self.p2.x - self.p1.x) * (self.p1.y - point.y)
            - (self.p1.x - point.x) * (self.p2.y - self.p1.y))
            .abs();
        double_triangle_area / length
    }
}

/// An axis-aligned rectangle described by its top-left and bottom-right
/// corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top_left: Point::new(x, y),
            bottom_right: Point::new(x + width, y + height),
        }
    }

    /// Build a rectangle from two opposite corners given in any order.
    ///
    /// The corners are normalized per axis so width and height are never
    /// negative, whichever direction the defining drag travelled.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn left(&self) -> f64 {
        self.top_left.x
    }

    pub fn right(&self) -> f64 {
        self.bottom_right.x
    }

    pub fn top(&self) -> f64 {
        self.top_left.y
    }

    pub fn bottom(&self) -> f64 {
        self.bottom_right.y
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => Point::new(self.right(), self.top()),
            Corner::BottomLeft => Point::new(self.left(), self.bottom()),
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Edge of the rectangle nearest the given axis: the left side for
    /// `X`, the top side for `Y`. Separator distributions are measured
    /// from this edge.
    pub fn near_edge(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.left(),
            Axis::Y => self.top(),
        }
    }

    pub fn far_edge(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.right(),
            Axis::Y => self.bottom(),
        }
    }

    /// Extent of the rectangle along the given axis
    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width(),
            Axis::Y => self.height(),
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            top_left: self.top_left.translated(dx, dy),
            bottom_right: self.bottom_right.translated(dx, dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let expected = Rect::from_corners(Point::new(10.0, 20.0), Point::new(110.0, 170.0));
        for (a, b) in [
            (Point::new(110.0, 170.0), Point::new(10.0, 20.0)),
            (Point::new(10.0, 170.0), Point::new(110.0, 20.0)),
            (Point::new(110.0, 20.0), Point::new(10.0, 170.0)),
        ] {
            let rect = Rect::from_corners(a, b);
            assert_eq!(rect, expected);
            assert!(rect.width() > 0.0);
            assert!(rect.height() > 0.0);
        }
    }

    #[test]
    fn test_rect_corners() {
        let rect = Rect::new(10.0, 20.0, 100.0, 150.0);
        assert_eq!(rect.corner(Corner::TopLeft), Point::new(10.0, 20.0));
        assert_eq!(rect.corner(Corner::TopRight), Point::new(110.0, 20.0));
        assert_eq!(rect.corner(Corner::BottomLeft), Point::new(10.0, 170.0));
        assert_eq!(rect.corner(Corner::BottomRight), Point::new(110.0, 170.0));
    }

    #[test]
    fn test_carrier_distance() {
        let seg = LineSeg::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(seg.carrier_distance_to(Point::new(50.0, 7.0)), 7.0);
        assert_eq!(seg.carrier_distance_to(Point::new(50.0, 0.0)), 0.0);
        // Distance is to the carrier line, so x outside the span does not
        // change the perpendicular component.
        assert_eq!(seg.carrier_distance_to(Point::new(150.0, 7.0)), 7.0);
    }

    #[test]
    fn test_carrier_distance_degenerate_segment() {
        let seg = LineSeg::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert_eq!(seg.carrier_distance_to(Point::new(8.0, 9.0)), 5.0);
    }
}
