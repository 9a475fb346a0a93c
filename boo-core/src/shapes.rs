//! Geometric primitives: lines in Hesse normal form, rays, segments, circles
//! and axis-aligned rectangles.
//!
//! ## Line coordinates
//!
//! Every line carries a 1-D coordinate along its direction (the normal
//! rotated clockwise). Rays and segments are a line plus bounds on that
//! coordinate, so membership is a single range check:
//!
//! ```text
//!            direction →
//!   ─────────●══════════════●──────────  line
//!          start           end
//!            └── segment ───┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{Norm, Vec2};

// =============================================================================
// Line
// =============================================================================

/// An infinite line: all points `p` with `normal · p = value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    normal: Norm,
    value: f64,
}

impl Line {
    pub fn new(normal: Norm, value: f64) -> Self {
        Self { normal, value }
    }

    /// The line through `point` running along `direction`.
    ///
    /// `direction` must not be zero.
    pub fn from_point_and_direction(point: Vec2, direction: Vec2) -> Self {
        let normal = direction.norm().ccw();
        Self {
            normal,
            value: normal.dot(&point),
        }
    }

    /// The line through `u` and `v`, directed from `u` to `v`.
    pub fn between_points(u: Vec2, v: Vec2) -> Self {
        Self::from_point_and_direction(u, v - u)
    }

    pub fn normal(&self) -> Norm {
        self.normal
    }

    pub fn direction(&self) -> Norm {
        self.normal.cw()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Projection of `point` onto the line's direction.
    pub fn coordinate(&self, point: Vec2) -> f64 {
        self.direction().dot(&point)
    }

    /// The point of the line at the given coordinate.
    pub fn point_at_coordinate(&self, coordinate: f64) -> Vec2 {
        let origin = self.normal * self.value;
        origin + self.direction() * coordinate
    }
}

// =============================================================================
// Ray
// =============================================================================

/// Half of a line, from a start coordinate onwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    line: Line,
    start: f64,
}

impl Ray {
    pub fn new(line: Line, start: f64) -> Self {
        Self { line, start }
    }

    /// The ray leaving `point` along `direction`.
    pub fn from_point(point: Vec2, direction: Vec2) -> Self {
        let line = Line::from_point_and_direction(point, direction);
        Self {
            line,
            start: line.coordinate(point),
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn origin(&self) -> Vec2 {
        self.line.point_at_coordinate(self.start)
    }

    /// Whether a point of the underlying line belongs to the ray.
    ///
    /// Only the coordinate is checked; `point` is assumed to lie on the line.
    pub fn contains(&self, point: Vec2) -> bool {
        self.line.coordinate(point) >= self.start
    }
}

// =============================================================================
// Segment
// =============================================================================

/// A closed stretch of a line between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    line: Line,
    start: f64,
    end: f64,
}

impl Segment {
    /// Segment of `line` between two coordinates, `start <= end`.
    pub fn new(line: Line, start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "segment bounds out of order");
        Self { line, start, end }
    }

    /// The segment from `u` to `v`. The two points must differ.
    pub fn between(u: Vec2, v: Vec2) -> Self {
        let line = Line::between_points(u, v);
        Self {
            line,
            start: line.coordinate(u),
            end: line.coordinate(v),
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Whether a point of the underlying line belongs to the segment.
    ///
    /// Only the coordinate is checked; `point` is assumed to lie on the line.
    pub fn contains(&self, point: Vec2) -> bool {
        let c = self.line.coordinate(point);
        c >= self.start && c <= self.end
    }

    pub fn start(&self) -> Vec2 {
        self.line.point_at_coordinate(self.start)
    }

    pub fn end(&self) -> Vec2 {
        self.line.point_at_coordinate(self.end)
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// The same segment translated by `offset`.
    pub fn shift(&self, offset: Vec2) -> Self {
        Self::between(self.start() + offset, self.end() + offset)
    }
}

// =============================================================================
// Circle
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

// =============================================================================
// Rectangle
// =============================================================================

/// Axis-aligned rectangle.
///
/// Serialized as `{ center, width, height }`, which is how levels describe
/// bricks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RectangleDef", into = "RectangleDef")]
pub struct Rectangle {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

#[derive(Serialize, Deserialize)]
struct RectangleDef {
    center: Vec2,
    width: f64,
    height: f64,
}

impl From<RectangleDef> for Rectangle {
    fn from(def: RectangleDef) -> Self {
        Rectangle::new(def.center, def.width, def.height)
    }
}

impl From<Rectangle> for RectangleDef {
    fn from(rect: Rectangle) -> Self {
        RectangleDef {
            center: rect.center(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl Rectangle {
    /// Rectangle of the given size centered on `center`.
    ///
    /// Negative sizes are taken by absolute value.
    pub fn new(center: Vec2, width: f64, height: f64) -> Self {
        let (hw, hh) = (width.abs() / 2.0, height.abs() / 2.0);
        Self {
            xmin: center.x - hw,
            xmax: center.x + hw,
            ymin: center.y - hh,
            ymax: center.y + hh,
        }
    }

    /// Rectangle spanning the given bounds, in any order.
    pub fn from_bounds(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self {
            xmin: x0.min(x1),
            xmax: x0.max(x1),
            ymin: y0.min(y1),
            ymax: y0.max(y1),
        }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.xmin, self.ymax)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.xmax, self.ymax)
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.xmin, self.ymin)
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.xmax, self.ymin)
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    pub fn top(&self) -> Segment {
        Segment::between(self.top_left(), self.top_right())
    }

    pub fn bottom(&self) -> Segment {
        Segment::between(self.bottom_left(), self.bottom_right())
    }

    pub fn left(&self) -> Segment {
        Segment::between(self.top_left(), self.bottom_left())
    }

    pub fn right(&self) -> Segment {
        Segment::between(self.top_right(), self.bottom_right())
    }

    /// Closed containment test.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// The point of the rectangle (boundary or interior) nearest to `p`.
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.xmin, self.xmax), p.y.clamp(self.ymin, self.ymax))
    }

    /// The rectangle with every side pulled inward by `margin`.
    ///
    /// Collapses to the center line when `margin` exceeds a half-size.
    pub fn shrink(&self, margin: f64) -> Self {
        let c = self.center();
        let w = (self.width() - 2.0 * margin).max(0.0);
        let h = (self.height() - 2.0 * margin).max(0.0);
        Self::new(c, w, h)
    }

    /// Move the rectangle so it is centered on `center`, keeping its size.
    pub fn move_to(&mut self, center: Vec2) {
        let offset = center - self.center();
        self.xmin += offset.x;
        self.xmax += offset.x;
        self.ymin += offset.y;
        self.ymax += offset.y;
    }
}

// =============================================================================
// Tests
// =============================================================================
