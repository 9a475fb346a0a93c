//! Exact intersections between lines, rays and segments.

use crate::shapes::{Line, Ray, Segment};
use crate::types::Vec2;

/// Shapes that can be intersected with a `T`, yielding a single point.
pub trait Intersect<T> {
    fn intersection(&self, other: &T) -> Option<Vec2>;
}

/// Intersection point of `a` and `b`, if there is exactly one.
pub fn intersection<A: Intersect<B>, B>(a: &A, b: &B) -> Option<Vec2> {
    a.intersection(b)
}

impl Intersect<Line> for Line {
    /// Solves the two Hesse equations with Cramer's rule:
    ///
    /// ```text
    /// a1 * x + b1 * y = c1
    /// a2 * x + b2 * y = c2
    /// ```
    ///
    /// Parallel and coincident lines (zero determinant) have no single
    /// intersection point and yield `None`.
    fn intersection(&self, other: &Line) -> Option<Vec2> {
        let (a1, b1, c1) = (self.normal().x(), self.normal().y(), self.value());
        let (a2, b2, c2) = (other.normal().x(), other.normal().y(), other.value());

        let det = a1 * b2 - a2 * b1;
        if det == 0.0 {
            return None;
        }

        let dx = c1 * b2 - c2 * b1;
        let dy = a1 * c2 - a2 * c1;

        Some(Vec2::new(dx / det, dy / det))
    }
}

impl Intersect<Segment> for Ray {
    fn intersection(&self, segment: &Segment) -> Option<Vec2> {
        let x = self.line().intersection(segment.line())?;
        (self.contains(x) && segment.contains(x)).then_some(x)
    }
}

impl Intersect<Ray> for Segment {
    fn intersection(&self, ray: &Ray) -> Option<Vec2> {
        ray.intersection(self)
    }
}

// =============================================================================
// Tests
// =============================================================================
