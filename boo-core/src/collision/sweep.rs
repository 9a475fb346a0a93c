//! Analytic time-of-impact tests for a body moving at constant velocity
//! against a static shape.
//!
//! `velocity` is always the full displacement over the step, so a collision
//! time of `0.5` means contact happens halfway through the step. Times are
//! not clamped: a result beyond `1.0` is a contact in a later step, and a
//! negative result means the body starts behind or inside the shape along its
//! direction of motion. Callers decide which window they accept (see
//! [`Collision::within_step`]).
//!
//! The velocity must be non-zero; a zero velocity has no direction and yields
//! a NaN time.

use crate::shapes::{Circle, Ray, Rectangle, Segment};
use crate::types::{Collision, Vec2};

use super::intersection::Intersect;

/// Bodies that can be swept against a static `T`.
pub trait Sweep<T> {
    /// First contact of `self` moving by `velocity` with `target`.
    fn sweep(&self, velocity: Vec2, target: &T) -> Collision;
}

/// First contact of `body` moving by `velocity` with the static `target`.
pub fn collision<B: Sweep<T>, T>(body: &B, velocity: Vec2, target: &T) -> Collision {
    body.sweep(velocity, target)
}

/// The earliest of several collisions; [`Collision::NONE`] if there are none.
pub fn earliest<I>(collisions: I) -> Collision
where
    I: IntoIterator<Item = Collision>,
{
    collisions
        .into_iter()
        .fold(Collision::NONE, |best, c| if c < best { c } else { best })
}

/// Moving point against a static circle.
///
/// In the frame of the direction of motion `n` and its perpendicular `u`, the
/// center sits at lateral offset `d` and longitudinal offset `lp`. The path
/// enters the circle at `lq = lp - sqrt(r² - d²)`.
impl Sweep<Circle> for Vec2 {
    fn sweep(&self, velocity: Vec2, circle: &Circle) -> Collision {
        let r = circle.radius;
        let n = velocity.norm();
        let u = n.ccw();

        let d = u.dot(&circle.center) - u.dot(self);
        if d * d > r * r {
            return Collision::NONE;
        }

        let lp = n.dot(&circle.center) - n.dot(self);
        let lq = lp - (r * r - d * d).sqrt();

        let contact = *self + n * lq;
        // A zero-radius circle has no surface direction; face the motion.
        let norm = (contact - circle.center).try_norm().unwrap_or(-n);

        Collision::new(lq / velocity.magnitude(), norm)
    }
}

/// Moving circle against a static point: the same as the circle's center
/// moving against a circle of equal radius around the point. The normal
/// points from the point toward the center of the moving circle.
impl Sweep<Vec2> for Circle {
    fn sweep(&self, velocity: Vec2, point: &Vec2) -> Collision {
        self.center
            .sweep(velocity, &Circle::new(*point, self.radius))
    }
}

/// Moving point against a static segment. The normal is the segment's,
/// turned to face the approaching point.
impl Sweep<Segment> for Vec2 {
    fn sweep(&self, velocity: Vec2, segment: &Segment) -> Collision {
        let Some(x) = Ray::from_point(*self, velocity).intersection(segment) else {
            return Collision::NONE;
        };

        let mut norm = segment.line().normal();
        if norm.dot(&velocity) > 0.0 {
            norm = -norm;
        }

        Collision::new((x - *self).magnitude() / velocity.magnitude(), norm)
    }
}

/// Moving circle against a static rectangle.
///
/// The rectangle grown by the circle's radius is a rounded rectangle: four
/// corner circles of that radius plus the four sides pushed out by it. The
/// circle's center is swept against those eight pieces and the earliest
/// contact wins.
///
/// ```text
///        ╭───────────╮
///       (●)─────────(●)
///        │           │
///        │           │
///       (●)─────────(●)
///        ╰───────────╯
/// ```
impl Sweep<Rectangle> for Circle {
    fn sweep(&self, velocity: Vec2, rectangle: &Rectangle) -> Collision {
        let r = self.radius;
        let corners = rectangle.corners().map(|corner| Circle::new(corner, r));
        let sides = [
            rectangle.top().shift(Vec2::new(0.0, r)),
            rectangle.bottom().shift(Vec2::new(0.0, -r)),
            rectangle.left().shift(Vec2::new(-r, 0.0)),
            rectangle.right().shift(Vec2::new(r, 0.0)),
        ];

        let center = self.center;
        earliest(
            corners
                .iter()
                .map(|corner| center.sweep(velocity, corner))
                .chain(sides.iter().map(|side| center.sweep(velocity, side))),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Norm;

    const TOLERANCE: f64 = 1e-9;

    fn assert_norm(actual: Norm, expected: Vec2) {
        let a = Vec2::from(actual);
        assert!(
            (a - expected).magnitude() < TOLERANCE,
            "expected normal {}, got {}",
            expected,
            a
        );
    }

    // -------------------------------------------------------------------------
    // Point vs circle
    // -------------------------------------------------------------------------

    #[test]
    fn test_point_circle_head_on() {
        let circle = Circle::new(Vec2::new(5.0, 0.0), 1.0);
        let c = collision(&Vec2::ZERO, Vec2::new(8.0, 0.0), &circle);

        assert!((c.time - 0.5).abs() < TOLERANCE, "time = {}", c.time);
        assert_norm(c.norm, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_point_circle_miss() {
        let circle = Circle::new(Vec2::new(5.0, 2.0), 1.0);
        let c = collision(&Vec2::ZERO, Vec2::new(8.0, 0.0), &circle);

        assert!(!c.is_hit());
    }

    #[test]
    fn test_point_circle_contact_lies_on_circle() {
        let circle = Circle::new(Vec2::new(3.0, 4.0), 1.5);
        let starts = [
            (Vec2::new(-2.0, 1.0), Vec2::new(6.0, 2.5)),
            (Vec2::new(3.5, -3.0), Vec2::new(0.1, 10.0)),
            (Vec2::new(9.0, 9.0), Vec2::new(-4.0, -3.0)),
            // Grazing the far side of the chord
            (Vec2::new(0.0, 5.4), Vec2::new(1.0, 0.0)),
        ];

        for (point, velocity) in starts {
            let c = collision(&point, velocity, &circle);
            assert!(c.is_hit(), "{} along {} should hit", point, velocity);

            let contact = point + velocity * c.time;
            let dist = (contact - circle.center).magnitude();
            assert!(
                (dist - circle.radius).abs() < 1e-7,
                "contact {} at distance {}",
                contact,
                dist
            );
            // The normal points from the center to the contact point
            assert_norm(c.norm, (contact - circle.center) / circle.radius);
        }
    }

    #[test]
    fn test_point_circle_hit_iff_line_within_radius() {
        let circle = Circle::new(Vec2::ZERO, 2.0);
        let velocity = Vec2::new(10.0, 0.0);

        for i in -30..=30 {
            let offset = i as f64 * 0.1;
            let point = Vec2::new(-5.0, offset);
            let c = collision(&point, velocity, &circle);
            assert_eq!(
                c.is_hit(),
                offset.abs() <= 2.0,
                "lateral offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_point_circle_behind_is_negative() {
        let circle = Circle::new(Vec2::new(-5.0, 0.0), 1.0);
        let c = collision(&Vec2::ZERO, Vec2::new(2.0, 0.0), &circle);

        assert!(c.is_hit());
        assert!(c.time < 0.0, "time = {}", c.time);
        assert!(!c.within_step());
    }

    #[test]
    fn test_point_inside_circle_is_negative() {
        let circle = Circle::new(Vec2::ZERO, 2.0);
        let c = collision(&Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.0), &circle);

        assert!((c.time + 2.5).abs() < TOLERANCE, "time = {}", c.time);
    }

    #[test]
    fn test_point_zero_radius_circle_dead_center() {
        let circle = Circle::new(Vec2::new(0.0, 4.0), 0.0);
        let c = collision(&Vec2::ZERO, Vec2::new(0.0, 8.0), &circle);

        assert!((c.time - 0.5).abs() < TOLERANCE);
        assert_norm(c.norm, Vec2::new(0.0, -1.0));
    }

    // -------------------------------------------------------------------------
    // Circle vs point
    // -------------------------------------------------------------------------

    #[test]
    fn test_circle_point_too_slow() {
        let circle = Circle::new(Vec2::ZERO, 1.0);
        let c = collision(&circle, Vec2::new(1.0, 0.0), &Vec2::new(3.0, 0.0));

        // Needs 2 units of travel, only 1 available this step
        assert!((c.time - 2.0).abs() < TOLERANCE);
        assert!(!c.within_step());
    }

    #[test]
    fn test_circle_point_hit() {
        let circle = Circle::new(Vec2::ZERO, 1.0);
        let c = collision(&circle, Vec2::new(4.0, 0.0), &Vec2::new(3.0, 0.0));

        assert!(c.within_step());
        assert!((c.time - 0.5).abs() < TOLERANCE);
        assert_norm(c.norm, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_circle_point_normal_faces_moving_circle() {
        let circle = Circle::new(Vec2::new(1.0, 1.0), 0.5);
        let point = Vec2::new(4.0, 1.3);
        let velocity = Vec2::new(5.0, 0.0);
        let c = collision(&circle, velocity, &point);

        let center_at_impact = circle.center + velocity * c.time;
        assert_norm(c.norm, (center_at_impact - point) / circle.radius);
        // Usable for reflection: opposes the motion
        assert!(c.norm.dot(&velocity) < 0.0);
    }

    // -------------------------------------------------------------------------
    // Point vs segment
    // -------------------------------------------------------------------------

    #[test]
    fn test_point_segment_hit() {
        let segment = Segment::between(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0));
        let c = collision(&Vec2::ZERO, Vec2::new(0.0, 4.0), &segment);

        assert!((c.time - 0.5).abs() < TOLERANCE);
        assert_norm(c.norm, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_point_segment_normal_faces_approach_from_either_side() {
        let segment = Segment::between(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));

        let from_below = collision(&Vec2::new(0.0, -1.0), Vec2::new(0.0, 2.0), &segment);
        let from_above = collision(&Vec2::new(0.0, 1.0), Vec2::new(0.0, -2.0), &segment);

        assert_norm(from_below.norm, Vec2::new(0.0, -1.0));
        assert_norm(from_above.norm, Vec2::new(0.0, 1.0));

        // Reversed segment, same answers
        let reversed = Segment::between(Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0));
        let c = collision(&Vec2::new(0.0, 1.0), Vec2::new(0.0, -2.0), &reversed);
        assert_norm(c.norm, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_point_segment_oblique_time() {
        let segment = Segment::between(Vec2::new(3.0, -10.0), Vec2::new(3.0, 10.0));
        let c = collision(&Vec2::ZERO, Vec2::new(6.0, 8.0), &segment);

        // Reaches x = 3 halfway through
        assert!((c.time - 0.5).abs() < TOLERANCE);
        assert_norm(c.norm, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_point_segment_miss() {
        let segment = Segment::between(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0));

        // Moving away
        assert!(!collision(&Vec2::ZERO, Vec2::new(0.0, -4.0), &segment).is_hit());
        // Past the end
        assert!(!collision(&Vec2::new(2.0, 0.0), Vec2::new(0.0, 4.0), &segment).is_hit());
        // Parallel
        assert!(!collision(&Vec2::new(-5.0, 2.0), Vec2::new(1.0, 0.0), &segment).is_hit());
    }

    // -------------------------------------------------------------------------
    // Circle vs rectangle
    // -------------------------------------------------------------------------

    #[test]
    fn test_zero_radius_point_hits_bottom_edge() {
        let point = Circle::new(Vec2::ZERO, 0.0);
        let rect = Rectangle::new(Vec2::new(0.0, 3.0), 2.0, 2.0);
        let c = collision(&point, Vec2::new(0.0, 5.0), &rect);

        assert!((c.time - 0.4).abs() < TOLERANCE, "time = {}", c.time);
        assert_norm(c.norm, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_circle_hits_rectangle_side() {
        let ball = Circle::new(Vec2::new(-5.0, 0.2), 0.5);
        let rect = Rectangle::new(Vec2::ZERO, 2.0, 2.0);
        let c = collision(&ball, Vec2::new(7.0, 0.0), &rect);

        // Center must reach x = -1.5
        assert!((c.time - 0.5).abs() < TOLERANCE, "time = {}", c.time);
        assert_norm(c.norm, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_circle_hits_rectangle_corner() {
        let ball = Circle::new(Vec2::new(-4.0, -4.0), 1.0);
        let rect = Rectangle::new(Vec2::ZERO, 2.0, 2.0);
        let c = collision(&ball, Vec2::new(4.0, 4.0), &rect);

        // Diagonal approach meets the bottom-left corner head on
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_norm(c.norm, Vec2::new(-s, -s));

        let center_at_impact = ball.center + Vec2::new(4.0, 4.0) * c.time;
        let dist = (center_at_impact - rect.bottom_left()).magnitude();
        assert!((dist - 1.0).abs() < 1e-7);
    }

    #[test]
    fn test_circle_passes_rectangle_corner() {
        let ball = Circle::new(Vec2::new(-4.0, 2.8), 0.5);
        let rect = Rectangle::new(Vec2::ZERO, 2.0, 2.0);
        // Rounded corner only reaches y = 1.5 at x = -1
        let c = collision(&ball, Vec2::new(8.0, -1.0), &rect);

        assert!(!c.is_hit(), "unexpected hit at {}", c.time);
    }

    #[test]
    fn test_circle_rectangle_is_min_of_pieces() {
        let rect = Rectangle::new(Vec2::new(1.0, 2.0), 3.0, 1.0);
        let cases = [
            (Circle::new(Vec2::new(-3.0, -1.0), 0.4), Vec2::new(5.0, 3.5)),
            (Circle::new(Vec2::new(6.0, 2.3), 0.25), Vec2::new(-9.0, 0.1)),
            (Circle::new(Vec2::new(1.0, 8.0), 1.0), Vec2::new(0.5, -7.0)),
            (Circle::new(Vec2::new(-2.6, 4.0), 0.5), Vec2::new(1.0, -1.0)),
        ];

        for (ball, velocity) in cases {
            let r = ball.radius;
            let c = collision(&ball, velocity, &rect);

            let mut pieces: Vec<Collision> = rect
                .corners()
                .iter()
                .map(|corner| collision(&ball.center, velocity, &Circle::new(*corner, r)))
                .collect();
            pieces.push(collision(&ball.center, velocity, &rect.top().shift(Vec2::new(0.0, r))));
            pieces.push(collision(&ball.center, velocity, &rect.bottom().shift(Vec2::new(0.0, -r))));
            pieces.push(collision(&ball.center, velocity, &rect.left().shift(Vec2::new(-r, 0.0))));
            pieces.push(collision(&ball.center, velocity, &rect.right().shift(Vec2::new(r, 0.0))));

            assert!(c.is_hit());
            for piece in pieces {
                assert!(c.time <= piece.time, "{} > {}", c.time, piece.time);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    #[test]
    fn test_earliest() {
        let hits = [
            Collision::new(0.7, Norm::UP),
            Collision::NONE,
            Collision::new(0.2, Norm::LEFT),
            Collision::new(0.9, Norm::DOWN),
        ];

        let best = earliest(hits);
        assert_eq!(best.time, 0.2);
        assert_eq!(best.norm, Norm::LEFT);

        assert!(!earliest(std::iter::empty()).is_hit());
        assert!(!earliest([Collision::NONE, Collision::NONE]).is_hit());
    }

    #[test]
    fn test_earliest_across_bricks() {
        let ball = Circle::new(Vec2::new(0.0, 0.0), 0.5);
        let velocity = Vec2::new(0.0, 10.0);
        let bricks = [
            Rectangle::new(Vec2::new(0.0, 8.0), 2.0, 1.0),
            Rectangle::new(Vec2::new(0.5, 4.0), 2.0, 1.0),
            Rectangle::new(Vec2::new(6.0, 2.0), 2.0, 1.0),
        ];

        let best = earliest(bricks.iter().map(|b| collision(&ball, velocity, b)));
        // Bottom of the middle brick is at 3.5, minus radius
        assert!((best.time - 0.3).abs() < TOLERANCE, "time = {}", best.time);
    }
}
