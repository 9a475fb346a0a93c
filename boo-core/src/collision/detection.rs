//! Swept ball detection against the obstacles of a level.
//!
//! Detects the first contact of the moving ball with the bricks, the pad
//! and the arena walls during a step. Bricks and the pad use the analytic
//! tests of [`super::sweep`]; the walls are half-planes.

use crate::shapes::{Circle, Line, Rectangle};
use crate::types::{constants, Collision, CollisionTarget, Contact, Norm, Side, Vec2};

use super::sweep::Sweep;

/// Configuration for collision detection.
#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// How far before the start of the step (step fraction) a contact is
    /// still accepted
    pub contact_epsilon: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            contact_epsilon: constants::CONTACT_EPSILON,
        }
    }
}

/// Collision detector for the ball.
pub struct CollisionDetector {
    pub config: CollisionConfig,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionDetector {
    pub fn new() -> Self {
        Self {
            config: CollisionConfig::default(),
        }
    }

    pub fn with_config(config: CollisionConfig) -> Self {
        Self { config }
    }

    /// Detect the first contact during a step.
    ///
    /// # Arguments
    /// * `ball` - The ball at the start of the step
    /// * `displacement` - Ball movement over the step (must be non-zero)
    /// * `bounds` - Level bounds; the ball stays inside them
    /// * `pad` - The player's pad
    /// * `bricks` - Remaining bricks
    ///
    /// # Returns
    /// The earliest contact within the step that the ball is moving into,
    /// or None.
    pub fn detect(
        &self,
        ball: &Circle,
        displacement: Vec2,
        bounds: &Rectangle,
        pad: &Rectangle,
        bricks: &[Rectangle],
    ) -> Option<Contact> {
        let mut earliest: Option<Contact> = None;
        let mut consider = |contact: Option<Contact>| {
            if let Some(contact) = contact {
                if earliest.map_or(true, |best| contact.collision < best.collision) {
                    earliest = Some(contact);
                }
            }
        };

        for (i, brick) in bricks.iter().enumerate() {
            let target = CollisionTarget::Brick(i);
            consider(self.detect_block_collision(ball, displacement, brick, target));
        }

        consider(self.detect_block_collision(ball, displacement, pad, CollisionTarget::Pad));

        for contact in self.detect_wall_collisions(ball, displacement, bounds) {
            consider(Some(contact));
        }

        if let Some(contact) = earliest {
            crate::log::debug!(
                "contact with {:?} at t={:.6}, normal ({:.3}, {:.3})",
                contact.target,
                contact.time(),
                contact.normal().x(),
                contact.normal().y()
            );
        }

        earliest
    }

    /// Detect collision with a solid rectangle (brick or pad).
    ///
    /// A hit only counts when the ball moves into the rectangle at the
    /// contact point. Leaving a surface it touches, or sitting inside the
    /// rectangle, is not a collision.
    fn detect_block_collision(
        &self,
        ball: &Circle,
        displacement: Vec2,
        block: &Rectangle,
        target: CollisionTarget,
    ) -> Option<Contact> {
        let collision = ball.sweep(displacement, block);
        if !self.in_window(&collision) {
            return None;
        }

        let center_at_hit = ball.center + displacement * collision.time;
        let outward = (center_at_hit - block.closest_point(center_at_hit))
            .try_norm()
            .unwrap_or(collision.norm);

        if outward.dot(&displacement) >= 0.0 {
            return None;
        }

        Some(Contact { target, collision })
    }

    /// Detect collisions with the arena walls and the floor.
    ///
    /// The ball's center is confined to the bounds shrunk by its radius. Each
    /// side of that rectangle is a half-plane boundary `inward · p = value`,
    /// so a path through a corner is caught by both walls meeting there. A
    /// center already on or past a wall line bounces off it at once.
    fn detect_wall_collisions(
        &self,
        ball: &Circle,
        displacement: Vec2,
        bounds: &Rectangle,
    ) -> Vec<Contact> {
        let arena = bounds.shrink(ball.radius);
        let walls = [
            (Line::new(Norm::RIGHT, arena.xmin()), CollisionTarget::Wall(Side::Left)),
            (Line::new(Norm::LEFT, -arena.xmax()), CollisionTarget::Wall(Side::Right)),
            (Line::new(Norm::DOWN, -arena.ymax()), CollisionTarget::Wall(Side::Top)),
            (Line::new(Norm::UP, arena.ymin()), CollisionTarget::Floor),
        ];

        walls
            .iter()
            .filter_map(|(wall, target)| {
                let inward = wall.normal();
                let approach = -inward.dot(&displacement);
                if approach <= 0.0 {
                    return None;
                }

                let distance = inward.dot(&ball.center) - wall.value();
                let collision = Collision::new((distance / approach).max(0.0), inward);
                self.in_window(&collision).then_some(Contact {
                    target: *target,
                    collision,
                })
            })
            .collect()
    }

    fn in_window(&self, collision: &Collision) -> bool {
        collision.is_hit()
            && collision.time >= -self.config.contact_epsilon
            && collision.time <= 1.0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rectangle {
        Rectangle::from_bounds(-10.0, 10.0, 0.0, 20.0)
    }

    fn far_pad() -> Rectangle {
        Rectangle::new(Vec2::new(-7.5, 2.0), 5.0, 1.0)
    }

    #[test]
    fn test_brick_collision() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(0.0, 10.0), 0.5);
        let bricks = [Rectangle::new(Vec2::new(0.0, 12.0), 2.0, 1.0)];

        let contact = detector
            .detect(&ball, Vec2::new(0.0, 2.0), &bounds(), &far_pad(), &bricks)
            .expect("Should hit the brick");

        assert_eq!(contact.target, CollisionTarget::Brick(0));
        // Center must travel from 10.0 to 11.0
        assert!((contact.time() - 0.5).abs() < 1e-9);
        assert_eq!(contact.normal(), Norm::DOWN);
    }

    #[test]
    fn test_no_collision_short_step() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(0.0, 10.0), 0.5);
        let bricks = [Rectangle::new(Vec2::new(0.0, 12.0), 2.0, 1.0)];

        let contact =
            detector.detect(&ball, Vec2::new(0.0, 0.5), &bounds(), &far_pad(), &bricks);
        assert!(contact.is_none(), "Brick is out of reach this step");
    }

    #[test]
    fn test_no_collision_with_brick_behind() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(0.0, 10.0), 0.5);
        let bricks = [Rectangle::new(Vec2::new(0.0, 8.0), 2.0, 1.0)];

        let contact =
            detector.detect(&ball, Vec2::new(0.0, 2.0), &bounds(), &far_pad(), &bricks);
        assert!(contact.is_none(), "Brick behind the ball must not be hit");
    }

    #[test]
    fn test_leaving_touched_surface_is_not_a_collision() {
        let detector = CollisionDetector::new();
        let pad = Rectangle::new(Vec2::new(0.0, 2.0), 5.0, 1.0);
        // Resting on top of the pad, moving up and away
        let ball = Circle::new(Vec2::new(0.0, 3.0), 0.5);

        let contact = detector.detect(&ball, Vec2::new(0.3, 0.3), &bounds(), &pad, &[]);
        assert!(contact.is_none());
    }

    #[test]
    fn test_touching_surface_moving_in_is_a_collision() {
        let detector = CollisionDetector::new();
        let pad = Rectangle::new(Vec2::new(0.0, 2.0), 5.0, 1.0);
        // Touching the pad up to rounding
        let ball = Circle::new(Vec2::new(0.0, 3.0 + 1e-12), 0.5);

        let contact = detector
            .detect(&ball, Vec2::new(0.3, -0.3), &bounds(), &pad, &[])
            .expect("Should hit the pad immediately");
        assert_eq!(contact.target, CollisionTarget::Pad);
        assert!(contact.time().abs() < 1e-9);
    }

    #[test]
    fn test_ball_inside_block_escapes() {
        let detector = CollisionDetector::new();
        let pad = Rectangle::new(Vec2::new(0.0, 2.0), 5.0, 1.0);
        let ball = Circle::new(Vec2::new(0.0, 2.2), 0.5);

        let contact = detector.detect(&ball, Vec2::new(0.0, 1.0), &bounds(), &pad, &[]);
        assert!(contact.is_none(), "A ball inside the pad is let out");
    }

    #[test]
    fn test_wall_collision() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(9.0, 10.0), 0.5);

        let contact = detector
            .detect(&ball, Vec2::new(1.0, 0.0), &bounds(), &far_pad(), &[])
            .expect("Should hit the right wall");

        assert_eq!(contact.target, CollisionTarget::Wall(Side::Right));
        assert!((contact.time() - 0.5).abs() < 1e-9);
        assert_eq!(contact.normal(), Norm::LEFT);
    }

    #[test]
    fn test_floor_collision() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(3.0, 1.0), 0.5);

        let contact = detector
            .detect(&ball, Vec2::new(0.0, -1.0), &bounds(), &far_pad(), &[])
            .expect("Should reach the floor");
        assert_eq!(contact.target, CollisionTarget::Floor);
        assert!((contact.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_corner_of_arena() {
        let detector = CollisionDetector::new();
        // Touching the right wall after a bounce, still heading for the top
        let ball = Circle::new(Vec2::new(9.5, 19.0), 0.5);

        let contact = detector
            .detect(&ball, Vec2::new(-0.2, 1.0), &bounds(), &far_pad(), &[])
            .expect("Should hit the ceiling");
        assert_eq!(contact.target, CollisionTarget::Wall(Side::Top));
    }

    #[test]
    fn test_ball_past_wall_bounces_at_once() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(9.5 + 1e-13, 10.0), 0.5);

        let contact = detector
            .detect(&ball, Vec2::new(1.0, 0.5), &bounds(), &far_pad(), &[])
            .expect("Should bounce off the right wall");
        assert_eq!(contact.target, CollisionTarget::Wall(Side::Right));
        assert_eq!(contact.time(), 0.0);
        assert_eq!(contact.normal(), Norm::LEFT);
    }

    #[test]
    fn test_path_through_arena_corner_hits_a_wall() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(9.0, 19.0), 0.5);

        let contact = detector
            .detect(&ball, Vec2::new(1.0, 1.0), &bounds(), &far_pad(), &[])
            .expect("Should hit a wall at the corner");
        assert!(matches!(
            contact.target,
            CollisionTarget::Wall(Side::Right) | CollisionTarget::Wall(Side::Top)
        ));
        assert!((contact.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_detect_earliest_collision() {
        let detector = CollisionDetector::new();
        let ball = Circle::new(Vec2::new(0.0, 10.0), 0.5);
        let bricks = [
            Rectangle::new(Vec2::new(0.0, 16.0), 2.0, 1.0),
            Rectangle::new(Vec2::new(0.0, 13.0), 2.0, 1.0),
        ];

        let contact = detector
            .detect(&ball, Vec2::new(0.0, 20.0), &bounds(), &far_pad(), &bricks)
            .expect("Should hit a brick");
        // Nearer brick first, well before the ceiling
        assert_eq!(contact.target, CollisionTarget::Brick(1));
    }
}
