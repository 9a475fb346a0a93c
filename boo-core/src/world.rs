//! The game world: arena, bricks, pad and ball.
//!
//! The world is advanced in fixed ticks. Within a tick the ball moves in a
//! straight line until its first contact, bounces, and carries on for the
//! rest of the tick, so a fast ball can bounce several times per tick without
//! passing through anything.
//!
//! ```text
//!   ┌──────────────────────┐
//!   │  ▭▭    ▭▭      ▭▭    │  bricks
//!   │          ●           │  ball
//!   │                      │
//!   │       ▬▬▬▬▬          │  pad
//!   └──────────────────────┘  floor: ball lost
//! ```

use crate::collision::{CollisionDetector, CollisionResolver};
use crate::config::{Level, WorldConfig};
use crate::shapes::{Circle, Rectangle};
use crate::types::{BallState, CollisionTarget, Side, Vec2};

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    /// A brick was hit and removed
    BrickDestroyed(Rectangle),
    PadHit,
    WallHit(Side),
    /// The ball reached the floor and a new one was served
    BallLost,
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<WorldEvent>,
    /// Number of contacts resolved
    pub bounces: u32,
    /// The bounce limit was reached and the rest of the tick was skipped
    pub truncated: bool,
}

/// Level state and fixed-tick ball physics.
pub struct World {
    config: WorldConfig,
    arena: Rectangle,
    bricks: Vec<Rectangle>,
    pad: Rectangle,
    ball: BallState,
    detector: CollisionDetector,
    score: u32,
    lives: u32,
}

impl World {
    /// Empty level with the ball served from the pad.
    pub fn new(config: &WorldConfig) -> Self {
        let mut world = Self {
            config: config.clone(),
            arena: config.arena.to_rectangle(),
            bricks: Vec::new(),
            pad: config.pad,
            ball: BallState::default(),
            detector: CollisionDetector::new(),
            score: 0,
            lives: config.lives,
        };
        world.serve();
        world
    }

    pub fn from_level(config: &WorldConfig, level: &Level) -> Self {
        let mut world = Self::new(config);
        world.load_level(level);
        world
    }

    /// Replace the bricks with those of `level`.
    pub fn load_level(&mut self, level: &Level) {
        crate::log::debug!("level '{}' with {} bricks", level.name, level.bricks.len());
        self.bricks = level.bricks.clone();
    }

    /// The built-in four brick layout.
    pub fn setup_test_level(&mut self) {
        self.bricks = vec![
            Rectangle::new(Vec2::new(-10.0, 15.0), 2.0, 1.0),
            Rectangle::new(Vec2::new(-8.0, 13.0), 2.0, 1.0),
            Rectangle::new(Vec2::new(0.0, 13.0), 2.0, 1.0),
            Rectangle::new(Vec2::new(5.0, 16.0), 2.0, 1.0),
        ];
    }

    /// Move the pad horizontally.
    ///
    /// `pos` runs from 0 (pad against the left wall) to 1 (against the right
    /// wall) and is clamped to that range.
    pub fn set_pad_position(&mut self, pos: f64) {
        let pos = pos.clamp(0.0, 1.0);
        let half_width = self.pad.width() / 2.0;
        let min_x = self.arena.xmin() + half_width;
        let max_x = self.arena.xmax() - half_width;

        let x = min_x * (1.0 - pos) + max_x * pos;
        let y = self.pad.center().y;
        self.pad.move_to(Vec2::new(x, y));
    }

    /// Put the ball on top of the pad and launch it.
    ///
    /// With no lives left the ball stays at rest on the pad.
    pub fn serve(&mut self) {
        let pos = Vec2::new(self.pad.center().x, self.pad.ymax() + self.config.ball_radius);
        let vel = if self.lives > 0 {
            self.config
                .serve_direction
                .try_norm()
                .map_or(Vec2::ZERO, |dir| dir * self.config.ball_speed)
        } else {
            Vec2::ZERO
        };

        crate::log::debug!("serve at {} with velocity {}", pos, vel);
        self.ball = BallState::new(pos, vel);
    }

    /// Set the ball's position and velocity directly.
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
        self.ball = BallState::new(pos, vel);
    }

    /// Advance the world by one tick of `delta` seconds.
    pub fn update(&mut self, delta: f64) -> TickReport {
        let mut report = TickReport::default();
        if delta.is_nan() || delta <= 0.0 {
            return report;
        }

        // Fraction of the tick still to simulate
        let mut remaining = 1.0;

        while remaining > 0.0 && self.ball.is_moving() {
            let displacement = self.ball.vel * (delta * remaining);
            if displacement.try_norm().is_none() {
                self.ball.pos += displacement;
                break;
            }

            if report.bounces >= self.config.max_bounces {
                crate::log::warn!(
                    "bounce limit {} reached, dropping {:.3} of the tick",
                    self.config.max_bounces,
                    remaining
                );
                report.truncated = true;
                break;
            }

            let contact = self.detector.detect(
                &self.ball(),
                displacement,
                &self.arena,
                &self.pad,
                &self.bricks,
            );
            let Some(contact) = contact else {
                self.ball.pos += displacement;
                break;
            };

            self.ball = CollisionResolver::resolve(&self.ball, displacement, &contact);
            remaining *= 1.0 - contact.time().clamp(0.0, 1.0);
            report.bounces += 1;

            match contact.target {
                CollisionTarget::Brick(i) => {
                    let brick = self.bricks.remove(i);
                    self.score += 1;
                    report.events.push(WorldEvent::BrickDestroyed(brick));
                }
                CollisionTarget::Pad => report.events.push(WorldEvent::PadHit),
                CollisionTarget::Wall(side) => report.events.push(WorldEvent::WallHit(side)),
                CollisionTarget::Floor => {
                    self.lives = self.lives.saturating_sub(1);
                    report.events.push(WorldEvent::BallLost);
                    self.serve();
                    break;
                }
            }
        }

        report
    }

    pub fn bricks(&self) -> &[Rectangle] {
        &self.bricks
    }

    pub fn pad(&self) -> &Rectangle {
        &self.pad
    }

    pub fn ball(&self) -> Circle {
        Circle::new(self.ball.pos, self.config.ball_radius)
    }

    pub fn ball_state(&self) -> &BallState {
        &self.ball
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.ball.vel
    }

    /// Level bounds.
    pub fn arena(&self) -> &Rectangle {
        &self.arena
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// All bricks destroyed.
    pub fn is_cleared(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }
}

// =============================================================================
// Tests
// =============================================================================
