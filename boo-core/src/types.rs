//! Core value types for the physics core.
//!
//! World units are arbitrary "cells" (a brick is 2×1 in the test level), with
//! the Y axis pointing up. Collision times are fractions of a simulation step:
//! `0.0` is the start of the step, `1.0` is its end.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// =============================================================================
// Vec2 - 2D Vector
// =============================================================================

/// A 2D vector used for positions, velocities and displacements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude (length) of the vector
    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction: normalizing it yields NaN components.
    /// Use [`Vec2::try_norm`] when the input may be zero.
    pub fn norm(&self) -> Norm {
        Norm::new(self.x, self.y)
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector.
    pub fn try_norm(&self) -> Option<Norm> {
        if self.magnitude_squared() < constants::EPSILON * constants::EPSILON {
            None
        } else {
            Some(self.norm())
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The vector rotated 90° counter-clockwise.
    pub fn ccw(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Reflect vector around a normal
    pub fn reflect(&self, normal: &Norm) -> Self {
        let n = Vec2::from(*normal);
        *self - n * (2.0 * self.dot(&n))
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// Operator overloads for Vec2
impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, vector: Vec2) -> Vec2 {
        vector * self
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, scalar: f64) {
        self.x /= scalar;
        self.y /= scalar;
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl From<Norm> for Vec2 {
    fn from(norm: Norm) -> Self {
        Self {
            x: norm.x,
            y: norm.y,
        }
    }
}

// =============================================================================
// Norm - Unit Vector
// =============================================================================

/// A 2D vector of length 1.
///
/// The components are private: a `Norm` is either produced by normalizing an
/// arbitrary vector ([`Norm::new`], [`Vec2::norm`]) or derived from another
/// `Norm` by rotation or negation, which cannot change the length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Norm {
    x: f64,
    y: f64,
}

impl Norm {
    /// +X
    pub const RIGHT: Norm = Norm { x: 1.0, y: 0.0 };
    /// -X
    pub const LEFT: Norm = Norm { x: -1.0, y: 0.0 };
    /// +Y
    pub const UP: Norm = Norm { x: 0.0, y: 1.0 };
    /// -Y
    pub const DOWN: Norm = Norm { x: 0.0, y: -1.0 };

    /// Normalize `(x, y)` by dividing through by its length.
    pub fn new(x: f64, y: f64) -> Self {
        let len = (x * x + y * y).sqrt();
        Self {
            x: x / len,
            y: y / len,
        }
    }

    /// Build a unit vector from components the caller knows to be normalized.
    ///
    /// No division takes place; debug builds assert the length.
    pub fn new_unchecked(x: f64, y: f64) -> Self {
        debug_assert!(
            ((x * x + y * y) - 1.0).abs() < 1e-6,
            "Norm::new_unchecked called with non-unit ({}, {})",
            x,
            y
        );
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Rotated 90° clockwise.
    pub fn cw(&self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Rotated 90° counter-clockwise.
    pub fn ccw(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Dot product with an arbitrary vector
    pub fn dot(&self, v: &Vec2) -> f64 {
        self.x * v.x + self.y * v.y
    }
}

impl Neg for Norm {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Norm {
    type Output = Vec2;
    fn mul(self, scalar: f64) -> Vec2 {
        Vec2::from(self) * scalar
    }
}

impl From<Vec2> for Norm {
    fn from(v: Vec2) -> Self {
        v.norm()
    }
}

// =============================================================================
// Ball State
// =============================================================================

/// Position and velocity of the ball.
///
/// The velocity is in world units per second; the displacement over one
/// simulation step is `vel * delta`. The radius is a world setting, not part
/// of the state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl BallState {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Ball at rest at a given position
    pub fn at_rest(pos: Vec2) -> Self {
        Self { pos, vel: Vec2::ZERO }
    }

    pub fn is_moving(&self) -> bool {
        self.vel.try_norm().is_some()
    }
}

// =============================================================================
// Collision Types
// =============================================================================

/// Result of a swept collision test.
///
/// `time` is the fraction of the step at which contact happens, or
/// `f64::INFINITY` when there is no contact. `norm` is the surface normal at
/// the contact point and is only meaningful for a hit.
///
/// Collisions are ordered by time, so the earliest of several results is
/// their minimum and [`Collision::NONE`] never wins against a hit.
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    pub time: f64,
    pub norm: Norm,
}

impl Collision {
    pub const NONE: Collision = Collision {
        time: f64::INFINITY,
        norm: Norm::UP,
    };

    pub fn new(time: f64, norm: Norm) -> Self {
        Self { time, norm }
    }

    /// Whether contact occurs at all (finite time).
    pub fn is_hit(&self) -> bool {
        self.time.is_finite()
    }

    /// Whether contact occurs during the current step.
    pub fn within_step(&self) -> bool {
        self.is_hit() && (0.0..=1.0).contains(&self.time)
    }

    /// The contact normal, for a hit.
    pub fn normal(&self) -> Option<Norm> {
        self.is_hit().then_some(self.norm)
    }
}

impl Default for Collision {
    fn default() -> Self {
        Self::NONE
    }
}

/// Equality follows the time ordering: hits at the same time are equal
/// whatever their normals.
impl PartialEq for Collision {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl PartialOrd for Collision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.time.partial_cmp(&other.time)
    }
}

/// Which side of the arena a wall is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
}

/// The obstacle a contact was found against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionTarget {
    Brick(usize),
    Pad,
    Wall(Side),
    Floor,
}

/// A collision tagged with the obstacle that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub target: CollisionTarget,
    pub collision: Collision,
}

impl Contact {
    pub fn time(&self) -> f64 {
        self.collision.time
    }

    pub fn normal(&self) -> Norm {
        self.collision.norm
    }
}

// =============================================================================
// Constants
// =============================================================================

pub mod constants {
    /// Small value for floating-point comparisons
    pub const EPSILON: f64 = 1e-9;

    /// How far before the start of a step (as a step fraction) a contact may
    /// be reported and still be accepted. Covers rounding when the ball
    /// already touches a surface at the start of the step.
    pub const CONTACT_EPSILON: f64 = 1e-9;
}

// =============================================================================
// Tests
// =============================================================================
