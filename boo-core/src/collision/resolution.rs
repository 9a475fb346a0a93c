//! Collision response for the ball.
//!
//! Obstacles are static and collisions are perfectly elastic: the ball is
//! moved to the point of impact and its velocity is mirrored about the
//! contact normal.
//!
//! ```text
//!          ╲   ↑ n   ╱
//!     v     ╲  │    ╱   v' = v - 2(v·n)n
//!            ╲ │   ╱
//!     ════════╲│╱════════ surface
//! ```
//!
//! Speed is preserved, so the ball never gains or loses energy on a bounce.

use crate::types::{BallState, Contact, Vec2};

/// Collision resolver for the ball.
pub struct CollisionResolver;

impl CollisionResolver {
    /// Resolve a contact and return the new ball state.
    ///
    /// # Arguments
    /// * `ball` - Ball state at the start of the (remaining) step
    /// * `displacement` - Ball movement over that step
    /// * `contact` - The contact found for that movement
    ///
    /// # Returns
    /// Ball state at the moment of impact with the reflected velocity.
    pub fn resolve(ball: &BallState, displacement: Vec2, contact: &Contact) -> BallState {
        BallState {
            pos: Self::advance_to_collision(ball.pos, displacement, contact),
            vel: ball.vel.reflect(&contact.normal()),
        }
    }

    /// Position reached at the time of impact.
    ///
    /// Contacts reported marginally before the start of the step do not move
    /// the ball backwards.
    pub fn advance_to_collision(pos: Vec2, displacement: Vec2, contact: &Contact) -> Vec2 {
        pos + displacement * contact.time().max(0.0)
    }
}

// =============================================================================
// Tests
// =============================================================================
