//! Collision detection and resolution for the ball.
//!
//! This module handles:
//! - **Intersection**: Exact line, ray and segment intersections
//! - **Sweep**: Time of impact of a moving body against a static shape
//! - **Detection**: Finding the first contact with the obstacles of a level
//! - **Resolution**: Bouncing the ball off the contact surface
//!
//! ## Swept Collisions
//!
//! Instead of checking if the ball overlaps an obstacle after moving (which
//! tunnels through thin bricks at high speeds), we solve for the fraction of
//! the step at which the ball's path first touches the obstacle.
//!
//! ```text
//! t=0                      t=1
//!  ●─────────────●- - - - -○
//!  Ball        contact     Ball
//!  start     ┌─────────┐   end (never reached)
//!            │  brick  │
//!            └─────────┘
//! ```
//!
//! This detects collisions regardless of ball speed or step size.

pub mod detection;
pub mod intersection;
pub mod resolution;
pub mod sweep;

pub use detection::*;
pub use intersection::{intersection, Intersect};
pub use resolution::*;
pub use sweep::{collision, earliest, Sweep};
