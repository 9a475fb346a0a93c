//! # Boo Core
//!
//! Swept 2D collision detection and world physics for a ball-and-paddle
//! arcade game.
//!
//! ## Architecture
//!
//! - `types`: Core data structures (Vec2, Norm, ball state, collision results)
//! - `shapes`: Geometric primitives (lines, rays, segments, circles, rectangles)
//! - `collision`: Intersections, time of impact, detection and bounce response
//! - `world`: Level state and the fixed-tick update
//! - `timer`: Fixed-step frame timer
//! - `config`: YAML settings and level loader
//! - `log`: Logging macros (optional `tracing` backend)

pub mod collision;
pub mod config;
pub mod log;
pub mod shapes;
pub mod timer;
pub mod types;
pub mod world;
