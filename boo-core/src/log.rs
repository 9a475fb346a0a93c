//! Logging for contacts, serves, level loading and the per-tick bounce cap.
//!
//! With the `tracing` feature `debug!` and `warn!` are the `tracing` macros
//! and reach whatever subscriber the host installs. Without it they compile
//! to nothing, so the physics loop carries no logging cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
