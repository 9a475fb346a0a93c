//! Fixed-step frame timer.
//!
//! The world is always advanced in ticks of the same length. The timer maps
//! wall-clock time onto a frame index and reports how many whole frames have
//! passed since it was last asked, so a slow frame is caught up by running
//! several ticks and a fast one runs none.
//!
//! ```text
//! start   frame 1   frame 2   frame 3
//!   |---------|---------|---------|----
//!                  ^ tick() = 1        ^ tick() = 2
//! ```

use std::thread;
use std::time::{Duration, Instant};

/// Counts elapsed fixed-length frames.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frame_duration: Duration,
    delta: f64,
    start: Instant,
    current_frame: u64,
}

impl FrameTimer {
    /// Timer for `fps` frames per second, starting now.
    pub fn new(fps: u32) -> Self {
        Self::started_at(fps, Instant::now())
    }

    /// Timer for `fps` frames per second with frame 0 beginning at `start`.
    pub fn started_at(fps: u32, start: Instant) -> Self {
        let delta = 1.0 / f64::from(fps.max(1));
        Self {
            frame_duration: Duration::from_secs_f64(delta),
            delta,
            start,
            current_frame: 0,
        }
    }

    /// Length of one frame in seconds.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Index of the frame reached by the last call to [`tick`](Self::tick).
    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    /// Number of whole frames passed since the previous call.
    pub fn tick(&mut self) -> u64 {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick), for an explicit point in time.
    pub fn tick_at(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.start).as_nanos();
        let frame_nanos = self.frame_duration.as_nanos().max(1);
        let frame_index = u64::try_from(elapsed / frame_nanos).unwrap_or(u64::MAX);

        let frames_passed = frame_index.saturating_sub(self.current_frame);
        self.current_frame = self.current_frame.max(frame_index);
        frames_passed
    }

    /// Start of the frame after the current one.
    pub fn next_frame_at(&self) -> Instant {
        let frame_nanos = u64::try_from(self.frame_duration.as_nanos()).unwrap_or(u64::MAX);
        let offset = frame_nanos.saturating_mul(self.current_frame.saturating_add(1));
        self.start + Duration::from_nanos(offset)
    }

    /// Sleep until the next frame begins.
    pub fn relax(&self) {
        let wait = self.next_frame_at().saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }

    /// Restart counting from frame 0 now.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, start: Instant) {
        self.start = start;
        self.current_frame = 0;
    }
}

// =============================================================================
// Tests
// =============================================================================
