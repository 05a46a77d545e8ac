//! Frame timing for the render loop.
//!
//! The animation itself is frame-locked (every tick moves each head by one
//! fixed step), so time is only tracked for reporting: a frame count and a
//! periodically refreshed FPS figure.
//!
//! # Example
//!
//! ```ignore
//! use chaindrive::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//!
//! // In the redraw handler:
//! if let Some(fps) = clock.tick() {
//!     log::debug!("{:.1} fps", fps);
//! }
//! ```

use std::time::{Duration, Instant};

/// Frame counter with periodic FPS sampling.
#[derive(Debug)]
pub struct FrameClock {
    /// Total frames since start.
    frame_count: u64,
    /// Frame count at last FPS sample.
    fps_frame_count: u64,
    /// Time of last FPS sample.
    fps_update_time: Instant,
    /// How often to sample FPS.
    fps_update_interval: Duration,
}

impl FrameClock {
    /// Create a clock sampling FPS every five seconds.
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(5))
    }

    pub fn with_interval(fps_update_interval: Duration) -> Self {
        Self {
            frame_count: 0,
            fps_frame_count: 0,
            fps_update_time: Instant::now(),
            fps_update_interval,
        }
    }

    /// Record a frame. Returns a fresh FPS sample once per interval.
    pub fn tick(&mut self) -> Option<f32> {
        self.frame_count += 1;

        let now = Instant::now();
        let since = now.duration_since(self.fps_update_time);
        if since < self.fps_update_interval {
            return None;
        }
        let frames = self.frame_count - self.fps_frame_count;
        self.fps_frame_count = self.frame_count;
        self.fps_update_time = now;
        Some(frames as f32 / since.as_secs_f32())
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
