//! Frame clock.
//!
//! [`Clock`] is the scene's monotonic time source. The render loop calls
//! [`Clock::tick`] once per redraw and feeds the returned delta into
//! [`SceneState::advance`](crate::SceneState::advance).
//!
//! ```ignore
//! let mut clock = Clock::new();
//!
//! // Once per frame:
//! clock.tick();
//! state.step(clock.delta());
//! ```

use std::time::{Duration, Instant};

/// Elapsed time, per-frame delta and a periodic FPS estimate.
#[derive(Debug)]
pub struct Clock {
    /// When the clock was created.
    start: Instant,
    /// Instant of the previous tick, overwritten every tick.
    previous: Instant,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl Clock {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            previous: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Restart from now, as if freshly created. The next tick's delta only
    /// covers time after this call.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    fn reset_at(&mut self, now: Instant) {
        *self = Self::starting_at(now);
    }

    /// Advance to now. Call once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.delta_secs = now.saturating_duration_since(self.previous).as_secs_f32();
        self.previous = now;

        self.elapsed_secs = now.saturating_duration_since(self.start).as_secs_f32();
        self.frame_count += 1;

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// Seconds since the clock started, as of the last tick.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the last tick refreshed the FPS estimate.
    pub fn fps_updated(&self) -> bool {
        self.frame_count > 0 && self.fps_frame_count == self.frame_count
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
