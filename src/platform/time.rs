//! Frame timing

use std::time::{Duration, Instant};

/// Longest frame the simulation will see
pub const MAX_FRAME_DT: f32 = 0.1;

/// Produces one delta per frame, measured before any game logic runs
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    delta: f32,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last: now,
            delta: 0.0,
            frames: 0,
        }
    }

    /// Start a new frame and return its delta in seconds
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        self.delta = dt.min(MAX_FRAME_DT);
        self.frames += 1;
        self.delta
    }

    /// Delta of the current frame
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> Duration {
        self.last.saturating_duration_since(self.start)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
