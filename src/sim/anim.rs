//! Time-driven animation bookkeeping
//!
//! Nothing here blocks or schedules: every animation is plain state plus an
//! accumulated time that `advance(dt)` compares against its frame duration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A sprite-sheet animation: frame count, playback rate and current frame.
///
/// Holds no texture. Renderers map `current_frame()` onto the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    frames: usize,
    fps: f32,
    looped: bool,
    paused: bool,
    current: usize,
    since_change: f32,
    /// Top-left in screen space
    pub position: Vec2,
    pub scale: Vec2,
}

impl Animation {
    pub fn new(frames: usize, fps: f32, looped: bool) -> Self {
        Self {
            frames: frames.max(1),
            fps,
            looped,
            paused: false,
            current: 0,
            since_change: 0.0,
            position: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.since_change = 0.0;
    }

    pub fn jump_to_end(&mut self) {
        self.current = self.frames - 1;
        self.since_change = 0.0;
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// One-shot animation resting on its last frame
    pub fn is_finished(&self) -> bool {
        !self.looped && self.current == self.frames - 1
    }

    pub fn advance(&mut self, dt: f32) {
        if self.paused || self.fps <= 0.0 || self.is_finished() {
            return;
        }

        self.since_change += dt;
        let frame_time = 1.0 / self.fps;
        while self.since_change >= frame_time {
            self.since_change -= frame_time;
            self.current += 1;
            if self.looped {
                self.current %= self.frames;
            } else if self.current >= self.frames - 1 {
                self.current = self.frames - 1;
                self.since_change = 0.0;
                break;
            }
        }
    }
}

/// Alpha fade between 0 (hidden) and 1 (opaque) over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    pub fn shown() -> Self {
        Self {
            from: 1.0,
            to: 1.0,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn fade_in(&mut self, duration: f32) {
        self.start(1.0, duration);
    }

    pub fn fade_out(&mut self, duration: f32) {
        self.start(0.0, duration);
    }

    pub fn set_visible(&mut self, visible: bool) {
        *self = if visible { Self::shown() } else { Self::hidden() };
    }

    fn start(&mut self, to: f32, duration: f32) {
        self.from = self.alpha();
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_visible(&self) -> bool {
        self.alpha() > 0.0
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}
