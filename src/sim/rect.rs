//! Axis-aligned rectangles for hitboxes, viewports and player bounds
//!
//! Screen space: x grows right, y grows down. `left`/`top` is the top-left
//! corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True if the two rectangles share a non-empty area.
    ///
    /// Edges that merely touch do not count as an intersection.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Scale a rectangle given relative to a sprite's top-left and place it
    /// at `pos`
    pub fn scaled_at(&self, pos: Vec2, scale: f32) -> Rect {
        Rect::new(
            pos.x + self.left * scale,
            pos.y + self.top * scale,
            self.width * scale,
            self.height * scale,
        )
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }
}
