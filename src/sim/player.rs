//! The player's car
//!
//! The player only applies relative moves. Clamping to the road and screen is
//! done by the game manager, which owns the authoritative position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite size in pixels
    pub size: Vec2,
    /// Hitbox relative to the sprite's top-left
    pub hitbox: Rect,
    /// Movement rate per axis (px/s)
    pub move_speed: Vec2,
    /// Movement multiplier on the frame a dash fires
    pub dash_multiplier: f32,
    /// Seconds a dash stays active before another can fire
    pub dash_cooldown: f32,
    /// Distance of the spawn point from the left edge of the screen
    pub start_x: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(64.0, 32.0),
            hitbox: Rect::new(8.0, 6.0, 48.0, 20.0),
            move_speed: Vec2::new(300.0, 180.0),
            dash_multiplier: 20.0,
            dash_cooldown: 3.0,
            start_x: 128.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pos: Vec2,
    start: Vec2,
    size: Vec2,
    hitbox: Rect,
    move_speed: Vec2,
    pub active: bool,
    pub visible: bool,
    /// A dash fired and its cooldown has not expired
    pub shifted: bool,
    /// Collisions do not pause or hurt while slamming
    pub slam: bool,
    /// Play time at which the last dash fired
    pub shift_start: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig, start: Vec2) -> Self {
        Self {
            pos: start,
            start,
            size: config.size,
            hitbox: config.hitbox,
            move_speed: config.move_speed,
            active: false,
            visible: false,
            shifted: false,
            slam: false,
            shift_start: 0.0,
        }
    }

    /// Apply a direction (each axis roughly -1..1, larger for dashes)
    pub fn move_by(&mut self, direction: Vec2, dt: f32) {
        self.pos += direction * self.move_speed * dt;
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn reset_position(&mut self) {
        self.pos = self.start;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Hitbox in screen space
    pub fn bounds(&self) -> Rect {
        self.hitbox.scaled_at(self.pos, 1.0)
    }

    pub fn clear_dash(&mut self) {
        self.shifted = false;
        self.slam = false;
    }
}
