//! Full Throttle - a multi-lane side-scrolling arcade driving game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (road generation, collisions, game state)
//! - `renderer`: Layered textured-quad draw data
//! - `platform`: Input polling and frame timing
//! - `ui`: Buttons with typed callbacks, leaderboard and name entry
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use error::{ConfigError, RoadError};
pub use highscores::{HighScore, HighScores};
pub use settings::Tuning;

/// Fixed asset geometry
pub mod consts {
    use glam::Vec2;

    /// Size of one tile in the road tile sheet (pixels)
    pub const ROAD_TILE_SIZE: Vec2 = Vec2::new(16.0, 16.0);
    /// Size of one frame in the obstacle sprite sheet
    pub const OBSTACLE_SPRITE_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    /// Size of one frame in the pickup sprite sheet
    pub const PICKUP_SPRITE_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    /// Size of one explosion frame
    pub const EXPLOSION_SPRITE_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    /// Frames in the explosion sheet
    pub const EXPLOSION_FRAMES: usize = 12;
    pub const EXPLOSION_FPS: f32 = 16.0;

    /// Full-screen health alert flash
    pub const HEALTH_ALERT_SIZE: Vec2 = Vec2::new(256.0, 144.0);
    pub const HEALTH_ALERT_FRAMES: usize = 8;
    pub const HEALTH_ALERT_FPS: f32 = 16.0;

    /// Heart icon; frame 0 is full, the last frame is empty
    pub const HEART_SPRITE_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const HEART_FRAMES: usize = 6;
    pub const HEART_FPS: f32 = 24.0;
    /// Top-left of the heart row and height of each heart
    pub const HEART_ORIGIN: Vec2 = Vec2::new(288.0, 10.0);
    pub const HEART_HEIGHT: f32 = 64.0;

    /// Fuel bar sheet: background strip on row 0, fill strip on row 1
    pub const FUEL_BAR_ORIGIN: Vec2 = Vec2::new(16.0, 26.0);
    pub const FUEL_BAR_SIZE: Vec2 = Vec2::new(256.0, 32.0);

    /// Shop layout: stage markers run right from the origin, buttons sit below
    pub const SHOP_ORIGIN: Vec2 = Vec2::new(448.0, 200.0);
    pub const UPGRADE_MARKER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
    pub const SHOP_BUTTON_SIZE: Vec2 = Vec2::new(64.0, 64.0);
}
