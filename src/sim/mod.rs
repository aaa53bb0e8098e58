//! Game simulation
//!
//! All gameplay logic lives here. This module is pure and deterministic:
//! - Frame-stepped by the caller's `dt`
//! - Seeded RNG only
//! - Stable iteration order (lane, then spawn order)
//! - No rendering or platform dependencies

pub mod anim;
pub mod collision;
pub mod entity;
pub mod fuel;
pub mod health;
pub mod player;
pub mod rect;
pub mod road;
pub mod section;
pub mod shop;
pub mod state;
pub mod tick;

pub use anim::{Animation, Fade};
pub use collision::{lanes_overlapping, sweep_lane, take_first_hit};
pub use entity::{
    LaneEntity, Obstacle, ObstacleKind, ObstacleSpec, Pickup, PickupKind, PickupSpec,
    obstacles_for_section,
};
pub use fuel::FuelGauge;
pub use health::{Heart, HealthManager};
pub use player::{Player, PlayerConfig};
pub use rect::Rect;
pub use road::{Column, ColumnKind, Road, RoadConfig};
pub use section::{RoadSection, SectionTiles};
pub use shop::UpgradePath;
pub use state::{GameManager, GameState, Overlay};
pub use tick::TickInput;
