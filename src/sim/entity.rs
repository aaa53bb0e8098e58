//! Obstacles and pickups that ride the road
//!
//! Kinds are immutable catalog rows; entities are small mutable values owned
//! by the road's lane buckets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::section::RoadSection;
use crate::consts::{OBSTACLE_SPRITE_SIZE, PICKUP_SPRITE_SIZE};

/// Catalog row describing one obstacle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    /// Row in the obstacle sprite sheet
    pub row: u32,
    pub frames: u32,
    /// Animation rate; 0 means static
    pub fps: u32,
    /// Extra leftward speed on top of the road speed (px/s)
    pub move_speed: f32,
    /// Hitbox relative to the sprite's top-left, in sprite pixels
    pub hitbox: Rect,
    pub sections: &'static [RoadSection],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car1,
    Car2,
    Car3,
    Car4,
    Car5,
    Car6,
    Car7,
    Car8,
    Car9,
    Car10,
    Car11,
}

const CAR_HITBOX: Rect = Rect::new(0.0, 0.0, 16.0, 16.0);
const YELLOW_ONLY: &[RoadSection] = &[RoadSection::Yellow];
const WHITE_ONLY: &[RoadSection] = &[RoadSection::White];
const ANY_SECTION: &[RoadSection] = &[RoadSection::Yellow, RoadSection::White, RoadSection::Dirt];

const fn car(row: u32, fps: u32, move_speed: f32, sections: &'static [RoadSection]) -> ObstacleSpec {
    ObstacleSpec {
        row,
        frames: 2,
        fps,
        move_speed,
        hitbox: CAR_HITBOX,
        sections,
    }
}

const OBSTACLE_TABLE: [ObstacleSpec; 11] = [
    car(0, 10, 120.0, YELLOW_ONLY),
    car(1, 10, 110.0, YELLOW_ONLY),
    car(2, 10, 125.0, YELLOW_ONLY),
    car(3, 7, 80.0, YELLOW_ONLY),
    car(4, 8, 100.0, YELLOW_ONLY),
    car(5, 10, 110.0, WHITE_ONLY),
    car(6, 8, 100.0, WHITE_ONLY),
    car(7, 8, 90.0, WHITE_ONLY),
    car(8, 10, 110.0, WHITE_ONLY),
    car(9, 13, 140.0, ANY_SECTION),
    car(10, 13, 180.0, ANY_SECTION),
];

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 11] = [
        ObstacleKind::Car1,
        ObstacleKind::Car2,
        ObstacleKind::Car3,
        ObstacleKind::Car4,
        ObstacleKind::Car5,
        ObstacleKind::Car6,
        ObstacleKind::Car7,
        ObstacleKind::Car8,
        ObstacleKind::Car9,
        ObstacleKind::Car10,
        ObstacleKind::Car11,
    ];

    pub fn spec(self) -> &'static ObstacleSpec {
        &OBSTACLE_TABLE[self as usize]
    }
}

/// Obstacle kinds allowed to spawn on a section, in catalog order
pub fn obstacles_for_section(section: RoadSection) -> Vec<ObstacleKind> {
    ObstacleKind::ALL
        .into_iter()
        .filter(|kind| kind.spec().sections.contains(&section))
        .collect()
}

/// Catalog row describing one pickup kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupSpec {
    pub row: u32,
    pub hitbox: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Coin,
    Fuel,
}

const PICKUP_TABLE: [PickupSpec; 2] = [
    PickupSpec {
        row: 0,
        hitbox: Rect::new(0.0, 0.0, 32.0, 32.0),
    },
    PickupSpec {
        row: 1,
        hitbox: Rect::new(0.0, 0.0, 32.0, 32.0),
    },
];

impl PickupKind {
    pub const ALL: [PickupKind; 2] = [PickupKind::Coin, PickupKind::Fuel];

    pub fn spec(self) -> &'static PickupSpec {
        &PICKUP_TABLE[self as usize]
    }
}

/// An obstacle on the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// World-space top-left
    pub pos: Vec2,
    pub scale: f32,
    frame: u32,
    time_to_next_frame: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, pos: Vec2, scale: f32) -> Self {
        Self {
            kind,
            pos,
            scale,
            frame: 0,
            time_to_next_frame: frame_time(kind.spec()),
        }
    }

    pub fn size(&self) -> Vec2 {
        OBSTACLE_SPRITE_SIZE * self.scale
    }

    pub fn hitbox(&self) -> Rect {
        self.kind.spec().hitbox.scaled_at(self.pos, self.scale)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.hitbox().intersects(other)
    }

    /// Shift left by the road's delta plus this kind's own speed.
    ///
    /// Returns the new position.
    pub fn advance(&mut self, road_dx: f32, dt: f32) -> Vec2 {
        self.pos.x -= road_dx + self.kind.spec().move_speed * dt;
        self.pos
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn animate(&mut self, dt: f32) {
        let spec = self.kind.spec();
        if spec.frames <= 1 || spec.fps == 0 {
            return;
        }
        self.time_to_next_frame -= dt;
        while self.time_to_next_frame <= 0.0 {
            self.frame = (self.frame + 1) % spec.frames;
            self.time_to_next_frame += frame_time(spec);
        }
    }

    /// Top-left of the current frame in the obstacle sheet
    pub fn tex_origin(&self) -> Vec2 {
        Vec2::new(self.frame as f32, self.kind.spec().row as f32) * OBSTACLE_SPRITE_SIZE
    }
}

fn frame_time(spec: &ObstacleSpec) -> f32 {
    1.0 / spec.fps.max(1) as f32
}

/// A collectible on the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub scale: f32,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2, scale: f32) -> Self {
        Self { kind, pos, scale }
    }

    pub fn size(&self) -> Vec2 {
        PICKUP_SPRITE_SIZE * self.scale
    }

    pub fn hitbox(&self) -> Rect {
        self.kind.spec().hitbox.scaled_at(self.pos, self.scale)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.hitbox().intersects(other)
    }

    pub fn advance(&mut self, road_dx: f32) -> Vec2 {
        self.pos.x -= road_dx;
        self.pos
    }

    pub fn tex_origin(&self) -> Vec2 {
        Vec2::new(0.0, self.kind.spec().row as f32) * PICKUP_SPRITE_SIZE
    }
}

/// Anything stored in a lane bucket that the player can touch
pub trait LaneEntity {
    fn pos(&self) -> Vec2;
    fn set_pos(&mut self, pos: Vec2);
    fn size(&self) -> Vec2;
    fn intersects(&self, other: &Rect) -> bool;

    /// Trailing edge has passed the left edge of the world
    fn is_offscreen(&self) -> bool {
        self.pos().x + self.size().x <= 0.0
    }
}

impl LaneEntity for Obstacle {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }
    fn size(&self) -> Vec2 {
        Obstacle::size(self)
    }
    fn intersects(&self, other: &Rect) -> bool {
        Obstacle::intersects(self, other)
    }
}

impl LaneEntity for Pickup {
    fn pos(&self) -> Vec2 {
        self.pos
    }
    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }
    fn size(&self) -> Vec2 {
        Pickup::size(self)
    }
    fn intersects(&self, other: &Rect) -> bool {
        Pickup::intersects(self, other)
    }
}
