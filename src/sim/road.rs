//! Procedurally generated scrolling road
//!
//! The road keeps only the tile columns needed to cover the viewport plus a
//! one-column buffer. Columns are appended on the right as the road scrolls
//! left and evicted once they are a full tile past the left edge. Each new
//! column is also a chance to spawn an obstacle and a pickup into one of the
//! per-lane buckets.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::Animation;
use super::collision::{lanes_overlapping, sweep_lane, take_first_hit};
use super::entity::{Obstacle, ObstacleKind, Pickup, PickupKind, obstacles_for_section};
use super::rect::Rect;
use super::section::RoadSection;
use crate::consts::*;
use crate::error::RoadError;

/// Construction parameters for a [`Road`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    pub lanes: usize,
    /// Rendered height in pixels, shoulders included
    pub height: f32,
    /// Section used for the first screen
    pub section: RoadSection,
    /// Live obstacle cap across all lanes
    pub max_obstacles: usize,
    /// An obstacle spawns with a 1-in-`obstacle_odds` chance per new column
    pub obstacle_odds: u32,
    /// A pickup spawns with a 1-in-`pickup_odds` chance per new column
    pub pickup_odds: u32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            lanes: 4,
            height: 288.0,
            section: RoadSection::White,
            max_obstacles: 15,
            obstacle_odds: 3,
            pickup_odds: 5,
        }
    }
}

/// What a generated column renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Current section's main tile, with random decorative variants
    Main,
    /// Outgoing section's end cap
    EndCap,
    /// Double-height column: outgoing base tiles under incoming transition tiles
    Blend,
    /// Incoming section's start cap
    StartCap,
}

/// One vertical strip of tiles: a shoulder, one cell per lane, a shoulder.
///
/// Cells hold the top-left of the tile in the road sheet. A blend column holds
/// two full strips; the second is drawn over the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub kind: ColumnKind,
    cells: Vec<Vec2>,
}

impl Column {
    pub fn cells(&self) -> &[Vec2] {
        &self.cells
    }

    pub fn is_blend(&self) -> bool {
        self.kind == ColumnKind::Blend
    }
}

pub struct Road {
    lanes: usize,
    tile_scale: f32,
    /// World position of the left edge of the first column
    origin: Vec2,
    /// Screen y of the road's bottom shoulder edge
    bottom: f32,
    columns: VecDeque<Column>,
    speed: f32,
    section: RoadSection,
    last_section: RoadSection,
    obstacles: Vec<Vec<Obstacle>>,
    pickups: Vec<Vec<Pickup>>,
    allowed_obstacles: Vec<ObstacleKind>,
    explosion: Animation,
    explosion_active: bool,
    generate_obstacles: bool,
    visible: bool,
    max_obstacles: usize,
    obstacle_odds: u32,
    pickup_odds: u32,
    rng: Pcg32,
}

impl Road {
    /// Build a road whose bottom edge sits at `screen_height`.
    ///
    /// The tile scale is derived so the lanes plus both shoulders fill
    /// exactly `config.height` pixels.
    pub fn new(config: &RoadConfig, screen_height: f32, seed: u64) -> Result<Self, RoadError> {
        if config.lanes < 2 {
            return Err(RoadError::InvalidLaneCount(config.lanes));
        }
        if !(config.height > 0.0) {
            return Err(RoadError::InvalidHeight(config.height));
        }

        let rows = (config.lanes + 2) as f32;
        let tile_scale = (config.height / rows) / ROAD_TILE_SIZE.y;

        let mut explosion = Animation::new(EXPLOSION_FRAMES, EXPLOSION_FPS, false);
        explosion.scale = Vec2::splat(tile_scale);
        explosion.restart();
        explosion.pause();

        Ok(Self {
            lanes: config.lanes,
            tile_scale,
            origin: Vec2::new(0.0, screen_height - config.height),
            bottom: screen_height,
            columns: VecDeque::new(),
            speed: 0.0,
            section: config.section,
            last_section: config.section,
            obstacles: vec![Vec::new(); config.lanes],
            pickups: vec![Vec::new(); config.lanes],
            allowed_obstacles: obstacles_for_section(config.section),
            explosion,
            explosion_active: false,
            generate_obstacles: false,
            visible: true,
            max_obstacles: config.max_obstacles,
            obstacle_odds: config.obstacle_odds,
            pickup_odds: config.pickup_odds,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    // --- Geometry ---

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    pub fn tile_scale(&self) -> f32 {
        self.tile_scale
    }

    pub fn tile_width(&self) -> f32 {
        ROAD_TILE_SIZE.x * self.tile_scale
    }

    pub fn lane_height(&self) -> f32 {
        ROAD_TILE_SIZE.y * self.tile_scale
    }

    /// Top of the first lane (below the upper shoulder)
    pub fn top_edge(&self) -> f32 {
        self.bottom - self.lane_height() * (self.lanes + 1) as f32
    }

    /// Bottom of the last lane (above the lower shoulder)
    pub fn bottom_edge(&self) -> f32 {
        self.bottom - self.lane_height()
    }

    pub fn lane_pos(&self, lane: usize) -> f32 {
        self.top_edge() + lane as f32 * self.lane_height()
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// World x of the right edge of the last column
    pub fn right_extent(&self) -> f32 {
        self.origin.x + self.columns.len() as f32 * self.tile_width()
    }

    // --- Speed and section ---

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), RoadError> {
        if speed < 0.0 {
            return Err(RoadError::NegativeSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Change speed by a delta, clamping at zero
    pub fn increase_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).max(0.0);
    }

    pub fn section(&self) -> RoadSection {
        self.section
    }

    pub fn last_section(&self) -> RoadSection {
        self.last_section
    }

    pub fn allowed_obstacles(&self) -> &[ObstacleKind] {
        &self.allowed_obstacles
    }

    /// Switch the section used for new columns.
    ///
    /// Appends the four-column transition immediately: the outgoing end cap,
    /// the cross-fade column, the incoming start cap and the first main column.
    pub fn set_road_section(&mut self, section: RoadSection) {
        self.last_section = self.section;
        self.section = section;
        self.allowed_obstacles = obstacles_for_section(section);

        log::info!(
            "Road section {} -> {} ({} obstacle kinds)",
            self.last_section.as_str(),
            section.as_str(),
            self.allowed_obstacles.len()
        );

        for kind in [
            ColumnKind::EndCap,
            ColumnKind::Blend,
            ColumnKind::StartCap,
            ColumnKind::Main,
        ] {
            self.push_column(kind);
        }
    }

    // --- Flags ---

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_generate_obstacles(&mut self, generate: bool) {
        self.generate_obstacles = generate;
    }

    pub fn generates_obstacles(&self) -> bool {
        self.generate_obstacles
    }

    // --- Entities ---

    pub fn obstacles(&self) -> &[Vec<Obstacle>] {
        &self.obstacles
    }

    pub fn pickups(&self) -> &[Vec<Pickup>] {
        &self.pickups
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.iter().map(Vec::len).sum()
    }

    pub fn pickup_count(&self) -> usize {
        self.pickups.iter().map(Vec::len).sum()
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.iter_mut().for_each(Vec::clear);
    }

    pub fn clear_pickups(&mut self) {
        self.pickups.iter_mut().for_each(Vec::clear);
    }

    fn obstacle_scale(&self) -> f32 {
        self.lane_height() / OBSTACLE_SPRITE_SIZE.y
    }

    fn pickup_scale(&self) -> f32 {
        self.lane_height() / PICKUP_SPRITE_SIZE.y
    }

    /// Place an obstacle at world `x` in `lane`, behind any already there
    pub fn spawn_obstacle(&mut self, lane: usize, kind: ObstacleKind, x: f32) -> Option<&Obstacle> {
        if lane >= self.lanes {
            return None;
        }
        let obstacle = Obstacle::new(kind, Vec2::new(x, self.lane_pos(lane)), self.obstacle_scale());
        let bucket = &mut self.obstacles[lane];
        bucket.push(obstacle);
        bucket.last()
    }

    pub fn spawn_pickup(&mut self, lane: usize, kind: PickupKind, x: f32) -> Option<&Pickup> {
        if lane >= self.lanes {
            return None;
        }
        let pickup = Pickup::new(kind, Vec2::new(x, self.lane_pos(lane)), self.pickup_scale());
        let bucket = &mut self.pickups[lane];
        bucket.push(pickup);
        bucket.last()
    }

    pub fn explosion(&self) -> &Animation {
        &self.explosion
    }

    /// An explosion has been triggered and is still playing
    pub fn is_exploding(&self) -> bool {
        self.explosion_active && !self.explosion.is_finished()
    }

    // --- Generation ---

    fn push_column(&mut self, kind: ColumnKind) {
        let strip = self.lanes + 2;
        let len = if kind == ColumnKind::Blend { strip * 2 } else { strip };
        let tiles = self.section.tiles();
        let last_tiles = self.last_section.tiles();

        let mut cells = Vec::with_capacity(len);
        for i in 0..len {
            let row = i % strip;
            let tile_y = if row == 0 {
                0
            } else if row == 1 {
                1
            } else if row == self.lanes {
                3
            } else if row == self.lanes + 1 {
                4
            } else {
                2
            };

            let tile_x = match kind {
                ColumnKind::Main => {
                    let roll = self.rng.random_range(1..=100);
                    let variants = tiles.variant_range();
                    if roll <= tiles.variation && !variants.is_empty() {
                        self.rng.random_range(variants)
                    } else {
                        tiles.main_column
                    }
                }
                ColumnKind::EndCap => last_tiles.end_column,
                ColumnKind::Blend if i < strip => last_tiles.base_column,
                ColumnKind::Blend => tiles.transition_column,
                ColumnKind::StartCap => tiles.start_column,
            };

            cells.push(Vec2::new(tile_x as f32, tile_y as f32) * ROAD_TILE_SIZE);
        }

        self.columns.push_back(Column { kind, cells });
    }

    fn spawn_for_new_column(&mut self) {
        if !self.generate_obstacles {
            return;
        }
        let x = self.origin.x + (self.columns.len() - 1) as f32 * self.tile_width();

        if roll_odds(&mut self.rng, self.obstacle_odds)
            && self.obstacle_count() < self.max_obstacles
            && !self.allowed_obstacles.is_empty()
        {
            let kind = self.allowed_obstacles[self.rng.random_range(0..self.allowed_obstacles.len())];
            let lane = self.rng.random_range(0..self.lanes);
            self.spawn_obstacle(lane, kind, x);
            log::debug!("Spawned {:?} in lane {} at x={:.1}", kind, lane, x);
        }

        if roll_odds(&mut self.rng, self.pickup_odds) {
            let kind = PickupKind::ALL[self.rng.random_range(0..PickupKind::ALL.len())];
            let lane = self.rng.random_range(0..self.lanes);
            self.spawn_pickup(lane, kind, x);
            log::debug!("Spawned {:?} pickup in lane {} at x={:.1}", kind, lane, x);
        }
    }

    /// Scroll, generate, evict and move entities for one frame
    pub fn update(&mut self, viewport: &Rect, dt: f32) {
        let dx = self.speed * dt;
        self.origin.x -= dx;

        let tile_width = self.tile_width();
        while self.origin.x + (self.columns.len() as f32 - 1.0) * tile_width < viewport.right() {
            self.push_column(ColumnKind::Main);
            self.spawn_for_new_column();
        }

        while self.origin.x < viewport.left - tile_width && !self.columns.is_empty() {
            self.origin.x += tile_width;
            self.columns.pop_front();
        }

        let mut dropped = 0;
        for bucket in &mut self.obstacles {
            dropped += sweep_lane(bucket, |o| {
                o.advance(dx, dt);
                o.animate(dt);
            });
        }
        for bucket in &mut self.pickups {
            dropped += sweep_lane(bucket, |p| {
                p.advance(dx);
            });
        }
        if dropped > 0 {
            log::debug!("Retired {} entities off the left edge", dropped);
        }
    }

    /// Advance effects that keep playing while the road is frozen
    pub fn animate_effects(&mut self, dt: f32) {
        self.explosion.advance(dt);
    }

    fn lanes_for(&self, bounds: &Rect) -> std::ops::Range<usize> {
        lanes_overlapping(self.top_edge(), self.lane_height(), self.lanes, bounds)
    }

    /// Consume the first obstacle the player overlaps and trigger the
    /// explosion on it. Only lanes the player's bounds overlap are scanned.
    pub fn is_player_colliding(&mut self, player_bounds: &Rect) -> bool {
        let lanes = self.lanes_for(player_bounds);
        let Some((lane, obstacle)) = take_first_hit(&mut self.obstacles, lanes, player_bounds) else {
            return false;
        };

        let size = obstacle.size();
        let boom = EXPLOSION_SPRITE_SIZE * self.tile_scale;
        self.explosion.position = Vec2::new(
            obstacle.pos.x - (boom.x - size.x) / 2.0,
            obstacle.pos.y - (boom.y - size.y),
        );
        self.explosion.restart();
        self.explosion.play();
        self.explosion_active = true;

        log::debug!("Player hit {:?} in lane {}", obstacle.kind, lane);
        true
    }

    /// Consume and return the first pickup the player overlaps
    pub fn is_player_on_pickup(&mut self, player_bounds: &Rect) -> Option<Pickup> {
        let lanes = self.lanes_for(player_bounds);
        take_first_hit(&mut self.pickups, lanes, player_bounds).map(|(_, pickup)| pickup)
    }
}

fn roll_odds(rng: &mut Pcg32, odds: u32) -> bool {
    odds > 0 && rng.random_range(0..odds) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN_H: f32 = 720.0;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 1280.0, SCREEN_H)
    }

    /// 3 lanes at 32px each, so obstacles are exactly 32px wide
    fn unit_road() -> Road {
        let config = RoadConfig {
            lanes: 3,
            height: 160.0,
            ..Default::default()
        };
        Road::new(&config, SCREEN_H, 7).unwrap()
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = RoadConfig {
            lanes: 1,
            ..Default::default()
        };
        assert_eq!(Road::new(&config, SCREEN_H, 0).err(), Some(RoadError::InvalidLaneCount(1)));

        let config = RoadConfig {
            height: 0.0,
            ..Default::default()
        };
        assert_eq!(Road::new(&config, SCREEN_H, 0).err(), Some(RoadError::InvalidHeight(0.0)));
    }

    #[test]
    fn test_speed_rules() {
        let mut road = unit_road();
        assert_eq!(road.set_speed(-1.0), Err(RoadError::NegativeSpeed(-1.0)));
        road.set_speed(100.0).unwrap();
        road.increase_speed(-250.0);
        assert_eq!(road.speed(), 0.0);
    }

    #[test]
    fn test_geometry() {
        let road = unit_road();
        assert_eq!(road.tile_scale(), 2.0);
        assert_eq!(road.lane_height(), 32.0);
        assert_eq!(road.bottom_edge(), SCREEN_H - 32.0);
        assert_eq!(road.top_edge(), SCREEN_H - 128.0);
        assert_eq!(road.lane_pos(2), SCREEN_H - 64.0);
    }

    #[test]
    fn test_first_update_covers_viewport() {
        let mut road = unit_road();
        road.update(&viewport(), 0.0);
        assert!(road.right_extent() >= viewport().right());
        assert_eq!(road.column_count(), 41);
    }

    #[test]
    fn test_eviction_reanchors_origin() {
        let mut road = unit_road();
        road.update(&viewport(), 0.0);
        road.set_speed(40.0).unwrap();
        // Scroll 40px: more than one 32px tile past the left edge
        road.update(&viewport(), 1.0);
        assert!(road.origin().x >= -road.tile_width());
        assert!(road.right_extent() >= viewport().right());
    }

    #[test]
    fn test_main_columns_use_section_tiles() {
        let mut road = unit_road();
        road.update(&viewport(), 0.0);
        let tiles = RoadSection::White.tiles();
        for column in road.columns() {
            assert_eq!(column.cells().len(), 5);
            for cell in &column.cells()[1..4] {
                let tile_x = (cell.x / ROAD_TILE_SIZE.x) as u32;
                assert!(tile_x == tiles.main_column || tiles.variant_range().contains(&tile_x));
            }
            // Shoulders are fixed rows
            assert_eq!(column.cells()[0].y, 0.0);
            assert_eq!(column.cells()[4].y, 4.0 * ROAD_TILE_SIZE.y);
        }
    }

    /// Share of lane cells using a decorative variant over many fresh screens
    fn variant_share(road: &mut Road) -> f32 {
        let tiles = road.section().tiles();
        let lanes = road.lanes();
        road.set_speed(viewport().width * 2.0).unwrap();

        let (mut variants, mut total) = (0, 0);
        for _ in 0..25 {
            // Scrolls two screens, so every column on screen is new
            road.update(&viewport(), 1.0);
            for column in road.columns().filter(|c| c.kind == ColumnKind::Main) {
                for cell in &column.cells()[1..=lanes] {
                    let tile_x = (cell.x / ROAD_TILE_SIZE.x) as u32;
                    if tiles.variant_range().contains(&tile_x) {
                        variants += 1;
                    }
                    total += 1;
                }
            }
        }
        variants as f32 / total as f32
    }

    #[test]
    fn test_variants_follow_variation() {
        let mut white = unit_road();
        let white_share = variant_share(&mut white);
        assert!((white_share - 0.30).abs() < 0.06, "white share {}", white_share);

        let mut dirt = unit_road();
        dirt.set_road_section(RoadSection::Dirt);
        let dirt_share = variant_share(&mut dirt);
        assert!((dirt_share - 0.40).abs() < 0.06, "dirt share {}", dirt_share);
        assert!(dirt_share > white_share);
    }

    #[test]
    fn test_section_transition_columns() {
        let mut road = unit_road();
        road.update(&viewport(), 0.0);
        let before = road.column_count();

        road.set_road_section(RoadSection::Yellow);
        assert_eq!(road.column_count(), before + 4);
        assert_eq!(road.last_section(), RoadSection::White);

        let new: Vec<&Column> = road.columns().skip(before).collect();
        let white = RoadSection::White.tiles();
        let yellow = RoadSection::Yellow.tiles();
        let tile_x = |c: &Column, i: usize| (c.cells()[i].x / ROAD_TILE_SIZE.x) as u32;

        assert_eq!(tile_x(new[0], 2), white.end_column);
        assert!(new[1].is_blend());
        assert_eq!(new[1].cells().len(), 10);
        assert_eq!(tile_x(new[1], 2), white.base_column);
        assert_eq!(tile_x(new[1], 7), yellow.transition_column);
        assert_eq!(tile_x(new[2], 2), yellow.start_column);
        assert_eq!(new[3].kind, ColumnKind::Main);

        assert!(
            road.allowed_obstacles()
                .iter()
                .all(|k| k.spec().sections.contains(&RoadSection::Yellow))
        );
        assert_eq!(road.allowed_obstacles(), obstacles_for_section(RoadSection::Yellow).as_slice());
    }

    #[test]
    fn test_no_spawns_while_generation_disabled() {
        let mut road = unit_road();
        road.set_speed(500.0).unwrap();
        for _ in 0..600 {
            road.update(&viewport(), 1.0 / 60.0);
        }
        assert_eq!(road.obstacle_count(), 0);
        assert_eq!(road.pickup_count(), 0);
    }

    #[test]
    fn test_obstacle_cap() {
        let mut road = unit_road();
        road.set_generate_obstacles(true);
        road.update(&viewport(), 0.0);
        assert!(road.obstacle_count() <= 15);
    }

    #[test]
    fn test_spacing_scenario() {
        let mut road = unit_road();
        road.spawn_obstacle(1, ObstacleKind::Car6, 100.0).unwrap();
        road.spawn_obstacle(1, ObstacleKind::Car6, 110.0).unwrap();
        road.update(&viewport(), 0.0);

        let lane = &road.obstacles()[1];
        assert_eq!(lane[0].size().x, 32.0);
        assert!(lane[1].pos.x >= lane[0].pos.x + lane[0].size().x);
    }

    #[test]
    fn test_collision_consumes_one_obstacle() {
        let mut road = unit_road();
        road.spawn_obstacle(0, ObstacleKind::Car6, 200.0).unwrap();
        road.spawn_obstacle(2, ObstacleKind::Car6, 200.0).unwrap();

        let player = Rect::new(196.0, road.lane_pos(0) + 2.0, 20.0, 20.0);
        assert!(road.is_player_colliding(&player));
        assert!(!road.is_player_colliding(&player));
        assert_eq!(road.obstacles()[0].len(), 0);
        assert_eq!(road.obstacles()[2].len(), 1);
        assert!(road.is_exploding());
    }

    #[test]
    fn test_explosion_finishes() {
        let mut road = unit_road();
        road.spawn_obstacle(0, ObstacleKind::Car6, 200.0).unwrap();
        let player = Rect::new(200.0, road.lane_pos(0), 10.0, 10.0);
        assert!(road.is_player_colliding(&player));
        road.animate_effects(10.0);
        assert!(!road.is_exploding());
    }

    #[test]
    fn test_pickup_collected() {
        let mut road = unit_road();
        road.spawn_pickup(1, PickupKind::Fuel, 300.0).unwrap();
        let player = Rect::new(290.0, road.lane_pos(1) + 4.0, 20.0, 20.0);
        let picked = road.is_player_on_pickup(&player).unwrap();
        assert_eq!(picked.kind, PickupKind::Fuel);
        assert!(road.is_player_on_pickup(&player).is_none());
    }

    #[test]
    fn test_spawn_outside_lanes_rejected() {
        let mut road = unit_road();
        assert!(road.spawn_obstacle(3, ObstacleKind::Car1, 0.0).is_none());
        assert!(road.spawn_pickup(9, PickupKind::Coin, 0.0).is_none());
    }

    #[test]
    fn test_same_seed_same_road() {
        let mut a = unit_road();
        let mut b = unit_road();
        for road in [&mut a, &mut b] {
            road.set_generate_obstacles(true);
            road.set_speed(300.0).unwrap();
            for _ in 0..300 {
                road.update(&viewport(), 1.0 / 60.0);
            }
        }
        assert_eq!(a.obstacles(), b.obstacles());
        assert_eq!(a.columns().collect::<Vec<_>>(), b.columns().collect::<Vec<_>>());
    }
}
