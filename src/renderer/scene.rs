//! Quads for the game's objects

use glam::Vec2;

use super::{DrawList, Drawable, Texture, layers};
use crate::consts::*;
use crate::sim::{GameManager, HealthManager, Rect, Road, UpgradePath};

impl Drawable for Road {
    fn draw(&self, list: &mut DrawList) {
        if !self.is_visible() {
            return;
        }

        let tile = Vec2::new(self.tile_width(), self.lane_height());
        let strip = self.lanes() + 2;
        for (i, column) in self.columns().enumerate() {
            let x = self.origin().x + i as f32 * tile.x;
            // Blend columns hold a second strip drawn over the first
            for (j, cell) in column.cells().iter().enumerate() {
                let y = self.origin().y + (j % strip) as f32 * tile.y;
                list.push_quad(
                    layers::ROAD,
                    Texture::RoadTiles,
                    &Rect::new(x, y, tile.x, tile.y),
                    &Rect::from_pos_size(*cell, ROAD_TILE_SIZE),
                    1.0,
                );
            }
        }

        for pickup in self.pickups().iter().flatten() {
            list.push_quad(
                layers::PICKUPS,
                Texture::Pickups,
                &pickup.bounds(),
                &Rect::from_pos_size(pickup.tex_origin(), PICKUP_SPRITE_SIZE),
                1.0,
            );
        }
        for obstacle in self.obstacles().iter().flatten() {
            list.push_quad(
                layers::OBSTACLES,
                Texture::Obstacles,
                &obstacle.bounds(),
                &Rect::from_pos_size(obstacle.tex_origin(), OBSTACLE_SPRITE_SIZE),
                1.0,
            );
        }

        if self.is_exploding() {
            let boom = self.explosion();
            let frame = Vec2::new(boom.current_frame() as f32 * EXPLOSION_SPRITE_SIZE.x, 0.0);
            list.push_quad(
                layers::EXPLOSION,
                Texture::Explosion,
                &Rect::from_pos_size(boom.position, EXPLOSION_SPRITE_SIZE * self.tile_scale()),
                &Rect::from_pos_size(frame, EXPLOSION_SPRITE_SIZE),
                1.0,
            );
        }
    }
}

impl Drawable for HealthManager {
    fn draw(&self, list: &mut DrawList) {
        for heart in self.hearts() {
            let frame = heart.animation().current_frame() as f32;
            list.push_quad(
                layers::HUD,
                Texture::Hearts,
                &Rect::from_pos_size(heart.position, heart.size),
                &Rect::from_pos_size(Vec2::new(frame * HEART_SPRITE_SIZE.x, 0.0), HEART_SPRITE_SIZE),
                1.0,
            );
        }
    }
}

impl Drawable for GameManager {
    fn draw(&self, list: &mut DrawList) {
        self.road().draw(list);

        let player = self.player();
        if player.visible {
            list.push_quad(
                layers::PLAYER,
                Texture::Player,
                &Rect::from_pos_size(player.position(), player.size()),
                &Rect::from_pos_size(Vec2::ZERO, player.size()),
                1.0,
            );
        }

        self.health().draw(list);

        let fuel = self.fuel();
        if fuel.visible {
            let fill = (fuel.display_value() / fuel.max()).clamp(0.0, 1.0);
            let fill_size = Vec2::new(FUEL_BAR_SIZE.x * fill, FUEL_BAR_SIZE.y);
            list.push_quad(
                layers::HUD,
                Texture::FuelBar,
                &Rect::from_pos_size(FUEL_BAR_ORIGIN, FUEL_BAR_SIZE),
                &Rect::from_pos_size(Vec2::ZERO, FUEL_BAR_SIZE),
                1.0,
            );
            list.push_quad(
                layers::HUD,
                Texture::FuelBar,
                &Rect::from_pos_size(FUEL_BAR_ORIGIN, fill_size),
                &Rect::from_pos_size(Vec2::new(0.0, FUEL_BAR_SIZE.y), fill_size),
                1.0,
            );
        }

        if self.overlay().shop {
            draw_upgrade_markers(self.health_upgrade(), list);
        }

        let alert = self.health_alert();
        if !alert.is_paused() && !alert.is_finished() {
            let frame = Vec2::new(alert.current_frame() as f32 * HEALTH_ALERT_SIZE.x, 0.0);
            list.push_quad(
                layers::ALERT,
                Texture::HealthAlert,
                &Rect::from_pos_size(alert.position, HEALTH_ALERT_SIZE * alert.scale),
                &Rect::from_pos_size(frame, HEALTH_ALERT_SIZE),
                1.0,
            );
        }
    }
}

/// One marker per stage: bought, next up, or locked (sheet rows 2, 1, 0)
fn draw_upgrade_markers(path: &UpgradePath, list: &mut DrawList) {
    let size = UPGRADE_MARKER_SIZE * 2.0;
    for stage in 0..path.stages() {
        let row = match stage.cmp(&path.current_stage()) {
            std::cmp::Ordering::Less => 2.0,
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Greater => 0.0,
        };
        list.push_quad(
            layers::PANEL,
            Texture::UpgradeMarker,
            &Rect::from_pos_size(SHOP_ORIGIN + Vec2::new(stage as f32 * size.x, 0.0), size),
            &Rect::from_pos_size(Vec2::new(0.0, row * UPGRADE_MARKER_SIZE.y), UPGRADE_MARKER_SIZE),
            1.0,
        );
    }
}
