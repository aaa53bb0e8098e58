//! Per-frame update
//!
//! Advances the game manager by one variable-length frame. Within a frame the
//! road scrolls and spawns first, then the player moves and is clamped, then
//! collisions and pickups are resolved against the post-clamp bounds.

use glam::Vec2;

use super::entity::PickupKind;
use super::rect::Rect;
use super::state::{GameManager, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Dash modifier
    pub dash: bool,
}

impl TickInput {
    /// Four-way direction; left wins over right and up over down
    pub fn direction(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

impl GameManager {
    /// Road speed after `t` seconds of play
    pub fn road_speed_function(&self, t: f32) -> f32 {
        self.tuning.speed.speed_at(t)
    }

    /// Advance one frame. `viewport` is the visible area in screen space.
    pub fn update(&mut self, input: &TickInput, viewport: &Rect, dt: f32) {
        // UI animations run even while paused
        self.animate(dt);

        if self.resume_after_explosion && !self.road.is_exploding() {
            self.resume_after_explosion = false;
            self.play();
        }

        if !self.paused || self.state == GameState::MainMenu {
            self.road.update(viewport, dt);
        }

        match self.state {
            GameState::MainMenu => {
                let speed = self.road_speed_function(self.playing_time);
                self.apply_speed(speed);
            }
            GameState::Gameplay => {
                if !self.paused {
                    self.gameplay_step(input, viewport, dt);
                }
            }
            GameState::Upgrade => {}
            GameState::GameOver => self.game_over_step(dt),
        }
    }

    /// Apply a direction to the player and clamp it to the screen width and
    /// the road's lane band. Does nothing while paused.
    pub fn move_player(&mut self, direction: Vec2, viewport: &Rect, dt: f32) {
        if self.paused {
            return;
        }
        self.player.move_by(direction, dt);

        let size = self.player.size();
        let pos = self.player.position();
        let x = pos.x.min(viewport.right() - size.x).max(viewport.left);
        let y = pos
            .y
            .min(self.road.bottom_edge() - size.y)
            .max(self.road.top_edge());
        self.player.set_position(Vec2::new(x, y));
    }

    fn animate(&mut self, dt: f32) {
        self.health_alert.advance(dt);
        self.health.animate(dt);
        self.road.animate_effects(dt);
        self.fuel.animate(dt);
        self.overlay.title.advance(dt);
        self.overlay.game_over_banner.advance(dt);
    }

    fn gameplay_step(&mut self, input: &TickInput, viewport: &Rect, dt: f32) {
        self.fuel.add(-self.tuning.fuel_drain * dt);
        if self.fuel.is_empty() {
            self.game_over();
            return;
        }

        self.playing_time += dt;

        if self.player.shifted
            && self.playing_time - self.player.shift_start >= self.tuning.player.dash_cooldown
        {
            self.player.clear_dash();
        }

        if self.player.active {
            let mut direction = input.direction();
            if input.dash && !self.player.shifted {
                direction *= self.tuning.player.dash_multiplier;
                self.player.shifted = true;
                self.player.slam = true;
                self.player.shift_start = self.playing_time;
                log::debug!("Dash at t={:.2}", self.playing_time);
            }
            self.move_player(direction, viewport, dt);
        }

        let bounds = self.player.bounds();
        if self.road.is_player_colliding(&bounds) && !self.player.slam {
            self.pause();
            self.resume_after_explosion = true;
            self.health_alert.restart();
            self.health_alert.play();
            if self.health.remove_health() == 0 {
                self.game_over();
                return;
            }
        }

        if let Some(pickup) = self.road.is_player_on_pickup(&bounds) {
            match pickup.kind {
                PickupKind::Fuel => {
                    self.fuel.add(self.tuning.fuel_pickup);
                }
                PickupKind::Coin => self.coins += 1,
            }
        }

        let speed = self.road_speed_function(self.playing_time);
        self.apply_speed(speed);
        self.accrue_score(speed, dt);
    }

    fn game_over_step(&mut self, dt: f32) {
        self.playing_time += dt;
        if self.game_over_pending && self.playing_time >= self.tuning.game_over_delay {
            self.game_over_pending = false;
            self.overlay.name_input = true;
            self.overlay.game_over_controls = true;
            self.overlay.submit_enabled = true;
        }
    }

    fn apply_speed(&mut self, speed: f32) {
        if let Err(e) = self.road.set_speed(speed) {
            log::error!("{}", e);
        }
    }

    /// Add `speed² * dt` worth of score and climb tiers whose threshold has
    /// been reached
    fn accrue_score(&mut self, speed: f32, dt: f32) {
        self.score += speed * speed * dt / self.tuning.score_divisor * self.multiplier();

        while let Some(&next) = self.tuning.score_tiers.get(self.tier + 1) {
            if self.score < next.threshold {
                break;
            }
            self.tier += 1;
            log::info!(
                "Score {:.0} reached tier {} (x{})",
                self.score,
                self.tier,
                next.multiplier
            );
            if self.road.section() != next.section {
                self.road.set_road_section(next.section);
            }
        }
    }
}
