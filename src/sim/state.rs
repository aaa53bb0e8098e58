//! Game state machine
//!
//! `GameManager` owns the road, the player, health and fuel, and moves
//! between screens only through its explicit transition methods.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{Animation, Fade};
use super::fuel::FuelGauge;
use super::health::HealthManager;
use super::player::Player;
use super::rect::Rect;
use super::road::Road;
use super::shop::UpgradePath;
use crate::consts::*;
use crate::error::ConfigError;
use crate::highscores::HighScores;
use crate::settings::Tuning;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    MainMenu,
    Gameplay,
    /// Shop screen. Entered from gameplay; left through `main_menu` or
    /// `start_game`.
    Upgrade,
    GameOver,
}

/// Visibility of the UI the manager drives. Widgets read this each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: Fade,
    /// Play, high scores and settings buttons
    pub menu_buttons: bool,
    /// Leaderboard panel over the main menu
    pub leaderboard: bool,
    /// Upgrade paths and their buy/sell buttons
    pub shop: bool,
    pub game_over_banner: Fade,
    pub name_input: bool,
    /// Main menu, submit and play again buttons
    pub game_over_controls: bool,
    pub submit_enabled: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            title: Fade::shown(),
            menu_buttons: true,
            leaderboard: false,
            shop: false,
            game_over_banner: Fade::hidden(),
            name_input: false,
            game_over_controls: false,
            submit_enabled: false,
        }
    }
}

pub struct GameManager {
    pub(super) tuning: Tuning,
    pub(super) state: GameState,
    pub(super) road: Road,
    pub(super) player: Player,
    pub(super) health: HealthManager,
    pub(super) fuel: FuelGauge,
    pub(super) health_alert: Animation,
    pub(super) overlay: Overlay,
    pub(super) paused: bool,
    /// Set by a collision; cleared once the explosion finishes
    pub(super) resume_after_explosion: bool,
    /// Seconds in the current run (or since game over)
    pub(super) playing_time: f32,
    pub(super) score: f32,
    /// Index into `tuning.score_tiers`
    pub(super) tier: usize,
    pub(super) coins: u32,
    /// Extra heart slots. Purchases outlive the run they were made in.
    pub(super) health_upgrade: UpgradePath,
    /// Game-over controls are waiting for their delay
    pub(super) game_over_pending: bool,
}

impl GameManager {
    pub fn new(tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let mut road = Road::new(&tuning.road, tuning.window_height, tuning.seed)?;
        // Fill the first screen with scenery before anything can spawn
        road.update(&Rect::new(0.0, 0.0, tuning.window_width, tuning.window_height), 0.0);

        let lanes_height = road.bottom_edge() - road.top_edge();
        let start = Vec2::new(
            tuning.player.start_x,
            road.top_edge() + (lanes_height - tuning.player.size.y) / 2.0,
        );
        let player = Player::new(&tuning.player, start);

        let health_upgrade = UpgradePath::new("Max health", tuning.health_upgrade_prices.clone())?;

        let mut health_alert = Animation::new(HEALTH_ALERT_FRAMES, HEALTH_ALERT_FPS, false);
        health_alert.scale = Vec2::new(tuning.window_width, tuning.window_height) / HEALTH_ALERT_SIZE;
        health_alert.restart();
        health_alert.pause();

        let mut manager = Self {
            health: HealthManager::new(tuning.max_health, HEART_ORIGIN, HEART_HEIGHT),
            fuel: FuelGauge::new(tuning.fuel_max),
            tuning,
            state: GameState::MainMenu,
            road,
            player,
            health_alert,
            overlay: Overlay::default(),
            paused: false,
            resume_after_explosion: false,
            playing_time: 0.0,
            score: 0.0,
            tier: 0,
            coins: 0,
            health_upgrade,
            game_over_pending: false,
        };
        manager.main_menu();
        Ok(manager)
    }

    // --- Read-only views ---

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn road(&self) -> &Road {
        &self.road
    }

    /// Scripted content hooks (placing entities, forcing sections)
    pub fn road_mut(&mut self) -> &mut Road {
        &mut self.road
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn health(&self) -> &HealthManager {
        &self.health
    }

    pub fn fuel(&self) -> &FuelGauge {
        &self.fuel
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn health_alert(&self) -> &Animation {
        &self.health_alert
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn multiplier(&self) -> f32 {
        self.tuning.score_tiers[self.tier].multiplier
    }

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn health_upgrade(&self) -> &UpgradePath {
        &self.health_upgrade
    }

    pub fn playing_time(&self) -> f32 {
        self.playing_time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    // --- Transitions ---

    /// Back to the title screen; the road keeps scrolling without obstacles.
    ///
    /// Clears every piece of run state, so calling it twice is the same as
    /// calling it once.
    pub fn main_menu(&mut self) {
        self.state = GameState::MainMenu;

        self.overlay = Overlay::default();
        self.fuel.visible = false;
        self.fuel.set_to_max();

        self.road.set_visible(true);
        self.road.set_generate_obstacles(false);
        self.road.clear_obstacles();
        self.road.clear_pickups();

        self.player.active = false;
        self.player.visible = false;
        self.player.clear_dash();
        self.player.reset_position();
        self.health.reset();

        self.paused = false;
        self.resume_after_explosion = false;
        self.game_over_pending = false;
        self.playing_time = 0.0;
        self.score = 0.0;
        self.coins = 0;
        self.reset_tier();

        log::info!("Main menu");
    }

    pub fn start_game(&mut self) {
        if self.state == GameState::MainMenu {
            self.overlay.title.fade_out(self.tuning.fade_out);
        }
        self.fuel.set_to_max();
        self.fuel.visible = true;
        self.overlay.menu_buttons = false;
        self.overlay.leaderboard = false;
        self.overlay.shop = false;

        self.state = GameState::Gameplay;
        self.player.reset_position();
        self.player.clear_dash();
        self.player.visible = true;
        self.health.reset();

        self.road.set_generate_obstacles(true);
        self.playing_time = 0.0;
        self.player.active = true;
        self.paused = false;
        self.resume_after_explosion = false;

        log::info!("Game started");
    }

    pub fn play_again(&mut self) {
        self.road.clear_obstacles();
        self.road.clear_pickups();
        self.score = 0.0;
        self.coins = 0;
        self.reset_tier();
        self.health.reset();

        self.overlay.game_over_banner.fade_out(self.tuning.fade_out);
        self.overlay.name_input = false;
        self.overlay.game_over_controls = false;
        self.overlay.submit_enabled = false;
        self.game_over_pending = false;

        self.fuel.set_to_max();
        self.start_game();
    }

    pub fn start_upgrades(&mut self) {
        self.state = GameState::Upgrade;
        self.road.set_generate_obstacles(false);
        self.player.active = false;
        self.overlay.shop = true;
        log::info!("Upgrade screen");
    }

    /// Open the leaderboard over the title screen
    pub fn show_leaderboard(&mut self) {
        if self.state != GameState::MainMenu {
            return;
        }
        self.overlay.leaderboard = true;
        self.overlay.menu_buttons = false;
    }

    pub fn close_leaderboard(&mut self) {
        if !self.overlay.leaderboard {
            return;
        }
        self.overlay.leaderboard = false;
        self.overlay.menu_buttons = self.state == GameState::MainMenu;
    }

    pub fn game_over(&mut self) {
        self.state = GameState::GameOver;

        self.player.visible = false;
        self.player.active = false;
        self.fuel.visible = false;
        self.game_over_pending = true;

        self.overlay.game_over_banner.fade_in(self.tuning.game_over_fade_in);
        self.playing_time = 0.0;

        log::info!("Game over with score {}", self.score as u64);
    }

    /// Record the score of the finished run. Only once per game over.
    pub fn submit_score(&mut self, name: &str, scores: &mut HighScores) -> bool {
        if self.state != GameState::GameOver || !self.overlay.submit_enabled {
            return false;
        }
        if let Err(e) = scores.add_high_score(name, self.score as u64) {
            log::warn!("Could not save high score: {}", e);
        }
        self.overlay.submit_enabled = false;
        true
    }

    /// Add an extra heart slot
    pub fn add_max_health(&mut self) {
        self.health.add_max_health();
    }

    /// Spend coins on the next heart slot. Only in the shop, and only when
    /// the wallet covers the price.
    pub fn buy_health_upgrade(&mut self) -> bool {
        if self.state != GameState::Upgrade {
            return false;
        }
        match self.health_upgrade.price() {
            Some(price) if price <= self.coins => {}
            _ => return false,
        }
        let Some(price) = self.health_upgrade.buy_next() else {
            return false;
        };
        self.coins -= price;
        self.add_max_health();
        log::info!(
            "Bought {} stage {} for {} coins",
            self.health_upgrade.name(),
            self.health_upgrade.current_stage(),
            price
        );
        true
    }

    /// Return the last heart slot bought and refund its price
    pub fn sell_health_upgrade(&mut self) -> bool {
        if self.state != GameState::Upgrade || self.health.max_health() <= 1 {
            return false;
        }
        let Some(refund) = self.health_upgrade.sell_last() else {
            return false;
        };
        self.health.remove_max_health();
        self.coins += refund;
        log::info!("Sold {} for {} coins", self.health_upgrade.name(), refund);
        true
    }

    /// Back to the first tier, restoring its section if the road moved on
    fn reset_tier(&mut self) {
        self.tier = 0;
        let section = self.tuning.score_tiers[0].section;
        if self.road.section() != section {
            self.road.set_road_section(section);
        }
    }
}
