//! Game tuning
//!
//! Every balance constant lives here with its shipped default. A JSON file
//! can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{PlayerConfig, RoadConfig, RoadSection};

/// Score level: reaching `threshold` switches to `multiplier` and `section`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTier {
    pub threshold: f32,
    pub multiplier: f32,
    pub section: RoadSection,
}

impl ScoreTier {
    pub const fn new(threshold: f32, multiplier: f32, section: RoadSection) -> Self {
        Self {
            threshold,
            multiplier,
            section,
        }
    }
}

/// Road speed as a function of play time: `min(cap, base + (t / 2) * rate)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedCurve {
    pub base: f32,
    pub rate: f32,
    pub cap: f32,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            base: 150.0,
            rate: 5.0,
            cap: 500.0,
        }
    }
}

impl SpeedCurve {
    pub fn speed_at(&self, t: f32) -> f32 {
        (self.base + (t.max(0.0) / 2.0) * self.rate).min(self.cap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub window_width: f32,
    pub window_height: f32,
    pub road: RoadConfig,
    pub player: PlayerConfig,
    pub speed: SpeedCurve,

    // === Fuel ===
    pub fuel_max: f32,
    /// Fuel lost per second of play
    pub fuel_drain: f32,
    /// Fuel restored by a fuel pickup
    pub fuel_pickup: f32,

    // === Health ===
    pub max_health: usize,

    // === Shop ===
    /// Coin price of each extra heart slot, in purchase order
    pub health_upgrade_prices: Vec<u32>,

    // === Score ===
    /// `speed² * dt` is divided by this before the multiplier
    pub score_divisor: f32,
    pub score_tiers: Vec<ScoreTier>,

    // === Transitions ===
    /// Delay before game-over controls appear
    pub game_over_delay: f32,
    pub game_over_fade_in: f32,
    /// Title and banner fade-out
    pub fade_out: f32,

    /// Road RNG seed
    pub seed: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: 1280.0,
            window_height: 720.0,
            road: RoadConfig::default(),
            player: PlayerConfig::default(),
            speed: SpeedCurve::default(),

            fuel_max: 100.0,
            fuel_drain: 5.0,
            fuel_pickup: 10.0,

            max_health: 5,

            health_upgrade_prices: vec![5, 10, 20],

            score_divisor: 10_000.0,
            score_tiers: vec![
                ScoreTier::new(0.0, 1.0, RoadSection::White),
                ScoreTier::new(1_000.0, 2.0, RoadSection::Yellow),
                ScoreTier::new(2_500.0, 3.0, RoadSection::Dirt),
                ScoreTier::new(5_000.0, 4.0, RoadSection::White),
                ScoreTier::new(10_000.0, 5.0, RoadSection::Yellow),
            ],

            game_over_delay: 2.0,
            game_over_fade_in: 2.0,
            fade_out: 0.6,

            seed: 0x5eed_f00d,
        }
    }
}

impl Tuning {
    /// Read tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Like [`Tuning::load`], but a missing file means defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No tuning file at {}, using defaults", path.as_ref().display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.road.lanes < 2 {
            return Err(crate::RoadError::InvalidLaneCount(self.road.lanes).into());
        }
        if !(self.road.height > 0.0) {
            return Err(crate::RoadError::InvalidHeight(self.road.height).into());
        }
        if self.road.height > self.window_height {
            return invalid("road taller than the window");
        }
        if self.road.obstacle_odds == 0 || self.road.pickup_odds == 0 {
            return invalid("spawn odds must be at least 1");
        }
        if !(self.fuel_max > 0.0) {
            return invalid("fuel_max must be > 0");
        }
        if self.fuel_drain < 0.0 || self.fuel_pickup < 0.0 {
            return invalid("fuel rates must be >= 0");
        }
        if self.max_health == 0 {
            return invalid("max_health must be >= 1");
        }
        if self.health_upgrade_prices.is_empty() {
            return invalid("health_upgrade_prices is empty");
        }
        if !(self.score_divisor > 0.0) {
            return invalid("score_divisor must be > 0");
        }
        if self.speed.base < 0.0 || self.speed.cap < self.speed.base || self.speed.rate < 0.0 {
            return invalid("speed curve must be non-negative and non-decreasing");
        }

        match self.score_tiers.first() {
            None => return invalid("score_tiers is empty"),
            Some(tier) if tier.threshold != 0.0 => return invalid("first score tier must start at 0"),
            Some(_) => {}
        }
        if self
            .score_tiers
            .windows(2)
            .any(|w| w[1].threshold <= w[0].threshold)
        {
            return invalid("score tier thresholds must strictly increase");
        }

        Ok(())
    }
}
