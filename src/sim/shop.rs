//! Shop upgrades
//!
//! An upgrade is a fixed ladder of coin-priced stages bought in order. The
//! path only tracks progress; the manager checks the wallet and applies the
//! effect.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePath {
    name: String,
    prices: Vec<u32>,
    /// Stages bought so far; also the index of the next stage
    stage: usize,
}

impl UpgradePath {
    pub fn new(name: impl Into<String>, prices: Vec<u32>) -> Result<Self, ConfigError> {
        let name = name.into();
        if prices.is_empty() {
            return Err(ConfigError::Invalid(format!("upgrade '{}' has no stages", name)));
        }
        Ok(Self {
            name,
            prices,
            stage: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> usize {
        self.prices.len()
    }

    pub fn current_stage(&self) -> usize {
        self.stage
    }

    /// Price of the next stage, `None` once every stage is owned
    pub fn price(&self) -> Option<u32> {
        self.prices.get(self.stage).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.stage >= self.prices.len()
    }

    /// Take the next stage and return what it cost. The caller is
    /// responsible for charging that amount.
    pub fn buy_next(&mut self) -> Option<u32> {
        let price = self.price()?;
        self.stage += 1;
        Some(price)
    }

    /// Give back the most recent stage and return its original price for a
    /// refund
    pub fn sell_last(&mut self) -> Option<u32> {
        if self.stage == 0 {
            return None;
        }
        self.stage -= 1;
        Some(self.prices[self.stage])
    }
}
