//! Configuration errors
//!
//! These indicate integration bugs (bad lane counts, broken tuning files) and
//! are returned at the call site. Gameplay outcomes are never errors.

use std::fmt;

/// Rejected road construction or speed change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoadError {
    /// Fewer than two lanes
    InvalidLaneCount(usize),
    /// Road height must be > 0
    InvalidHeight(f32),
    /// Absolute speed must be >= 0
    NegativeSpeed(f32),
}

impl fmt::Display for RoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoadError::InvalidLaneCount(n) => {
                write!(f, "invalid number of lanes {}; must be >= 2", n)
            }
            RoadError::InvalidHeight(h) => write!(f, "invalid road height {}; must be > 0", h),
            RoadError::NegativeSpeed(s) => write!(f, "illegal speed {}; must be >= 0", s),
        }
    }
}

impl std::error::Error for RoadError {}

/// Failure loading or validating [`crate::Tuning`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
    Road(RoadError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "could not read tuning file: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed tuning file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
            ConfigError::Road(e) => write!(f, "invalid road: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Road(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<RoadError> for ConfigError {
    fn from(e: RoadError) -> Self {
        ConfigError::Road(e)
    }
}
