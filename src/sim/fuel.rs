//! Fuel gauge
//!
//! The value half of the fuel progress bar: the real value is clamped to
//! `[0, max]` and a display value eases toward it for the bar animation.

/// Rate the display value chases the real one
pub const DEFAULT_FILL_SPEED: f32 = 10.0;

/// Fraction of the tank below which the gauge reads empty. Per-frame drain
/// accumulates f32 error and can leave a residue just above zero.
const EMPTY_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, PartialEq)]
pub struct FuelGauge {
    max: f32,
    current: f32,
    display: f32,
    fill_speed: f32,
    pub visible: bool,
}

impl FuelGauge {
    pub fn new(max: f32) -> Self {
        Self {
            max,
            current: max,
            display: max,
            fill_speed: DEFAULT_FILL_SPEED,
            visible: false,
        }
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn display_value(&self) -> f32 {
        self.display
    }

    /// Add (or with a negative delta, drain) fuel. Returns the clamped value.
    pub fn add(&mut self, delta: f32) -> f32 {
        self.current = (self.current + delta).clamp(0.0, self.max);
        if self.current <= self.max * EMPTY_EPSILON {
            self.current = 0.0;
        }
        self.current
    }

    pub fn set_to_max(&mut self) {
        self.current = self.max;
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn animate(&mut self, dt: f32) {
        self.display += (self.current - self.display) * (self.fill_speed * dt).min(1.0);
        if (self.current - self.display).abs() < 0.1 {
            self.display = self.current;
        }
    }
}
