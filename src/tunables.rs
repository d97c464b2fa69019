use std::ops::RangeInclusive;

use crate::uniforms::{names, UniformBridge};

pub const SENSITIVITY_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const SPIN_RANGE: RangeInclusive<f32> = -2.0..=2.0;
pub const MASS_RANGE: RangeInclusive<f32> = 0.0..=5.0;
pub const CHARGE_RANGE: RangeInclusive<f32> = -5.0..=5.0;

/// Live-tuned scene constants edited from the parameter panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tunables {
    /// Scales the per-frame translation step of held movement keys
    pub sensitivity: f32,
    /// Spin parameter
    pub a: f32,
    /// Mass
    pub m: f32,
    /// Charge
    pub q: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            sensitivity: 0.5,
            a: 0.1,
            m: 1.0,
            q: 0.5,
        }
    }
}

impl Tunables {
    /// Force every field into its panel range
    pub fn clamp(&mut self) {
        self.sensitivity = clamp_to(self.sensitivity, &SENSITIVITY_RANGE);
        self.a = clamp_to(self.a, &SPIN_RANGE);
        self.m = clamp_to(self.m, &MASS_RANGE);
        self.q = clamp_to(self.q, &CHARGE_RANGE);
    }

    pub fn export_to_uniforms(&self, bridge: &mut dyn UniformBridge) {
        bridge.set_float(names::SPIN, self.a);
        bridge.set_float(names::MASS, self.m);
        bridge.set_float(names::CHARGE, self.q);
    }
}

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}
