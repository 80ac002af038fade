//! Physical planet parameters behind the habitability sliders.
//!
//! These never reach the shaders directly. They feed the habitability
//! service, whose answer comes back through the reactivity bridge.

use crate::catalog::PlanetStats;

/// One adjustable physical quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}

impl SliderSpec {
    const fn new(
        key: &'static str,
        label: &'static str,
        min: f32,
        max: f32,
        step: f32,
        default: f32,
    ) -> Self {
        Self {
            key,
            label,
            min,
            max,
            step,
            default,
        }
    }

    /// Clamp into the slider range; NaN falls back to the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

pub const SLIDERS: [SliderSpec; 15] = [
    SliderSpec::new("distance", "Distance from Star (AU)", 0.1, 5.0, 0.1, 1.0),
    SliderSpec::new("mass", "Mass (Earth masses)", 0.1, 5.0, 0.1, 1.0),
    SliderSpec::new("radius", "Radius (Earth radii)", 0.1, 5.0, 0.1, 1.0),
    SliderSpec::new("orbitalPeriod", "Orbital Period (days)", 1.0, 1000.0, 1.0, 365.0),
    SliderSpec::new("stellarMass", "Stellar Mass (Solar masses)", 0.1, 5.0, 0.1, 1.0),
    SliderSpec::new("stellarRadius", "Stellar Radius (Solar radii)", 0.1, 5.0, 0.1, 1.0),
    SliderSpec::new("ETemp", "Equilibrium Temperature (K)", 0.0, 1000.0, 1.0, 288.0),
    SliderSpec::new("SystemAge", "System Age (Billion years)", 0.1, 10.0, 0.1, 4.6),
    SliderSpec::new("atmosphericThickness", "Atmospheric Thickness (Earth = 1)", 0.0, 5.0, 0.1, 1.0),
    SliderSpec::new("magneticField", "Magnetic Field Strength (Earth = 1)", 0.0, 1.0, 1.0, 1.0),
    SliderSpec::new("oxygen", "Oxygen Level (%)", 0.0, 100.0, 1.0, 21.0),
    SliderSpec::new("nitrogen", "Nitrogen Level (%)", 0.0, 100.0, 1.0, 78.0),
    SliderSpec::new("carbon", "CO2 Level (%)", 0.0, 100.0, 1.0, 0.04),
    SliderSpec::new("temp", "Temperature (K)", -100.0, 6000.0, 1.0, 288.0),
    SliderSpec::new("size", "Size (Earth = 1)", 0.1, 5.0, 0.1, 1.0),
];

pub fn slider(key: &str) -> Option<&'static SliderSpec> {
    SLIDERS.iter().find(|s| s.key == key)
}

/// Current value of every slider, indexed like [`SLIDERS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParameters {
    values: [f32; SLIDERS.len()],
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            values: SLIDERS.map(|s| s.default),
        }
    }
}

impl PhysicalParameters {
    /// Defaults overlaid with a catalog entry's stats. The catalog carries
    /// one temperature, used for both the surface and equilibrium sliders.
    pub fn from_stats(stats: &PlanetStats) -> Self {
        let mut params = Self::default();
        params.set("mass", stats.mass);
        params.set("radius", stats.radius);
        params.set("distance", stats.distance_au);
        params.set("orbitalPeriod", stats.orbital_period_days);
        params.set("temp", stats.temperature_k);
        params.set("ETemp", stats.temperature_k);
        params.set("size", stats.size);
        params.set("atmosphericThickness", stats.atmosphere);
        params
    }

    /// Set a slider by key, clamped to its range. Returns `false` for an
    /// unknown key.
    pub fn set(&mut self, key: &str, value: f32) -> bool {
        match SLIDERS.iter().position(|s| s.key == key) {
            Some(index) => {
                self.values[index] = SLIDERS[index].clamp(value);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<f32> {
        SLIDERS
            .iter()
            .position(|s| s.key == key)
            .map(|index| self.values[index])
    }

    /// `(slider, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static SliderSpec, f32)> + '_ {
        SLIDERS.iter().zip(self.values.iter().copied())
    }

    /// Move one slider by `steps` of its step size.
    pub fn nudge(&mut self, key: &str, steps: f32) -> bool {
        match (slider(key), self.get(key)) {
            (Some(spec), Some(current)) => self.set(key, current + spec.step * steps),
            _ => false,
        }
    }
}
