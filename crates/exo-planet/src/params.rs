//! The visual parameter set that drives every layer's uniforms.

/// Smallest brightness accepted; brightness is an open interval at zero.
pub const MIN_BRIGHTNESS: f32 = 0.01;

/// User- or service-facing knobs for the planet's look.
///
/// Values are replaced wholesale on every change and are always stored
/// clamped: fractions to `[0, 1]`, brightness to `[MIN_BRIGHTNESS, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetVisualParameters {
    /// Warm-color shift and atmosphere hue blend.
    pub temperature: f32,
    /// Emissive rim term on the surface and atmosphere brightness.
    pub sun_proximity: f32,
    /// Vegetation layer opacity and green tint strength.
    pub vegetation_fraction: f32,
    /// Sea/cloud layer opacity; the ground layer shows the remainder.
    pub sea_level_fraction: f32,
    /// Global multiplier on emitted color and light intensity.
    pub brightness: f32,
}

impl Default for PlanetVisualParameters {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            sun_proximity: 0.0,
            vegetation_fraction: 0.0,
            sea_level_fraction: 0.0,
            brightness: 1.0,
        }
    }
}

impl PlanetVisualParameters {
    /// Build a clamped parameter set with full brightness.
    pub fn new(temperature: f32, sun_proximity: f32, vegetation: f32, sea_level: f32) -> Self {
        Self {
            temperature,
            sun_proximity,
            vegetation_fraction: vegetation,
            sea_level_fraction: sea_level,
            brightness: 1.0,
        }
        .clamped()
    }

    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = brightness;
        self.clamped()
    }

    /// Clamp every field into its declared range. Never fails.
    pub fn clamped(self) -> Self {
        Self {
            temperature: unit_fraction(self.temperature),
            sun_proximity: unit_fraction(self.sun_proximity),
            vegetation_fraction: unit_fraction(self.vegetation_fraction),
            sea_level_fraction: unit_fraction(self.sea_level_fraction),
            brightness: brightness(self.brightness),
        }
    }

    /// Opacity of the ground layer: whatever the sea does not cover.
    pub fn ground_opacity(&self) -> f32 {
        1.0 - self.sea_level_fraction
    }
}

/// Clamp into `[0, 1]`; NaN becomes 0.
pub fn unit_fraction(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Missing or non-numeric inputs count as 0.
pub fn coerce(value: Option<f32>) -> f32 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

fn brightness(value: f32) -> f32 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(MIN_BRIGHTNESS, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_values_clamp() {
        let p = PlanetVisualParameters::new(1.7, -0.3, 0.25, 42.0);
        assert_eq!(p.temperature, 1.0);
        assert_eq!(p.sun_proximity, 0.0);
        assert_eq!(p.vegetation_fraction, 0.25);
        assert_eq!(p.sea_level_fraction, 1.0);
    }

    #[test]
    fn test_nan_becomes_zero() {
        let p = PlanetVisualParameters::new(f32::NAN, 0.5, f32::NAN, 0.5);
        assert_eq!(p.temperature, 0.0);
        assert_eq!(p.vegetation_fraction, 0.0);
        assert_eq!(p.sun_proximity, 0.5);
    }

    #[test]
    fn test_infinities_clamp_to_bounds() {
        let p = PlanetVisualParameters::new(f32::INFINITY, f32::NEG_INFINITY, 0.0, 0.0);
        assert_eq!(p.temperature, 1.0);
        assert_eq!(p.sun_proximity, 0.0);
    }

    #[test]
    fn test_brightness_defaults_and_stays_positive() {
        assert_eq!(PlanetVisualParameters::default().brightness, 1.0);
        let dark = PlanetVisualParameters::default().with_brightness(0.0);
        assert_eq!(dark.brightness, MIN_BRIGHTNESS);
        let bright = PlanetVisualParameters::default().with_brightness(3.0);
        assert_eq!(bright.brightness, 1.0);
        let nan = PlanetVisualParameters::default().with_brightness(f32::NAN);
        assert_eq!(nan.brightness, 1.0);
    }

    #[test]
    fn test_ground_opacity_is_sea_complement() {
        for sea in [0.0, 0.3, 0.7, 1.0] {
            let p = PlanetVisualParameters::new(0.0, 0.0, 0.0, sea);
            assert_eq!(p.ground_opacity(), 1.0 - sea);
        }
    }

    #[test]
    fn test_coerce_missing_values() {
        assert_eq!(coerce(None), 0.0);
        assert_eq!(coerce(Some(f32::NAN)), 0.0);
        assert_eq!(coerce(Some(0.4)), 0.4);
    }

    #[test]
    fn test_clamped_is_idempotent() {
        let p = PlanetVisualParameters::new(0.2, 0.9, 0.4, 0.6).with_brightness(0.5);
        assert_eq!(p.clamped(), p);
    }
}
