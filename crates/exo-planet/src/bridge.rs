//! Parameter reactivity bridge: the single path from parameter changes to
//! layer uniforms.
//!
//! Two sources feed it. Local controls always hold a value; external values
//! (the habitability service, a selected catalog entry) may or may not. A
//! defined external value wins over the local one for the same parameter.

use crate::body::PlanetBody;
use crate::params::{PlanetVisualParameters, coerce};

/// Values supplied from outside the local controls. `None` defers to the
/// local control.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExternalValues {
    pub temperature: Option<f32>,
    pub sun_proximity: Option<f32>,
    pub vegetation: Option<f32>,
    pub sea_level: Option<f32>,
}

impl ExternalValues {
    /// Vegetation and sea level, as returned by the habitability service.
    pub fn surface_cover(vegetation: f32, sea_level: f32) -> Self {
        Self {
            vegetation: Some(vegetation),
            sea_level: Some(sea_level),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReactivityBridge {
    local: PlanetVisualParameters,
    external: ExternalValues,
}

impl ReactivityBridge {
    pub fn new(local: PlanetVisualParameters) -> Self {
        Self {
            local: local.clamped(),
            external: ExternalValues::default(),
        }
    }

    pub fn local(&self) -> PlanetVisualParameters {
        self.local
    }

    pub fn external(&self) -> ExternalValues {
        self.external
    }

    /// Replace the local control values.
    pub fn set_local(&mut self, local: PlanetVisualParameters) {
        self.local = local.clamped();
    }

    pub fn set_external(&mut self, external: ExternalValues) {
        self.external = external;
    }

    pub fn clear_external(&mut self) {
        self.external = ExternalValues::default();
    }

    /// Effective parameters: external where defined, local otherwise,
    /// non-numeric external values coerced to 0, everything clamped.
    pub fn resolved(&self) -> PlanetVisualParameters {
        let pick = |external: Option<f32>, local: f32| match external {
            Some(_) => coerce(external),
            None => local,
        };
        PlanetVisualParameters {
            temperature: pick(self.external.temperature, self.local.temperature),
            sun_proximity: pick(self.external.sun_proximity, self.local.sun_proximity),
            vegetation_fraction: pick(self.external.vegetation, self.local.vegetation_fraction),
            sea_level_fraction: pick(self.external.sea_level, self.local.sea_level_fraction),
            brightness: self.local.brightness,
        }
        .clamped()
    }

    /// Overwrite every uniform set on `body` from the resolved parameters.
    /// Takes effect on the next rendered frame; there is no interpolation.
    pub fn sync(&self, body: &mut PlanetBody) -> PlanetVisualParameters {
        let resolved = self.resolved();
        if body.parameters() != resolved {
            tracing::debug!(
                planet = body.name(),
                temperature = resolved.temperature,
                sun_proximity = resolved.sun_proximity,
                vegetation = resolved.vegetation_fraction,
                sea_level = resolved.sea_level_fraction,
                "Syncing layer uniforms"
            );
        }
        body.apply(resolved);
        resolved
    }
}
