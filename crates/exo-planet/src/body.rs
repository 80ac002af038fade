//! A mounted planet: layer instances, shared rotation, lights.

use glam::{Mat4, Vec3};
use thiserror::Error;

use crate::layer::LayerSpec;
use crate::params::PlanetVisualParameters;
use crate::uniforms::UniformSet;
use crate::variant::PlanetVariant;

pub use crate::variant::Lights;

#[derive(Debug, Error, PartialEq)]
pub enum BodyError {
    #[error("planet variant '{0}' has no layers")]
    NoLayers(&'static str),

    #[error("layer {index} radius {radius} does not exceed previous radius {previous}")]
    RadiusNotIncreasing {
        index: usize,
        radius: f32,
        previous: f32,
    },
}

/// Y-axis spin shared by every layer of a body.
///
/// Accumulates without wrapping; only a remount resets it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    angle: f32,
    speed: f32,
}

impl RotationState {
    pub fn new(speed: f32) -> Self {
        Self { angle: 0.0, speed }
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.angle += self.speed;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

/// One layer of a mounted body and the uniforms it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInstance {
    pub spec: LayerSpec,
    pub radius: f32,
    uniforms: UniformSet,
}

impl LayerInstance {
    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }
}

/// The active planet. Owns its layers exclusively; nothing is shared
/// between bodies.
#[derive(Debug, Clone)]
pub struct PlanetBody {
    variant: PlanetVariant,
    layers: Vec<LayerInstance>,
    rotation: RotationState,
    parameters: PlanetVisualParameters,
}

impl PlanetBody {
    /// Instantiate a variant with default parameters.
    pub fn mount(variant: &PlanetVariant) -> Result<Self, BodyError> {
        if variant.layers.is_empty() {
            return Err(BodyError::NoLayers(variant.name));
        }

        let parameters = PlanetVisualParameters::default();
        let mut layers: Vec<LayerInstance> = Vec::with_capacity(variant.layers.len());
        for (index, spec) in variant.layers.iter().enumerate() {
            let radius = spec.radius(variant.base_radius);
            if let Some(previous) = layers.last().map(|l| l.radius)
                && radius <= previous
            {
                return Err(BodyError::RadiusNotIncreasing {
                    index,
                    radius,
                    previous,
                });
            }
            layers.push(LayerInstance {
                spec: spec.clone(),
                radius,
                uniforms: UniformSet::wired(spec.kind, &parameters),
            });
        }

        tracing::debug!(
            planet = variant.name,
            layers = layers.len(),
            "Mounted planet body"
        );

        Ok(Self {
            variant: variant.clone(),
            layers,
            rotation: RotationState::new(variant.rotation_speed),
            parameters,
        })
    }

    /// Per-frame update: spin every layer together.
    pub fn advance(&mut self) {
        self.rotation.advance();
    }

    pub fn name(&self) -> &'static str {
        self.variant.name
    }

    pub fn variant(&self) -> &PlanetVariant {
        &self.variant
    }

    pub fn layers(&self) -> &[LayerInstance] {
        &self.layers
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn lights(&self) -> &Lights {
        &self.variant.lights
    }

    /// The parameters the uniforms were last written from.
    pub fn parameters(&self) -> PlanetVisualParameters {
        self.parameters
    }

    /// Rotation then scale to the layer's radius; the body sits at the origin.
    pub fn model_matrix(&self, layer: &LayerInstance) -> Mat4 {
        Mat4::from_rotation_y(self.rotation.angle) * Mat4::from_scale(Vec3::splat(layer.radius))
    }

    /// Rewrite every layer's uniforms. Only the reactivity bridge calls this.
    pub(crate) fn apply(&mut self, parameters: PlanetVisualParameters) {
        self.parameters = parameters;
        for layer in &mut self.layers {
            layer.uniforms = UniformSet::wired(layer.spec.kind, &parameters);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::LayerKind;

    fn earth() -> PlanetVariant {
        PlanetVariant::layered("Earth", "earth.png", "ground.jpg", "land.png", "sea.png")
    }

    #[test]
    fn test_mount_stacks_strictly_increasing_radii() {
        let body = PlanetBody::mount(&earth()).unwrap();
        assert_eq!(body.layers().len(), 5);
        let radii: Vec<f32> = body.layers().iter().map(|l| l.radius).collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]), "{radii:?}");
        assert!((radii[4] - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_mount_rejects_overlapping_layers() {
        let mut variant = earth();
        variant.layers[1] = variant.layers[1].clone().with_offset(0.0);
        assert_eq!(
            PlanetBody::mount(&variant).unwrap_err(),
            BodyError::RadiusNotIncreasing {
                index: 1,
                radius: 5.0,
                previous: 5.0
            }
        );
    }

    #[test]
    fn test_mount_rejects_empty_variant() {
        let mut variant = earth();
        variant.layers.clear();
        assert_eq!(
            PlanetBody::mount(&variant).unwrap_err(),
            BodyError::NoLayers("Earth")
        );
    }

    #[test]
    fn test_rotation_accumulates_per_frame() {
        let mut body = PlanetBody::mount(&earth()).unwrap();
        for _ in 0..10 {
            body.advance();
        }
        assert!((body.rotation().angle() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_all_layers_share_rotation() {
        let mut body = PlanetBody::mount(&earth()).unwrap();
        body.advance();
        let probe = glam::Vec3::X;
        let directions: Vec<glam::Vec3> = body
            .layers()
            .iter()
            .map(|l| body.model_matrix(l).transform_vector3(probe).normalize())
            .collect();
        for d in &directions[1..] {
            assert!((*d - directions[0]).length() < 1e-6);
        }
    }

    #[test]
    fn test_remount_resets_rotation() {
        let variant = earth();
        let mut body = PlanetBody::mount(&variant).unwrap();
        body.advance();
        let body = PlanetBody::mount(body.variant()).unwrap();
        assert_eq!(body.rotation().angle(), 0.0);
    }

    #[test]
    fn test_mount_wires_default_parameters() {
        let body = PlanetBody::mount(&earth()).unwrap();
        let ground = body
            .layers()
            .iter()
            .find(|l| l.spec.kind == LayerKind::Ground)
            .unwrap();
        assert_eq!(ground.uniforms().opacity(), Some(1.0));
    }
}
