//! Planet variants: a layer stack plus the shader constants it is drawn with.

use glam::Vec3;

use crate::layer::LayerSpec;

/// Blue channel of the surface rim term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RimBlue {
    /// Constant 1: a cool blue halo regardless of temperature.
    Constant,
    /// Follows the layer's temperature uniform.
    Temperature,
}

/// Texel classifier for the vegetation tint: anything farther than
/// `threshold` from `ocean_color` counts as land.
///
/// Depends on the texture's actual ocean color, so it only suits the maps it
/// was tuned for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandMask {
    pub ocean_color: Vec3,
    pub threshold: f32,
}

/// Per-variant shader constants. Uniform wiring is the same for every
/// variant; only these numbers differ.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Multiplier on sampled texels before the rim and tint are added.
    pub texture_gain: f32,
    /// Added to the surface color, scaled by temperature.
    pub temperature_tint: Vec3,
    pub rim_blue: RimBlue,
    /// View-space axis the surface rim is measured against.
    pub surface_view_axis: Vec3,
    pub surface_rim_bias: f32,
    /// Enables the green tint on land texels.
    pub land_mask: Option<LandMask>,
    pub atmosphere_view_axis: Vec3,
    pub atmosphere_rim_bias: f32,
    /// Atmosphere color at temperature 0.
    pub atmosphere_cool: Vec3,
    /// Atmosphere color at temperature 1.
    pub atmosphere_warm: Vec3,
    /// Atmosphere strength is `base + sun_gain * sun_proximity`.
    pub atmosphere_base: f32,
    pub atmosphere_sun_gain: f32,
    /// 0 keeps layers unlit; 1 fully modulates them by the scene lights.
    pub light_response: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            texture_gain: 1.2,
            temperature_tint: Vec3::new(0.3, 0.1, 0.1),
            rim_blue: RimBlue::Constant,
            surface_view_axis: Vec3::Z,
            surface_rim_bias: 1.05,
            land_mask: None,
            atmosphere_view_axis: Vec3::Z,
            atmosphere_rim_bias: 0.7,
            atmosphere_cool: Vec3::new(0.3, 0.6, 1.0),
            atmosphere_warm: Vec3::new(0.7, 0.3, 0.3),
            atmosphere_base: 1.0,
            atmosphere_sun_gain: 2.0,
            light_response: 0.0,
        }
    }
}

impl Palette {
    /// Vegetation-tinted look: raw texels, temperature drives the rim's blue,
    /// and land texels pick up a green tint.
    pub fn vegetation_tinted() -> Self {
        Self {
            texture_gain: 1.0,
            temperature_tint: Vec3::ZERO,
            rim_blue: RimBlue::Temperature,
            surface_view_axis: Vec3::new(0.0078, 0.0667, 0.0157),
            land_mask: Some(LandMask {
                ocean_color: Vec3::new(0.0824, 0.502, 0.0),
                threshold: 0.1,
            }),
            atmosphere_view_axis: Vec3::new(0.051, 0.0, 1.0),
            atmosphere_rim_bias: 0.8,
            ..Self::default()
        }
    }

    /// Fixed-hue halo that ignores temperature and sun proximity.
    pub fn fixed_halo(color: Vec3, strength: f32) -> Self {
        Self {
            atmosphere_cool: color,
            atmosphere_warm: color,
            atmosphere_base: strength,
            atmosphere_sun_gain: 0.0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub intensity: f32,
}

/// One directional and one ambient light per planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub directional: DirectionalLight,
    pub ambient: f32,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            directional: DirectionalLight {
                position: Vec3::new(-2.0, -0.5, 1.5),
                intensity: 1.5,
            },
            ambient: 0.2,
        }
    }
}

/// Everything needed to mount a planet body.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetVariant {
    pub name: &'static str,
    pub base_radius: f32,
    /// Y rotation per frame, radians.
    pub rotation_speed: f32,
    /// Drawn in order; radii must increase strictly.
    pub layers: Vec<LayerSpec>,
    pub palette: Palette,
    pub lights: Lights,
}

pub const BASE_RADIUS: f32 = 5.0;
pub const DEFAULT_ROTATION_SPEED: f32 = 0.002;

impl PlanetVariant {
    /// Four textured shells (surface, ground, vegetation, sea) under an
    /// atmosphere that warms with temperature.
    pub fn layered(
        name: &'static str,
        surface: &'static str,
        ground: &'static str,
        vegetation: &'static str,
        sea: &'static str,
    ) -> Self {
        Self {
            name,
            base_radius: BASE_RADIUS,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            layers: vec![
                LayerSpec::surface(surface),
                LayerSpec::ground(ground),
                LayerSpec::vegetation(vegetation),
                LayerSpec::sea(sea).with_depth_write(true),
                LayerSpec::atmosphere(),
            ],
            palette: Palette::default(),
            lights: Lights::default(),
        }
    }

    /// Two textured shells and a fixed blue halo, turning at half speed.
    pub fn compact(name: &'static str, surface: &'static str, ground: &'static str) -> Self {
        Self {
            name,
            base_radius: BASE_RADIUS,
            rotation_speed: 0.001,
            layers: vec![
                LayerSpec::surface(surface),
                LayerSpec::ground(ground),
                LayerSpec::atmosphere(),
            ],
            palette: Palette::fixed_halo(Vec3::new(0.1, 0.6, 1.0), 2.5),
            lights: Lights::default(),
        }
    }

    /// Land, vegetation and cloud shells with the land-mask green tint.
    pub fn vegetation_tinted(
        name: &'static str,
        land: &'static str,
        vegetation: &'static str,
        clouds: &'static str,
    ) -> Self {
        Self {
            name,
            base_radius: BASE_RADIUS,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            layers: vec![
                LayerSpec::surface(land).with_depth_write(true),
                LayerSpec::vegetation(vegetation)
                    .with_depth_write(true)
                    .with_offset(0.005),
                LayerSpec::sea(clouds)
                    .with_depth_write(true)
                    .with_offset(0.01),
                LayerSpec::atmosphere(),
            ],
            palette: Palette::vegetation_tinted(),
            lights: Lights {
                ambient: 0.2,
                directional: DirectionalLight {
                    position: Vec3::new(-2.0, -0.5, 1.5),
                    intensity: 1.0,
                },
            },
        }
    }

    /// Distinct texture paths in first-use order.
    pub fn texture_paths(&self) -> Vec<&'static str> {
        let mut paths: Vec<&'static str> = Vec::new();
        for path in self.layers.iter().filter_map(|l| l.texture) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}
