//! Per-layer uniform values and their GPU packing.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::layer::{LayerKind, ShaderId};
use crate::params::PlanetVisualParameters;
use crate::variant::{Lights, Palette, RimBlue};

/// Inputs of the surface shader family.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceUniforms {
    /// Red channel of the rim term.
    pub scale: f32,
    /// Green channel of the rim term and tint strength.
    pub vegetation: f32,
    pub temperature: f32,
    /// Multiplies texel alpha.
    pub opacity: f32,
}

/// Inputs of the atmosphere shader family.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AtmosphereUniforms {
    pub temperature: f32,
    pub sun_proximity: f32,
}

/// The uniform record owned by one layer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformSet {
    Surface(SurfaceUniforms),
    Atmosphere(AtmosphereUniforms),
}

impl UniformSet {
    /// Derive a layer's uniforms from the parameter set.
    ///
    /// | Layer       | scale | vegetation | temperature | opacity   |
    /// |-------------|-------|------------|-------------|-----------|
    /// | Surface     | sun   | 0          | temperature | 1         |
    /// | Ground      | 0     | 0          | temperature | 1 - sea   |
    /// | Vegetation  | 0     | vegetation | 0           | vegetation|
    /// | Sea         | 0     | 0          | 0           | sea       |
    ///
    /// The atmosphere takes temperature and sun proximity directly.
    pub(crate) fn wired(kind: LayerKind, p: &PlanetVisualParameters) -> Self {
        let surface = |scale, vegetation, temperature, opacity| {
            UniformSet::Surface(SurfaceUniforms {
                scale,
                vegetation,
                temperature,
                opacity,
            })
        };
        match kind {
            LayerKind::Surface => surface(p.sun_proximity, 0.0, p.temperature, 1.0),
            LayerKind::Ground => surface(0.0, 0.0, p.temperature, p.ground_opacity()),
            LayerKind::Vegetation => {
                surface(0.0, p.vegetation_fraction, 0.0, p.vegetation_fraction)
            }
            LayerKind::Sea => surface(0.0, 0.0, 0.0, p.sea_level_fraction),
            LayerKind::Atmosphere => UniformSet::Atmosphere(AtmosphereUniforms {
                temperature: p.temperature,
                sun_proximity: p.sun_proximity,
            }),
        }
    }

    pub fn opacity(&self) -> Option<f32> {
        match self {
            UniformSet::Surface(s) => Some(s.opacity),
            UniformSet::Atmosphere(_) => None,
        }
    }

    pub fn as_surface(&self) -> Option<&SurfaceUniforms> {
        match self {
            UniformSet::Surface(s) => Some(s),
            UniformSet::Atmosphere(_) => None,
        }
    }

    pub fn as_atmosphere(&self) -> Option<&AtmosphereUniforms> {
        match self {
            UniformSet::Atmosphere(a) => Some(a),
            UniformSet::Surface(_) => None,
        }
    }
}

/// GPU layout of one layer's uniform block (group 1, binding 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LayerUniform {
    pub model: [[f32; 4]; 4],
    /// scale, vegetation, temperature, opacity.
    pub params: [f32; 4],
    /// Rim axis (xyz) and rim bias (w).
    pub view_axis: [f32; 4],
    /// Temperature tint (rgb) and texture gain (w).
    pub tint: [f32; 4],
    /// Ocean color (rgb) and land threshold (w).
    pub ocean: [f32; 4],
    /// Rim blue from temperature, land mask on, brightness, light response.
    pub flags: [f32; 4],
    /// Cool atmosphere color (rgb) and strength base (w).
    pub atmosphere_cool: [f32; 4],
    /// Warm atmosphere color (rgb) and sun gain (w).
    pub atmosphere_warm: [f32; 4],
}

impl LayerUniform {
    pub fn pack(
        model: Mat4,
        shader: ShaderId,
        set: &UniformSet,
        palette: &Palette,
        brightness: f32,
    ) -> Self {
        let params = match set {
            UniformSet::Surface(s) => [s.scale, s.vegetation, s.temperature, s.opacity],
            UniformSet::Atmosphere(a) => [a.sun_proximity, 0.0, a.temperature, 1.0],
        };
        let (axis, bias) = match shader {
            ShaderId::Surface => (palette.surface_view_axis, palette.surface_rim_bias),
            ShaderId::Atmosphere => (palette.atmosphere_view_axis, palette.atmosphere_rim_bias),
        };
        let (ocean, threshold, mask_on) = match palette.land_mask {
            Some(mask) => (mask.ocean_color, mask.threshold, 1.0),
            None => (glam::Vec3::ZERO, 0.0, 0.0),
        };
        let rim_blue = match palette.rim_blue {
            RimBlue::Constant => 0.0,
            RimBlue::Temperature => 1.0,
        };

        Self {
            model: model.to_cols_array_2d(),
            params,
            view_axis: axis.extend(bias).to_array(),
            tint: palette
                .temperature_tint
                .extend(palette.texture_gain)
                .to_array(),
            ocean: ocean.extend(threshold).to_array(),
            flags: [rim_blue, mask_on, brightness, palette.light_response],
            atmosphere_cool: palette
                .atmosphere_cool
                .extend(palette.atmosphere_base)
                .to_array(),
            atmosphere_warm: palette
                .atmosphere_warm
                .extend(palette.atmosphere_sun_gain)
                .to_array(),
        }
    }
}

/// Scene lights (group 0, binding 1).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniform {
    /// Unit vector toward the directional light (xyz), intensity (w).
    pub direction: [f32; 4],
    /// Ambient intensity (x).
    pub ambient: [f32; 4],
}

impl LightUniform {
    /// Both intensities are scaled by `brightness`.
    pub fn new(lights: &Lights, brightness: f32) -> Self {
        let dir = lights.directional.position.normalize_or_zero();
        Self {
            direction: dir
                .extend(lights.directional.intensity * brightness)
                .to_array(),
            ambient: [lights.ambient * brightness, 0.0, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PlanetVisualParameters {
        PlanetVisualParameters::new(0.6, 0.4, 0.3, 0.8)
    }

    #[test]
    fn test_wiring_table() {
        let p = params();
        let surface = UniformSet::wired(LayerKind::Surface, &p);
        assert_eq!(
            surface,
            UniformSet::Surface(SurfaceUniforms {
                scale: 0.4,
                vegetation: 0.0,
                temperature: 0.6,
                opacity: 1.0
            })
        );
        let ground = UniformSet::wired(LayerKind::Ground, &p);
        let g = ground.as_surface().unwrap();
        assert_eq!((g.scale, g.vegetation, g.temperature), (0.0, 0.0, 0.6));
        assert_eq!(g.opacity, 1.0 - 0.8);

        let veg = UniformSet::wired(LayerKind::Vegetation, &p);
        let v = veg.as_surface().unwrap();
        assert_eq!((v.vegetation, v.opacity, v.temperature), (0.3, 0.3, 0.0));

        let sea = UniformSet::wired(LayerKind::Sea, &p);
        assert_eq!(sea.opacity(), Some(0.8));

        let atmosphere = UniformSet::wired(LayerKind::Atmosphere, &p);
        assert_eq!(
            atmosphere.as_atmosphere(),
            Some(&AtmosphereUniforms {
                temperature: 0.6,
                sun_proximity: 0.4
            })
        );
        assert_eq!(atmosphere.opacity(), None);
    }

    #[test]
    fn test_layer_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<LayerUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<LayerUniform>(), 176);
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
    }

    #[test]
    fn test_pack_surface_uses_surface_axis() {
        let palette = Palette::vegetation_tinted();
        let set = UniformSet::wired(LayerKind::Surface, &params());
        let packed = LayerUniform::pack(Mat4::IDENTITY, ShaderId::Surface, &set, &palette, 0.5);
        assert_eq!(packed.params, [0.4, 0.0, 0.6, 1.0]);
        assert_eq!(packed.view_axis[3], 1.05);
        assert_eq!(packed.flags, [1.0, 1.0, 0.5, 0.0]);
        assert_eq!(packed.ocean[3], 0.1);
    }

    #[test]
    fn test_pack_atmosphere_uses_atmosphere_axis() {
        let palette = Palette::default();
        let set = UniformSet::wired(LayerKind::Atmosphere, &params());
        let packed =
            LayerUniform::pack(Mat4::IDENTITY, ShaderId::Atmosphere, &set, &palette, 1.0);
        assert_eq!(packed.params[0], 0.4);
        assert_eq!(packed.params[2], 0.6);
        assert_eq!(packed.view_axis, [0.0, 0.0, 1.0, 0.7]);
        assert_eq!(packed.atmosphere_cool[3], 1.0);
        assert_eq!(packed.atmosphere_warm[3], 2.0);
    }

    #[test]
    fn test_light_uniform_scales_with_brightness() {
        let lights = Lights::default();
        let full = LightUniform::new(&lights, 1.0);
        let half = LightUniform::new(&lights, 0.5);
        assert_eq!(full.direction[3], 1.5);
        assert_eq!(half.direction[3], 0.75);
        assert_eq!(half.ambient[0], 0.1);
        let len = glam::Vec3::from_slice(&full.direction[..3]).length();
        assert!((len - 1.0).abs() < 1e-5);
    }
}
