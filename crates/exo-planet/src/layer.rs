//! Static description of one visual layer of a planet.

/// What a layer represents; selects its row in the uniform wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Base albedo map, lit by the sun-proximity rim.
    Surface,
    /// Bare ground, revealed as the sea recedes.
    Ground,
    Vegetation,
    /// Sea or cloud cover.
    Sea,
    Atmosphere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source-over alpha blending.
    Normal,
    /// `src * src_alpha + dst`.
    Additive,
}

/// Which faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceCulling {
    /// Draw front faces only.
    Back,
    /// Draw back faces only; the atmosphere shell glows around the limb.
    Front,
}

impl FaceCulling {
    pub fn to_wgpu(self) -> wgpu::Face {
        match self {
            FaceCulling::Back => wgpu::Face::Back,
            FaceCulling::Front => wgpu::Face::Front,
        }
    }
}

/// Shader program a layer is drawn with. Compiled once per id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderId {
    Surface,
    Atmosphere,
}

impl ShaderId {
    pub fn id(self) -> &'static str {
        match self {
            ShaderId::Surface => "planet-surface",
            ShaderId::Atmosphere => "planet-atmosphere",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            ShaderId::Surface => include_str!("shaders/surface.wgsl"),
            ShaderId::Atmosphere => include_str!("shaders/atmosphere.wgsl"),
        }
    }
}

/// How a layer's radius relates to the planet's base radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerExtent {
    Offset(f32),
    Scale(f32),
}

/// One layer of a planet variant.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub kind: LayerKind,
    /// Image path relative to the asset directory. `None` samples white.
    pub texture: Option<&'static str>,
    pub shader: ShaderId,
    pub blend: BlendMode,
    pub depth_write: bool,
    pub culling: FaceCulling,
    pub extent: LayerExtent,
}

impl LayerSpec {
    fn textured(kind: LayerKind, texture: &'static str, blend: BlendMode, offset: f32) -> Self {
        Self {
            kind,
            texture: Some(texture),
            shader: ShaderId::Surface,
            blend,
            depth_write: false,
            culling: FaceCulling::Back,
            extent: LayerExtent::Offset(offset),
        }
    }

    pub fn surface(texture: &'static str) -> Self {
        Self::textured(LayerKind::Surface, texture, BlendMode::Normal, 0.0)
    }

    pub fn ground(texture: &'static str) -> Self {
        Self::textured(LayerKind::Ground, texture, BlendMode::Normal, 0.005)
    }

    pub fn vegetation(texture: &'static str) -> Self {
        Self::textured(LayerKind::Vegetation, texture, BlendMode::Additive, 0.01)
    }

    pub fn sea(texture: &'static str) -> Self {
        Self::textured(LayerKind::Sea, texture, BlendMode::Additive, 0.02)
    }

    /// Back-face additive shell at 1.2x the base radius.
    pub fn atmosphere() -> Self {
        Self {
            kind: LayerKind::Atmosphere,
            texture: None,
            shader: ShaderId::Atmosphere,
            blend: BlendMode::Additive,
            depth_write: false,
            culling: FaceCulling::Front,
            extent: LayerExtent::Scale(1.2),
        }
    }

    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.depth_write = depth_write;
        self
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.extent = LayerExtent::Offset(offset);
        self
    }

    pub fn radius(&self, base_radius: f32) -> f32 {
        match self.extent {
            LayerExtent::Offset(offset) => base_radius + offset,
            LayerExtent::Scale(scale) => base_radius * scale,
        }
    }
}
