//! Layered-sphere planet model.
//!
//! A planet is a stack of concentric textured spheres plus a back-face
//! atmosphere shell. Everything that differs between planets (textures,
//! radii, blend modes, shader palette constants) is data in a
//! [`PlanetVariant`]; one renderer draws them all.
//!
//! Parameter flow: [`ReactivityBridge`] resolves local controls against
//! external values, then rewrites every layer's [`UniformSet`] on the
//! mounted [`PlanetBody`]. The GPU side only reads those sets.

pub mod body;
pub mod bridge;
pub mod catalog;
pub mod layer;
pub mod mesh;
pub mod params;
pub mod physical;
pub mod renderer;
#[cfg(test)]
mod shading;
pub mod textures;
pub mod uniforms;
pub mod variant;

pub use body::{BodyError, LayerInstance, Lights, PlanetBody, RotationState};
pub use bridge::{ExternalValues, ReactivityBridge};
pub use catalog::{PlanetCatalogEntry, PlanetStats, catalog, find_entry};
pub use layer::{BlendMode, FaceCulling, LayerExtent, LayerKind, LayerSpec, ShaderId};
pub use mesh::{LayerVertex, SphereMesh, generate_uv_sphere};
pub use params::PlanetVisualParameters;
pub use physical::{PhysicalParameters, SLIDERS, SliderSpec};
pub use renderer::{PlanetRenderError, PlanetRenderer};
pub use textures::{DecodedTexture, TextureBarrier, TextureLoadError};
pub use uniforms::{AtmosphereUniforms, LayerUniform, LightUniform, SurfaceUniforms, UniformSet};
pub use variant::{DirectionalLight, LandMask, Palette, PlanetVariant, RimBlue};
