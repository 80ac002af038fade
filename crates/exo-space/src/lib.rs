//! Space backdrop: a flickering starfield shell around the planet.

pub mod renderer;
pub mod starfield;

pub use renderer::{StarInstance, StarfieldRenderer};
pub use starfield::{StarPoint, Starfield, StarfieldGenerator, hsl_to_rgb};
