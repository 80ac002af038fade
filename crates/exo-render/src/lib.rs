//! wgpu plumbing shared by the planet and starfield renderers: device and
//! surface setup, depth target, frame encoding, shader registry, orbit camera.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod shader;
pub mod texture;

pub use buffer::{BufferAllocator, MeshBuffer};
pub use camera::{CameraUniform, OrbitCamera};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use shader::{ShaderError, ShaderLibrary};
pub use texture::{GpuTexture, TextureError};
