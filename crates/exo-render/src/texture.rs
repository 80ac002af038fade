//! Sampled 2D textures uploaded from decoded RGBA8 pixels.

use wgpu::util::DeviceExt;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error(
        "texture data size ({actual}) does not match expected ({expected}) for {width}x{height}"
    )]
    DataSizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },

    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },
}

/// A texture, its default view, and a linear sampler.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Upload tightly packed RGBA8 pixels.
    ///
    /// The format is `Rgba8Unorm`: texel values reach the shader exactly as
    /// stored in the image file.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self, TextureError> {
        validate_rgba8(width, height, pixels.len())?;
        Ok(Self::upload(device, queue, label, width, height, pixels))
    }

    /// 1x1 opaque white, bound where a layer samples no image.
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::upload(device, queue, "white-texture", 1, 1, &[255u8; 4])
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}

fn validate_rgba8(width: u32, height: u32, len: usize) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroDimensions { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if len != expected {
        return Err(TextureError::DataSizeMismatch {
            actual: len,
            expected,
            width,
            height,
        });
    }
    Ok(())
}
