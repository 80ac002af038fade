//! Render pass builder and per-frame command encoding.

use std::sync::Arc;

use crate::depth::DepthBuffer;

/// Background clear color behind the starfield.
pub const SPACE_BLACK: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Fluent configuration for the single scene pass.
#[derive(Debug)]
pub struct RenderPassBuilder {
    clear_color: wgpu::Color,
    depth_view: Option<wgpu::TextureView>,
    label: Option<&'static str>,
}

impl Default for RenderPassBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPassBuilder {
    pub fn new() -> Self {
        Self {
            clear_color: SPACE_BLACK,
            depth_view: None,
            label: None,
        }
    }

    pub fn clear_color(mut self, color: wgpu::Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Attach a reverse-Z depth buffer, cleared to the far plane.
    pub fn depth(mut self, view: wgpu::TextureView) -> Self {
        self.depth_view = Some(view);
        self
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    fn begin<'encoder>(
        &self,
        encoder: &'encoder mut wgpu::CommandEncoder,
        color_view: &'encoder wgpu::TextureView,
    ) -> wgpu::RenderPass<'encoder> {
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        };

        let depth_stencil_attachment =
            self.depth_view
                .as_ref()
                .map(|view| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: self.label,
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}

/// One frame's encoder and surface texture. [`FrameEncoder::submit`] consumes it.
pub struct FrameEncoder {
    encoder: wgpu::CommandEncoder,
    queue: Arc<wgpu::Queue>,
    surface_texture: wgpu::SurfaceTexture,
    surface_view: wgpu::TextureView,
}

impl FrameEncoder {
    pub fn new(
        device: &wgpu::Device,
        queue: Arc<wgpu::Queue>,
        surface_texture: wgpu::SurfaceTexture,
    ) -> Self {
        let encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame-encoder"),
        });
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            encoder,
            queue,
            surface_texture,
            surface_view,
        }
    }

    pub fn begin_render_pass<'a>(&'a mut self, builder: &'a RenderPassBuilder) -> wgpu::RenderPass<'a> {
        builder.begin(&mut self.encoder, &self.surface_view)
    }

    /// Submit the command buffer and present the surface texture.
    pub fn submit(self) {
        self.queue.submit([self.encoder.finish()]);
        self.surface_texture.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clear_color_is_black() {
        let builder = RenderPassBuilder::new();
        assert_eq!(builder.clear_color, SPACE_BLACK);
        assert_eq!(builder.clear_color.a, 1.0);
    }

    #[test]
    fn test_builder_sets_clear_color() {
        let builder = RenderPassBuilder::new().clear_color(wgpu::Color::RED);
        assert_eq!(builder.clear_color.r, 1.0);
        assert_eq!(builder.clear_color.g, 0.0);
    }

    #[test]
    fn test_depth_attachment_is_optional() {
        assert!(RenderPassBuilder::new().depth_view.is_none());
    }

    #[test]
    fn test_label_is_stored() {
        let builder = RenderPassBuilder::new().label("scene");
        assert_eq!(builder.label, Some("scene"));
    }
}
