//! GPU side of a mounted planet body.
//!
//! All layers share one sphere mesh scaled by their model matrix. Each
//! layer owns a uniform buffer and bind group; pipelines are shared by
//! every layer with the same (shader, blend, depth write, culling).

use std::collections::HashMap;

use bytemuck::Zeroable;
use exo_render::{
    BufferAllocator, CameraUniform, DepthBuffer, GpuTexture, MeshBuffer, ShaderLibrary, TextureError,
};
use thiserror::Error;

use crate::body::PlanetBody;
use crate::layer::{BlendMode, FaceCulling, LayerSpec, ShaderId};
use crate::mesh::{LayerVertex, generate_uv_sphere};
use crate::textures::DecodedTexture;
use crate::uniforms::{LayerUniform, LightUniform};

#[derive(Debug, Error)]
pub enum PlanetRenderError {
    #[error("texture '{0}' was not loaded")]
    MissingTexture(&'static str),

    #[error("failed to upload texture '{path}': {source}")]
    Texture {
        path: &'static str,
        #[source]
        source: TextureError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    shader: ShaderId,
    blend: BlendMode,
    depth_write: bool,
    culling: FaceCulling,
}

impl PipelineKey {
    fn of(spec: &LayerSpec) -> Self {
        Self {
            shader: spec.shader,
            blend: spec.blend,
            depth_write: spec.depth_write,
            culling: spec.culling,
        }
    }
}

struct LayerDraw {
    pipeline: PipelineKey,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Source of each layer's texture: an index into the decoded set, or the
/// shared white texture for untextured layers.
fn resolve_textures(
    layers: &[LayerSpec],
    textures: &[DecodedTexture],
) -> Result<Vec<Option<usize>>, PlanetRenderError> {
    layers
        .iter()
        .map(|spec| match spec.texture {
            Some(path) => textures
                .iter()
                .position(|t| t.path == path)
                .map(Some)
                .ok_or(PlanetRenderError::MissingTexture(path)),
            None => Ok(None),
        })
        .collect()
}

pub fn blend_state(mode: BlendMode) -> wgpu::BlendState {
    match mode {
        BlendMode::Normal => wgpu::BlendState::ALPHA_BLENDING,
        BlendMode::Additive => {
            let additive = wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            };
            wgpu::BlendState {
                color: additive,
                alpha: additive,
            }
        }
    }
}

pub struct PlanetRenderer {
    mesh: MeshBuffer,
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    layers: Vec<LayerDraw>,
}

impl PlanetRenderer {
    /// Upload the body's textures and build one draw per layer.
    ///
    /// Fails without touching the GPU if any layer's texture is absent
    /// from `textures`.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        shaders: &mut ShaderLibrary,
        body: &PlanetBody,
        textures: &[DecodedTexture],
        sphere_segments: u32,
    ) -> Result<Self, PlanetRenderError> {
        let specs: Vec<LayerSpec> = body.layers().iter().map(|l| l.spec.clone()).collect();
        let sources = resolve_textures(&specs, textures)?;

        let mut uploaded = Vec::with_capacity(textures.len());
        for decoded in textures {
            let texture = GpuTexture::from_rgba8(
                device,
                queue,
                decoded.path,
                decoded.width,
                decoded.height,
                &decoded.pixels,
            )
            .map_err(|source| PlanetRenderError::Texture {
                path: decoded.path,
                source,
            })?;
            uploaded.push(texture);
        }
        let white = GpuTexture::white(device, queue);

        let frame_layout = frame_layout(device);
        let layer_layout = layer_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("planet-pipeline-layout"),
            bind_group_layouts: &[&frame_layout, &layer_layout],
            immediate_size: 0,
        });

        let allocator = BufferAllocator::new(device);
        let camera_buffer =
            allocator.create_uniform_buffer("planet-camera-uniform", &CameraUniform::zeroed());
        let light_buffer = allocator.create_uniform_buffer(
            "planet-light-uniform",
            &LightUniform::new(body.lights(), body.parameters().brightness),
        );
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planet-frame-bind-group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });

        let sphere = generate_uv_sphere(sphere_segments, sphere_segments);
        let mesh = allocator.create_mesh("planet-sphere", &sphere.vertices(), &sphere.indices);

        let palette = &body.variant().palette;
        let brightness = body.parameters().brightness;
        let mut pipelines = HashMap::new();
        let mut layers = Vec::with_capacity(specs.len());
        for (instance, source) in body.layers().iter().zip(sources) {
            let key = PipelineKey::of(&instance.spec);
            if !pipelines.contains_key(&key) {
                let module = shaders.get_or_compile(device, key.shader.id(), key.shader.source());
                pipelines.insert(
                    key,
                    create_pipeline(device, &pipeline_layout, &module, surface_format, key),
                );
            }

            let uniform = LayerUniform::pack(
                body.model_matrix(instance),
                instance.spec.shader,
                instance.uniforms(),
                palette,
                brightness,
            );
            let uniform_buffer = allocator
                .create_uniform_buffer(&format!("planet-{:?}-uniform", instance.spec.kind), &uniform);
            let texture = source.map_or(&white, |index| &uploaded[index]);
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("planet-layer-bind-group"),
                layout: &layer_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });

            layers.push(LayerDraw {
                pipeline: key,
                uniform_buffer,
                bind_group,
            });
        }

        tracing::info!(
            planet = body.name(),
            layers = layers.len(),
            pipelines = pipelines.len(),
            "Planet renderer ready"
        );

        Ok(Self {
            mesh,
            camera_buffer,
            light_buffer,
            frame_bind_group,
            pipelines,
            layers,
        })
    }

    /// Upload this frame's camera, lights and per-layer uniforms.
    pub fn update(&self, queue: &wgpu::Queue, camera: &CameraUniform, body: &PlanetBody) {
        let brightness = body.parameters().brightness;
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::bytes_of(&LightUniform::new(body.lights(), brightness)),
        );

        let palette = &body.variant().palette;
        for (draw, instance) in self.layers.iter().zip(body.layers()) {
            let uniform = LayerUniform::pack(
                body.model_matrix(instance),
                instance.spec.shader,
                instance.uniforms(),
                palette,
                brightness,
            );
            queue.write_buffer(&draw.uniform_buffer, 0, bytemuck::bytes_of(&uniform));
        }
    }

    /// Draw every layer innermost first.
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        self.mesh.bind(render_pass);
        for draw in &self.layers {
            let Some(pipeline) = self.pipelines.get(&draw.pipeline) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, &draw.bind_group, &[]);
            self.mesh.draw(render_pass);
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }
}

/// Group 0: camera and lights.
pub(crate) fn frame_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("planet-frame-bind-group-layout"),
        entries: &[uniform_entry(0), uniform_entry(1)],
    })
}

/// Group 1: layer uniform, texture, sampler.
pub(crate) fn layer_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("planet-layer-bind-group-layout"),
        entries: &[
            uniform_entry(0),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    module: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    key: PipelineKey,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(key.shader.id()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module,
            entry_point: Some("vs_main"),
            buffers: &[LayerVertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(key.culling.to_wgpu()),
            ..Default::default()
        },
        depth_stencil: Some(DepthBuffer::stencil_state(key.depth_write)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(blend_state(key.blend)),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}
