//! Starfield drawing: one camera-facing quad per star, instanced.

use bytemuck::{Pod, Zeroable};
use exo_render::{BufferAllocator, CameraUniform, DepthBuffer};

use crate::starfield::Starfield;

/// World-space edge length of a star quad.
pub const STAR_SIZE: f32 = 0.2;
pub const STAR_OPACITY: f32 = 0.8;

/// Per-star instance data.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

impl StarInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<StarInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x4,
                offset: 16,
                shader_location: 1,
            },
        ],
    };
}

pub const STAR_SHADER_SOURCE: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
    position: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: Camera;

struct InstanceInput {
    @location(0) position_size: vec4<f32>,
    @location(1) color_opacity: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_star(@builtin(vertex_index) index: u32, star: InstanceInput) -> VertexOutput {
    // Triangle strip corners in [-0.5, 0.5].
    let corner = vec2<f32>(f32(index & 1u), f32(index >> 1u)) - vec2<f32>(0.5);
    let right = vec3<f32>(camera.view[0].x, camera.view[1].x, camera.view[2].x);
    let up = vec3<f32>(camera.view[0].y, camera.view[1].y, camera.view[2].y);
    let size = star.position_size.w;
    let world = star.position_size.xyz + (right * corner.x + up * corner.y) * size;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world, 1.0);
    out.color = star.color_opacity;
    return out;
}

@fragment
fn fs_star(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

pub struct StarfieldRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
}

impl StarfieldRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        starfield: &Starfield,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield-shader"),
            source: wgpu::ShaderSource::Wgsl(STAR_SHADER_SOURCE.into()),
        });

        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("starfield-camera-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<CameraUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("starfield-pipeline-layout"),
            bind_group_layouts: &[&camera_bgl],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("starfield-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_star"),
                buffers: &[StarInstance::LAYOUT],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthBuffer::stencil_state(false)),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_star"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let allocator = BufferAllocator::new(device);
        let camera_buffer =
            allocator.create_uniform_buffer("starfield-camera", &CameraUniform::zeroed());
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("starfield-camera-bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let instances = instances(starfield);
        let instance_buffer = allocator.create_vertex_buffer("starfield-instances", &instances);

        log::info!("Starfield renderer initialized with {} stars", starfield.len());

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            instance_buffer,
            instance_count: starfield.len() as u32,
        }
    }

    /// Upload the camera and the stars' current (flickered) colors.
    pub fn update(&self, queue: &wgpu::Queue, camera: &CameraUniform, starfield: &Starfield) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(camera));
        if self.instance_count > 0 {
            queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instances(starfield)),
            );
        }
    }

    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.camera_bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..4, 0..self.instance_count);
    }
}

/// Instance data for every star. An empty field still yields one zero-size
/// instance so the buffer is never empty.
pub fn instances(starfield: &Starfield) -> Vec<StarInstance> {
    if starfield.is_empty() {
        return vec![StarInstance::zeroed()];
    }
    starfield
        .stars()
        .iter()
        .map(|star| StarInstance {
            position: star.position.to_array(),
            size: STAR_SIZE,
            color: star.color,
            opacity: STAR_OPACITY,
        })
        .collect()
}
