//! Reference math for the layer shaders in `shaders/*.wgsl`.
//!
//! Test-only. The fragment checks below render through the real WGSL and
//! compare the pixel against these functions.

use glam::{Vec3, Vec4};

use crate::uniforms::{AtmosphereUniforms, SurfaceUniforms};
use crate::variant::{LandMask, Palette, RimBlue};

/// Exponent of the surface rim term.
pub const SURFACE_RIM_EXPONENT: f32 = 1.5;
/// Exponent of the atmosphere falloff.
pub const ATMOSPHERE_RIM_EXPONENT: f32 = 2.0;

/// `max(bias - dot(normal, axis), 0) ^ exponent`.
///
/// Grows toward the limb where the view-space normal turns away from `axis`.
pub fn rim_intensity(normal: Vec3, axis: Vec3, bias: f32, exponent: f32) -> f32 {
    (bias - normal.dot(axis)).max(0.0).powf(exponent)
}

pub fn is_land(texel: Vec3, mask: &LandMask) -> bool {
    (texel - mask.ocean_color).length() > mask.threshold
}

/// Unlit color of a surface-family fragment, before brightness.
pub fn surface_color(
    texel: Vec4,
    view_normal: Vec3,
    uniforms: &SurfaceUniforms,
    palette: &Palette,
) -> Vec4 {
    let rim_blue = match palette.rim_blue {
        RimBlue::Constant => 1.0,
        RimBlue::Temperature => uniforms.temperature,
    };
    let intensity = rim_intensity(
        view_normal,
        palette.surface_view_axis,
        palette.surface_rim_bias,
        SURFACE_RIM_EXPONENT,
    );
    let rim = Vec3::new(uniforms.scale, uniforms.vegetation, rim_blue) * intensity;

    let mut color = texel.truncate() * palette.texture_gain;
    if let Some(mask) = &palette.land_mask
        && is_land(texel.truncate(), mask)
    {
        let tinted = color + Vec3::new(0.0, uniforms.vegetation * 0.5, 0.0);
        color = color.lerp(tinted, uniforms.vegetation);
    }
    color += rim + uniforms.temperature * palette.temperature_tint;

    color.extend(texel.w * uniforms.opacity)
}

/// Pre-blend RGBA of an atmosphere fragment, before brightness.
pub fn atmosphere_color(view_normal: Vec3, uniforms: &AtmosphereUniforms, palette: &Palette) -> Vec4 {
    let intensity = rim_intensity(
        view_normal,
        palette.atmosphere_view_axis,
        palette.atmosphere_rim_bias,
        ATMOSPHERE_RIM_EXPONENT,
    );
    let hue = palette
        .atmosphere_cool
        .lerp(palette.atmosphere_warm, uniforms.temperature);
    let strength = palette.atmosphere_base + palette.atmosphere_sun_gain * uniforms.sun_proximity;
    hue.extend(1.0) * intensity * strength
}

/// Blend toward the lit color by `light_response`, then apply brightness.
pub fn apply_lighting(
    color: Vec3,
    world_normal: Vec3,
    to_light: Vec3,
    light_intensity: f32,
    ambient: f32,
    light_response: f32,
    brightness: f32,
) -> Vec3 {
    let diffuse = world_normal.dot(to_light).max(0.0) * light_intensity;
    let lit = color * (ambient + diffuse);
    color.lerp(lit, light_response) * brightness
}

mod tests {
    use super::*;
    use exo_render::{BufferAllocator, CameraUniform, GpuTexture};
    use glam::Mat4;

    use crate::layer::{LayerKind, ShaderId};
    use crate::mesh::LayerVertex;
    use crate::params::PlanetVisualParameters;
    use crate::renderer::tests::create_test_device;
    use crate::renderer::{frame_layout, layer_layout};
    use crate::uniforms::{LayerUniform, LightUniform, UniformSet};
    use crate::variant::Lights;

    fn surface(scale: f32, vegetation: f32, temperature: f32, opacity: f32) -> SurfaceUniforms {
        SurfaceUniforms {
            scale,
            vegetation,
            temperature,
            opacity,
        }
    }

    #[test]
    fn test_rim_is_weak_facing_and_strong_at_limb() {
        let facing = rim_intensity(Vec3::Z, Vec3::Z, 1.05, 1.5);
        let limb = rim_intensity(Vec3::X, Vec3::Z, 1.05, 1.5);
        assert!(facing < 0.02);
        assert!((limb - 1.05_f32.powf(1.5)).abs() < 1e-5);
    }

    #[test]
    fn test_rim_never_negative_base() {
        // bias 0.7 is below dot == 1 for a facing normal; clamps to zero.
        assert_eq!(rim_intensity(Vec3::Z, Vec3::Z, 0.7, 2.0), 0.0);
    }

    #[test]
    fn test_surface_color_default_palette() {
        let palette = Palette::default();
        let texel = Vec4::new(0.5, 0.25, 0.0, 1.0);
        let u = surface(0.0, 0.0, 1.0, 0.5);
        let c = surface_color(texel, Vec3::X, &u, &palette);
        let rim = 1.05_f32.powf(1.5);
        assert!((c.x - (0.6 + 0.3)).abs() < 1e-5);
        assert!((c.y - (0.3 + 0.1)).abs() < 1e-5);
        assert!((c.z - (rim + 0.1)).abs() < 1e-5);
        assert_eq!(c.w, 0.5);
    }

    #[test]
    fn test_zero_opacity_is_transparent() {
        let c = surface_color(Vec4::ONE, Vec3::Z, &surface(1.0, 1.0, 1.0, 0.0), &Palette::default());
        assert_eq!(c.w, 0.0);
    }

    #[test]
    fn test_land_texels_get_green_tint() {
        let palette = Palette::vegetation_tinted();
        let u = surface(0.0, 0.4, 0.0, 1.0);
        let axis = palette.surface_view_axis;
        // Normal aligned with the axis keeps the rim small and identical for both texels.
        let n = axis.normalize();
        let land = Vec4::new(0.6, 0.4, 0.2, 1.0);
        let ocean = palette.land_mask.unwrap().ocean_color.extend(1.0);
        let land_c = surface_color(land, n, &u, &palette);
        let ocean_c = surface_color(ocean, n, &u, &palette);
        let rim_g = 0.4 * rim_intensity(n, axis, 1.05, 1.5);
        assert!((land_c.y - (0.4 + 0.4 * 0.2 + rim_g)).abs() < 1e-5);
        assert!((ocean_c.y - (0.502 + rim_g)).abs() < 1e-5);
        assert!(is_land(land.truncate(), palette.land_mask.as_ref().unwrap()));
    }

    #[test]
    fn test_atmosphere_hue_and_strength() {
        let palette = Palette::default();
        let cold = atmosphere_color(
            Vec3::X,
            &AtmosphereUniforms {
                temperature: 0.0,
                sun_proximity: 0.0,
            },
            &palette,
        );
        // intensity 0.49, strength (0 + 0.5) * 2 = 1
        assert!((cold.x - 0.3 * 0.49).abs() < 1e-5);
        assert!((cold.z - 0.49).abs() < 1e-5);
        assert!((cold.w - 0.49).abs() < 1e-5);

        let hot = atmosphere_color(
            Vec3::X,
            &AtmosphereUniforms {
                temperature: 1.0,
                sun_proximity: 1.0,
            },
            &palette,
        );
        assert!((hot.x - 0.7 * 0.49 * 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_lighting_response_zero_keeps_color() {
        let c = Vec3::new(0.2, 0.4, 0.6);
        let out = apply_lighting(c, Vec3::Y, Vec3::Z, 1.5, 0.2, 0.0, 1.0);
        assert_eq!(out, c);
        let dim = apply_lighting(c, Vec3::Y, Vec3::Z, 1.5, 0.2, 0.0, 0.5);
        assert!((dim - c * 0.5).length() < 1e-6);
    }

    #[test]
    fn test_full_lighting_response_uses_diffuse() {
        let c = Vec3::ONE;
        let out = apply_lighting(c, Vec3::Z, Vec3::Z, 1.5, 0.2, 1.0, 1.0);
        assert!((out - Vec3::splat(1.7)).length() < 1e-5);
    }

    fn parse(shader: ShaderId) -> naga::Module {
        let module = naga::front::wgsl::parse_str(shader.source()).unwrap();
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap();
        module
    }

    fn struct_span(module: &naga::Module, name: &str) -> Option<u32> {
        module.types.iter().find_map(|(_, ty)| match &ty.inner {
            naga::TypeInner::Struct { span, .. } if ty.name.as_deref() == Some(name) => Some(*span),
            _ => None,
        })
    }

    #[test]
    fn test_layer_shaders_validate_against_uniform_layout() {
        for shader in [ShaderId::Surface, ShaderId::Atmosphere] {
            let module = parse(shader);
            let stages: Vec<(&str, naga::ShaderStage)> = module
                .entry_points
                .iter()
                .map(|ep| (ep.name.as_str(), ep.stage))
                .collect();
            assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)), "{shader:?}");
            assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)), "{shader:?}");
            assert_eq!(
                struct_span(&module, "Layer"),
                Some(std::mem::size_of::<LayerUniform>() as u32),
                "{shader:?}"
            );
            assert_eq!(
                struct_span(&module, "Camera"),
                Some(std::mem::size_of::<CameraUniform>() as u32),
                "{shader:?}"
            );
        }
        let surface = parse(ShaderId::Surface);
        assert_eq!(
            struct_span(&surface, "Light"),
            Some(std::mem::size_of::<LightUniform>() as u32)
        );
    }

    const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;

    /// One fragment's inputs: a constant normal and a 1x1 texture.
    struct Fragment {
        shader: ShaderId,
        uniform: LayerUniform,
        light: LightUniform,
        texel: [u8; 4],
        normal: Vec3,
    }

    /// Draw a triangle covering a 1x1 float target through the layer
    /// shader, with identity transforms, and read the pixel back.
    fn render_fragment(device: &wgpu::Device, queue: &wgpu::Queue, fragment: &Fragment) -> Vec4 {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(fragment.shader.id()),
            source: wgpu::ShaderSource::Wgsl(fragment.shader.source().into()),
        });
        let frame_layout = frame_layout(device);
        let layer_layout = layer_layout(device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fragment-check-layout"),
            bind_group_layouts: &[&frame_layout, &layer_layout],
            immediate_size: 0,
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fragment-check-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[LayerVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: TARGET_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        let allocator = BufferAllocator::new(device);
        let camera = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0, 0.0, 0.0, 1.0],
        };
        let camera_buffer = allocator.create_uniform_buffer("check-camera", &camera);
        let light_buffer = allocator.create_uniform_buffer("check-light", &fragment.light);
        let layer_buffer = allocator.create_uniform_buffer("check-layer", &fragment.uniform);
        let texture = GpuTexture::from_rgba8(device, queue, "check-texel", 1, 1, &fragment.texel).unwrap();

        let corners: [[f32; 2]; 3] = [[-1.0, -1.0], [3.0, -1.0], [-1.0, 3.0]];
        let vertices: Vec<LayerVertex> = corners
            .iter()
            .map(|&[x, y]| LayerVertex {
                position: [x, y, 0.5],
                normal: fragment.normal.to_array(),
                uv: [0.5, 0.5],
            })
            .collect();
        let vertex_buffer = allocator.create_vertex_buffer("check-vertices", &vertices);

        let frame_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("check-frame-bind-group"),
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
        let layer_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("check-layer-bind-group"),
            layout: &layer_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: layer_buffer.as_entire_binding(),
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

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("check-target"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
        let padded = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("check-readback"),
            size: u64::from(padded),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("check-encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("check-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            pass.set_pipeline(&pipeline);
            pass.set_bind_group(0, &frame_group, &[]);
            pass.set_bind_group(1, &layer_group, &[]);
            pass.set_vertex_buffer(0, vertex_buffer.slice(..));
            pass.draw(0..3, 0..1);
        }
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(1),
                },
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .unwrap();
        rx.recv().unwrap().unwrap();
        let pixel: [f32; 4] = bytemuck::pod_read_unaligned(&slice.get_mapped_range()[..16]);
        Vec4::from_array(pixel)
    }

    fn assert_close(actual: Vec4, expected: Vec4, what: &str) {
        assert!(
            (actual - expected).abs().max_element() < 2e-3,
            "{what}: shader {actual} vs reference {expected}"
        );
    }

    #[test]
    fn test_surface_shader_matches_reference() {
        let Some((device, queue)) = create_test_device() else {
            eprintln!("Skipping: no GPU adapter available");
            return;
        };
        let palette = Palette {
            light_response: 0.6,
            ..Palette::vegetation_tinted()
        };
        let brightness = 0.5;
        let light = LightUniform::new(&Lights::default(), brightness);
        let params = PlanetVisualParameters::new(0.7, 0.4, 0.6, 0.3);
        // 0.6, 0.4, 0.2: far enough from the ocean color to count as land.
        let texel = [153, 102, 51, 255];
        let normal = Vec3::new(0.6, 0.0, 0.8);

        for kind in [LayerKind::Surface, LayerKind::Vegetation] {
            let set = UniformSet::wired(kind, &params);
            let uniform =
                LayerUniform::pack(Mat4::IDENTITY, ShaderId::Surface, &set, &palette, brightness);
            let actual = render_fragment(
                &device,
                &queue,
                &Fragment {
                    shader: ShaderId::Surface,
                    uniform,
                    light,
                    texel,
                    normal,
                },
            );

            let unlit = surface_color(
                Vec4::new(0.6, 0.4, 0.2, 1.0),
                normal,
                set.as_surface().unwrap(),
                &palette,
            );
            let rgb = apply_lighting(
                unlit.truncate(),
                normal,
                Vec3::from_slice(&light.direction[..3]),
                light.direction[3],
                light.ambient[0],
                palette.light_response,
                brightness,
            );
            assert_close(actual, rgb.extend(unlit.w), &format!("{kind:?}"));
        }
    }

    #[test]
    fn test_atmosphere_shader_matches_reference() {
        let Some((device, queue)) = create_test_device() else {
            eprintln!("Skipping: no GPU adapter available");
            return;
        };
        let palette = Palette::default();
        let brightness = 0.5;
        let params = PlanetVisualParameters::new(0.7, 0.4, 0.0, 1.0);
        let set = UniformSet::wired(LayerKind::Atmosphere, &params);
        let uniform =
            LayerUniform::pack(Mat4::IDENTITY, ShaderId::Atmosphere, &set, &palette, brightness);

        // Limb normal glows; a facing normal sits below the rim bias and must clamp to zero.
        for normal in [Vec3::X, Vec3::Z] {
            let actual = render_fragment(
                &device,
                &queue,
                &Fragment {
                    shader: ShaderId::Atmosphere,
                    uniform,
                    light: LightUniform::new(&Lights::default(), brightness),
                    texel: [255; 4],
                    normal,
                },
            );
            let glow = atmosphere_color(normal, set.as_atmosphere().unwrap(), &palette);
            let expected = (glow.truncate() * brightness).extend(glow.w);
            assert_close(actual, expected, &format!("normal {normal}"));
        }
    }
}
