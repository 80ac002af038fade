//! UV sphere generation for layer shells.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Unit-sphere mesh; layers scale it to their radius in the model matrix.
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    /// Normals equal positions on a unit sphere.
    pub normals: Vec<Vec3>,
    /// Equirectangular UVs; v = 0 at the north pole (top image row).
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Generate a latitude/longitude sphere.
///
/// `width_segments` around the equator (min 3), `height_segments` pole to
/// pole (min 2). The seam column is duplicated so UVs wrap cleanly; the pole
/// rows emit one triangle per segment instead of a degenerate quad.
pub fn generate_uv_sphere(width_segments: u32, height_segments: u32) -> SphereMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let row = w + 1;

    let vertex_count = (row * (h + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        let (sin_theta, cos_theta) = (v * std::f32::consts::PI).sin_cos();
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let (sin_phi, cos_phi) = (u * std::f32::consts::TAU).sin_cos();
            positions.push(Vec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta));
            uvs.push([u, v]);
        }
    }

    let mut indices = Vec::with_capacity((w * (h - 1) * 6) as usize);
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    SphereMesh {
        normals: positions.iter().map(|p| p.normalize_or_zero()).collect(),
        positions,
        uvs,
        indices,
    }
}

/// Vertex layout shared by both layer shaders: position, normal, uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LayerVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl LayerVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LayerVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

impl SphereMesh {
    pub fn vertices(&self) -> Vec<LayerVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| LayerVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: *uv,
            })
            .collect()
    }
}
