//! Orbit camera: circles a target point, drag to rotate, wheel to zoom.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera data shared by every scene pipeline (group 0, binding 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// World-to-view transform; shaders use it for view-space normals.
    pub view: [[f32; 4]; 4],
    /// Camera world position (w unused).
    pub position: [f32; 4],
}

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLAR_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around +Y in radians; 0 puts the camera on +Z.
    pub azimuth: f32,
    /// Angle from +Y in radians; `PI / 2` is the equator.
    pub polar: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Camera on the +Z axis at `distance`, looking at the origin.
    pub fn new(distance: f32, fov_degrees: f32, aspect_ratio: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance,
            azimuth: 0.0,
            polar: std::f32::consts::FRAC_PI_2,
            fov_y: fov_degrees.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
            min_distance: 6.5,
            max_distance: 60.0,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Reverse-Z perspective: near maps to 1, far maps to 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Rotate by the given angle deltas in radians.
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        self.azimuth += delta_azimuth;
        self.polar = (self.polar + delta_polar).clamp(
            POLAR_EPSILON,
            std::f32::consts::PI - POLAR_EPSILON,
        );
    }

    /// Positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * 0.95_f32.powf(steps))
            .clamp(self.min_distance, self.max_distance);
    }

    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn to_uniform(&self) -> CameraUniform {
        let position = self.position();
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            view: self.view_matrix().to_cols_array_2d(),
            position: [position.x, position.y, position.z, 1.0],
        }
    }
}
