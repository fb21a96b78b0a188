use glam::{Mat4, Vec2, Vec3};

use crate::picking::Ray;

/// Perspective camera shared by the editor and the picker.
///
/// The struct lives in core so that applications can inspect or modify it
/// directly; orbit/fly controllers are the host's business and only ever
/// write `eye`/`target` back into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // --- view parameters --------------------------------------------------
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    // --- projection parameters --------------------------------------------
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(10.0, 10.0, 20.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 75.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    /// Build the combined view-projection matrix from the current parameters.
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    /// Update aspect ratio when viewport dimensions change.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Casts a world-space ray through a point in normalised device
    /// coordinates.
    ///
    /// The near (`z = 0`) and far (`z = 1`) clip-space points are unprojected
    /// through the inverse view-projection; the ray starts on the near plane.
    /// Returns `None` when the camera is degenerate (eye == target, zero
    /// aspect, ...).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inv = self.build_view_projection_matrix().inverse();
        if !inv.is_finite() {
            return None;
        }
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        let dir = (far - near).normalize_or_zero();
        if dir == Vec3::ZERO || !near.is_finite() {
            return None;
        }
        Some(Ray::new(near, dir))
    }
}
