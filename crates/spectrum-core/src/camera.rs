//! Perspective camera with a free position and yaw/pitch orientation.
//!
//! The camera keeps its view, projection and combined view-projection
//! matrices up to date on every mutation so the renderer can read them without
//! recomputation. Angles are stored in degrees.

use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    position: Vec3,
    yaw_degrees: f32,
    pitch_degrees: f32,
    fovy_radians: f32,
    aspect: f32,
    znear: f32,
    zfar: f32,
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            pitch_degrees: 0.0,
            fovy_radians: fov_degrees.to_radians(),
            aspect: sanitize_aspect(aspect),
            znear,
            zfar,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera.update_view_matrix();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn pitch(&self) -> f32 {
        self.pitch_degrees
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    pub fn set_yaw(&mut self, yaw_degrees: f32) {
        self.yaw_degrees = yaw_degrees;
        self.update_view_matrix();
    }

    pub fn set_pitch(&mut self, pitch_degrees: f32) {
        self.pitch_degrees = pitch_degrees;
        self.update_view_matrix();
    }

    /// Update the projection for a new surface aspect ratio.
    ///
    /// Non-finite or non-positive ratios (zero-sized canvas) are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            return;
        }
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// World to view space transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// View to clip space transform (right-handed, depth in [0, 1]).
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Combined world to clip space transform.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.view_projection
    }

    /// Unit direction the camera looks along, in world space.
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw_degrees.to_radians();
        let pitch = self.pitch_degrees.to_radians();
        Vec3::new(
            -yaw.sin() * pitch.cos(),
            pitch.sin(),
            -yaw.cos() * pitch.cos(),
        )
    }

    /// Unit direction to the camera's right, always horizontal.
    pub fn right(&self) -> Vec3 {
        let yaw = self.yaw_degrees.to_radians();
        Vec3::new(yaw.cos(), 0.0, -yaw.sin())
    }

    fn update_view_matrix(&mut self) {
        // The world moves opposite to the camera: translate first, then yaw, then pitch.
        let translation = Mat4::from_translation(-self.position);
        let yaw = Mat4::from_rotation_y((-self.yaw_degrees).to_radians());
        let pitch = Mat4::from_rotation_x((-self.pitch_degrees).to_radians());
        self.view = pitch * yaw * translation;
        self.update_view_projection_matrix();
    }

    fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
        self.update_view_projection_matrix();
    }

    fn update_view_projection_matrix(&mut self) {
        self.view_projection = self.projection * self.view;
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
