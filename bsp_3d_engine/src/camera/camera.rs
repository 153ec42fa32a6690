/// Camera: passive data container read by the visibility pipeline.
///
/// Holds position, forward/up basis and vertical field of view.
/// Input handling (keyboard, mouse) is the caller's business; the
/// engine only reads the camera, once per frame.

use glam::{Mat4, Vec3};
use super::frustum::FrustumConfig;

/// Default yaw in degrees (looking down -Z)
const DEFAULT_YAW: f32 = -90.0;
/// Default pitch in degrees (slightly tilted down)
const DEFAULT_PITCH: f32 = -8.0;
/// Default vertical field of view in degrees
const DEFAULT_FOV_DEGREES: f32 = 75.0;

/// Free-flying camera state.
///
/// `forward` and `up` are expected to be normalized and non-parallel.
/// They are not validated: a degenerate camera yields an empty or
/// partially-correct visible list, never a panic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    up: Vec3,
    /// Vertical field of view in radians
    fov: f32,
}

impl Camera {
    /// Create a camera from an explicit basis.
    ///
    /// # Arguments
    ///
    /// * `position` - World-space eye position
    /// * `forward` - Normalized view direction
    /// * `up` - Normalized up vector (not parallel to `forward`)
    /// * `fov` - Vertical field of view in radians
    pub fn new(position: Vec3, forward: Vec3, up: Vec3, fov: f32) -> Self {
        Self { position, forward, up, fov }
    }

    /// Create a camera from Euler angles (degrees), fly-camera style.
    ///
    /// `forward = (cos(yaw)·cos(pitch), sin(pitch), sin(yaw)·cos(pitch))`,
    /// `right = forward × world_up`, `up = right × forward`.
    pub fn from_euler(position: Vec3, yaw_degrees: f32, pitch_degrees: f32, world_up: Vec3, fov: f32) -> Self {
        let (yaw, pitch) = (yaw_degrees.to_radians(), pitch_degrees.to_radians());
        let forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        ).normalize();
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward).normalize();
        Self { position, forward, up, fov }
    }

    // ===== GETTERS =====

    /// World-space eye position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// View direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Up vector.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vertical field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Euclidean distance from the eye to `point`.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }

    /// `true` iff `point` projects positively onto the view direction.
    pub fn is_in_front(&self, point: Vec3) -> bool {
        (point - self.position).dot(self.forward) > 0.0
    }

    /// View matrix (right-handed look-at along `forward`).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Perspective projection using the frustum configuration's near/far/aspect.
    pub fn projection_matrix(&self, config: &FrustumConfig) -> Mat4 {
        Mat4::perspective_rh(self.fov, config.aspect_ratio, config.near, config.far)
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self, config: &FrustumConfig) -> Mat4 {
        self.projection_matrix(config) * self.view_matrix()
    }

    // ===== SETTERS =====

    /// Set the eye position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Set the view direction.
    pub fn set_forward(&mut self, forward: Vec3) {
        self.forward = forward;
    }

    /// Set the up vector.
    pub fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }

    /// Set the vertical field of view (radians).
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }
}

impl Default for Camera {
    /// Camera at the origin, yaw -90°, pitch -8°, 75° field of view.
    fn default() -> Self {
        Self::from_euler(
            Vec3::ZERO,
            DEFAULT_YAW,
            DEFAULT_PITCH,
            Vec3::Y,
            DEFAULT_FOV_DEGREES.to_radians(),
        )
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
