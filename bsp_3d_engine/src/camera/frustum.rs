/// Frustum: coarse point-in-view-volume test.
///
/// Six reference points are derived from the camera basis:
/// the near-plane center offset up/down/right/left by the near-plane
/// half extents, the near-plane center itself, and the far-plane center.
/// A point P is visible iff `dot(P - eye, R - eye) >= 0` for every
/// reference point R.
///
/// This is a half-space heuristic, not plane clipping: it admits false
/// positives near oblique edges. Spatial structures only use it to drop
/// objects that are clearly outside the view.

use glam::Vec3;
use crate::error::{Error, Result};
use super::camera::Camera;

/// Reference point indices
pub const POINT_TOP: usize = 0;
pub const POINT_BOTTOM: usize = 1;
pub const POINT_RIGHT: usize = 2;
pub const POINT_LEFT: usize = 3;
pub const POINT_NEAR: usize = 4;
pub const POINT_FAR: usize = 5;

/// View-volume parameters that are not part of the camera itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumConfig {
    /// Near distance along the view direction
    pub near: f32,
    /// Far distance along the view direction
    pub far: f32,
    /// Horizontal / vertical extent ratio of the near plane
    pub aspect_ratio: f32,
}

impl Default for FrustumConfig {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl FrustumConfig {
    /// Check `0 < near < far` and `aspect_ratio > 0` (all finite).
    pub fn validate(&self) -> Result<()> {
        if !(self.near.is_finite() && self.far.is_finite() && self.aspect_ratio.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "frustum values must be finite (near={}, far={}, aspect={})",
                self.near, self.far, self.aspect_ratio
            )));
        }
        if self.near <= 0.0 {
            return Err(Error::InvalidConfig(format!("frustum near must be > 0, got {}", self.near)));
        }
        if self.far <= self.near {
            return Err(Error::InvalidConfig(format!(
                "frustum far ({}) must be greater than near ({})",
                self.far, self.near
            )));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "frustum aspect ratio must be > 0, got {}",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Precomputed reference points for one camera state.
///
/// Built once per query so the per-object test is six dot products.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Eye position the reference directions are relative to
    pub origin: Vec3,
    /// Reference points: top, bottom, right, left, near center, far center
    pub points: [Vec3; 6],
}

impl Frustum {
    /// Derive the six reference points from a camera.
    pub fn from_camera(camera: &Camera, config: &FrustumConfig) -> Self {
        let origin = camera.position();
        let forward = camera.forward();

        let right = forward.cross(camera.up()).normalize();
        let up = right.cross(forward).normalize();

        let half_v = config.near * (camera.fov() / 2.0).tan();
        let half_h = half_v * config.aspect_ratio;

        let near_center = origin + forward * config.near;
        let far_center = origin + forward * config.far;

        let mut points = [Vec3::ZERO; 6];
        points[POINT_TOP] = near_center + up * half_v;
        points[POINT_BOTTOM] = near_center - up * half_v;
        points[POINT_RIGHT] = near_center + right * half_h;
        points[POINT_LEFT] = near_center - right * half_h;
        points[POINT_NEAR] = near_center;
        points[POINT_FAR] = far_center;

        Self { origin, points }
    }

    /// Half-space test against all six reference points.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let to_point = point - self.origin;
        self.points
            .iter()
            .all(|reference| to_point.dot(*reference - self.origin) >= 0.0)
    }

    /// One-shot test: build the reference points and test a single point.
    pub fn is_point_visible(point: Vec3, camera: &Camera, config: &FrustumConfig) -> bool {
        Self::from_camera(camera, config).contains_point(point)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
