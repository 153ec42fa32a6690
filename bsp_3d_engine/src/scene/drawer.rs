/// Drawing strategies.
///
/// A Drawer turns one scene object into commands on a command list.
/// The scene calls it once per visible object, in traversal order.

use std::ops::{Add, AddAssign};
use crate::camera::{Camera, FrustumConfig};
use crate::error::Result;
use crate::render::CommandList;
use super::lod::{LodLevel, LodSelector};
use super::scene_object::SceneObject;

/// Push constant offset of the MVP matrix
pub const MVP_OFFSET: u32 = 0;
/// Push constant offset of the model matrix
pub const MODEL_OFFSET: u32 = 64;

/// Per-object (or per-frame, summed) draw counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub draw_calls: usize,
    /// Parts drawn with their high-detail mesh
    pub high_detail: usize,
    /// Parts drawn with their low-detail mesh
    pub low_detail: usize,
    /// Parts skipped because they are past the far threshold
    pub lod_culled: usize,
}

impl Add for DrawStats {
    type Output = DrawStats;

    fn add(self, other: DrawStats) -> DrawStats {
        DrawStats {
            draw_calls: self.draw_calls + other.draw_calls,
            high_detail: self.high_detail + other.high_detail,
            low_detail: self.low_detail + other.low_detail,
            lod_culled: self.lod_culled + other.lod_culled,
        }
    }
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: DrawStats) {
        *self = *self + other;
    }
}

/// Strategy for drawing one object.
///
/// `&self` because drawing is stateless: the same Drawer can be
/// reused across scenes and frames.
pub trait Drawer: Send + Sync {
    /// Record the draw sequence of `object` into `cmd`.
    fn draw_object(
        &self,
        object: &SceneObject,
        camera: &Camera,
        lod: &LodSelector,
        frustum_config: &FrustumConfig,
        cmd: &mut dyn CommandList,
    ) -> Result<DrawStats>;
}

/// Forward drawer: one draw per part, LOD picked per part.
///
/// For each part: bind its textures, push MVP and model matrices,
/// draw the mesh the LOD selector picks for the camera-to-part distance.
pub struct ForwardDrawer;

impl ForwardDrawer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ForwardDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawer for ForwardDrawer {
    fn draw_object(
        &self,
        object: &SceneObject,
        camera: &Camera,
        lod: &LodSelector,
        frustum_config: &FrustumConfig,
        cmd: &mut dyn CommandList,
    ) -> Result<DrawStats> {
        let view_proj = camera.view_projection_matrix(frustum_config);
        let mut stats = DrawStats::default();

        for part in object.parts() {
            let model = object.part_world_matrix(part);
            let distance = camera.distance_to(model.w_axis.truncate());

            let level = match lod.level(distance) {
                Some(level) => level,
                None => {
                    stats.lod_culled += 1;
                    continue;
                }
            };

            for (unit, texture) in part.textures.iter().enumerate() {
                if let Some(texture) = texture {
                    cmd.bind_texture(unit as u32, *texture)?;
                }
            }

            let mvp = view_proj * model;
            cmd.push_constants(MVP_OFFSET, bytemuck::bytes_of(&mvp))?;
            cmd.push_constants(MODEL_OFFSET, bytemuck::bytes_of(&model))?;
            cmd.draw_mesh(part.mesh.mesh(level), part.draw_mode)?;

            stats.draw_calls += 1;
            match level {
                LodLevel::High => stats.high_detail += 1,
                LodLevel::Low => stats.low_detail += 1,
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "drawer_tests.rs"]
mod tests;
