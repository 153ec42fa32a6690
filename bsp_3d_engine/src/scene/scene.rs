/// Scene: owns the objects, the partition and the per-frame loop.
///
/// Objects live in a SlotMap keyed by `SceneObjectKey`. The partition only
/// stores keys and reads positions back from this store. Backdrops (floor,
/// walls) bypass the partition and are drawn after the ordered list.
/// Lights are not partitioned either: the whole set is uploaded once per
/// frame before the first draw.
///
/// Single-threaded: one cull-and-draw pass per frame, no locks.

use rand::SeedableRng;
use rand::rngs::StdRng;
use slotmap::SlotMap;
use glam::Vec3;
use crate::camera::{Camera, RenderView};
use crate::error::Result;
use crate::render::CommandList;
use crate::{engine_debug, engine_trace};
use super::bsp_tree::{BspTree, ObjectPositions};
use super::catalog::SceneCatalog;
use super::drawer::{DrawStats, Drawer};
use super::light::LightSet;
use super::lod::LodSelector;
use super::scene_config::SceneConfig;
use super::scene_object::{SceneObject, SceneObjectKey};

impl ObjectPositions for SlotMap<SceneObjectKey, SceneObject> {
    fn position_of(&self, key: SceneObjectKey) -> Option<Vec3> {
        self.get(key).map(SceneObject::position)
    }
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects returned by the partition query
    pub visible_objects: usize,
    /// Visible objects that ran an animation step
    pub animated_objects: usize,
    /// Lights written to the light block
    pub lights: usize,
    /// Draw counters, backdrops included
    pub draw: DrawStats,
}

/// Scene controller.
pub struct Scene {
    objects: SlotMap<SceneObjectKey, SceneObject>,
    tree: BspTree,
    root_key: SceneObjectKey,
    backdrops: Vec<SceneObject>,
    lights: LightSet,
    config: SceneConfig,
    lod: LodSelector,
    backdrop_lod: LodSelector,
    rng: StdRng,
}

impl Scene {
    /// Create a scene whose partition is anchored on `root`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` fails validation.
    pub fn new(root: SceneObject, config: SceneConfig) -> Result<Self> {
        config.validate().map_err(|e| e.logged("bsp3d::Scene"))?;

        let mut objects = SlotMap::with_key();
        let root_key = objects.insert(root);
        let tree = BspTree::new(root_key).with_removal_strategy(config.removal);

        Ok(Self {
            objects,
            tree,
            root_key,
            backdrops: Vec::new(),
            lights: LightSet::new(),
            lod: LodSelector::new(config.lod),
            backdrop_lod: LodSelector::unbounded(),
            rng: StdRng::seed_from_u64(config.animation_seed),
            config,
        })
    }

    /// Insert every catalog object, in catalog order.
    ///
    /// Returns the number of objects inserted.
    pub fn initialize(&mut self, catalog: &SceneCatalog) -> Result<usize> {
        let objects = catalog.build_objects()?;
        let count = objects.len();
        for object in objects {
            self.insert_object(object)?;
        }

        engine_debug!("bsp3d::Scene",
            "Initialized {} objects (partition depth {})", count, self.tree.depth());
        Ok(count)
    }

    // ===== OBJECTS =====

    /// Store `object` and insert it into the partition.
    pub fn insert_object(&mut self, object: SceneObject) -> Result<SceneObjectKey> {
        let key = self.objects.insert(object);
        if let Err(err) = self.tree.insert(key, &self.objects) {
            self.objects.remove(key);
            return Err(err);
        }
        Ok(key)
    }

    /// Remove an object from the partition and hand it back.
    ///
    /// Returns `None`, leaving the object in place, for the root anchor,
    /// unknown keys, and objects the partition cannot locate from their
    /// current position.
    pub fn remove_object(&mut self, key: SceneObjectKey) -> Option<SceneObject> {
        if !self.tree.remove(key, &self.objects) {
            return None;
        }
        self.objects.remove(key)
    }

    /// Register a fixture drawn after the ordered list every frame.
    ///
    /// Backdrops are not partitioned, not culled and always drawn at
    /// high detail.
    pub fn add_backdrop(&mut self, object: SceneObject) {
        self.backdrops.push(object);
    }

    /// Replace the scene's lights.
    pub fn set_lights(&mut self, lights: LightSet) {
        self.lights = lights;
    }

    // ===== FRAME =====

    /// Query the partition for one camera state.
    pub fn cull(&mut self, camera: &Camera, apply_frustum_filter: bool) -> RenderView {
        let visible = self.tree
            .query_ordered_visible(camera, apply_frustum_filter, &self.config.frustum, &self.objects)
            .to_vec();
        RenderView::new(*camera, apply_frustum_filter, visible)
    }

    /// Upload the lights, cull, draw the visible objects in order, then
    /// the backdrops.
    ///
    /// Camera-bound spot lights are moved to `camera` before the upload.
    /// Each animating object takes one step of `delta_time` right after
    /// its own draw. Objects that are not visible do not move.
    ///
    /// # Arguments
    ///
    /// * `camera` - Viewer for this frame
    /// * `apply_frustum_filter` - Enable the frustum test during the query
    /// * `delta_time` - Seconds since the previous frame
    /// * `drawer` - Draw strategy
    /// * `cmd` - Command list the draws are recorded into
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        apply_frustum_filter: bool,
        delta_time: f32,
        drawer: &dyn Drawer,
        cmd: &mut dyn CommandList,
    ) -> Result<FrameStats> {
        self.lights.follow_camera(camera);
        self.lights.upload(cmd)?;

        let view = self.cull(camera, apply_frustum_filter);
        let mut stats = FrameStats {
            visible_objects: view.visible_count(),
            lights: self.lights.len(),
            ..FrameStats::default()
        };

        for &key in view.visible_objects() {
            let object = match self.objects.get_mut(key) {
                Some(object) => object,
                None => continue,
            };

            stats.draw += drawer.draw_object(object, camera, &self.lod, &self.config.frustum, cmd)?;

            if object.animate(delta_time, &mut self.rng) {
                stats.animated_objects += 1;
            }
        }

        for backdrop in &self.backdrops {
            stats.draw += drawer.draw_object(backdrop, camera, &self.backdrop_lod, &self.config.frustum, cmd)?;
        }

        engine_trace!("bsp3d::Scene",
            "{} visible, {} animated, {} draws ({} high, {} low, {} past LOD range)",
            stats.visible_objects, stats.animated_objects, stats.draw.draw_calls,
            stats.draw.high_detail, stats.draw.low_detail, stats.draw.lod_culled);

        Ok(stats)
    }

    // ===== ACCESSORS =====

    pub fn object(&self, key: SceneObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Number of stored objects, root anchor included, backdrops excluded.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn root_key(&self) -> SceneObjectKey {
        self.root_key
    }

    pub fn tree(&self) -> &BspTree {
        &self.tree
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn backdrops(&self) -> &[SceneObject] {
        &self.backdrops
    }

    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightSet {
        &mut self.lights
    }

    /// Whether every partition node still satisfies its front/back split.
    pub fn is_partition_consistent(&self) -> bool {
        self.tree.is_consistent(&self.objects)
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
