/// RenderView: result of a partition query.
///
/// Created by `Scene::cull()`. Contains a snapshot of the camera
/// at query time and the ordered list of visible object keys.
///
/// Ephemeral: lives for one frame.

use crate::scene::SceneObjectKey;
use super::camera::Camera;

/// Ordered visible set for one frame.
#[derive(Debug, Clone)]
pub struct RenderView {
    camera: Camera,
    frustum_filtered: bool,
    visible_objects: Vec<SceneObjectKey>,
}

impl RenderView {
    /// Create a new RenderView (crate-internal: only Scene::cull creates these).
    pub(crate) fn new(camera: Camera, frustum_filtered: bool, visible_objects: Vec<SceneObjectKey>) -> Self {
        Self {
            camera,
            frustum_filtered,
            visible_objects,
        }
    }

    /// Camera snapshot at the time of the query.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Whether the frustum filter was applied during the query.
    pub fn frustum_filtered(&self) -> bool {
        self.frustum_filtered
    }

    /// Visible keys in draw order.
    pub fn visible_objects(&self) -> &[SceneObjectKey] {
        &self.visible_objects
    }

    /// Number of visible objects.
    pub fn visible_count(&self) -> usize {
        self.visible_objects.len()
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
