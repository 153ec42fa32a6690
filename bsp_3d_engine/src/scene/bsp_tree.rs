/// BspTree: fixed-axis binary space partition over scene objects.
///
/// Every node is built around one anchor object and splits space with the
/// same plane normal (`+Z` unless overridden). An object goes to the
/// `front` child when `dot(position - anchor, normal) >= 0`, to `back`
/// otherwise. There is no rebalancing: insertion order decides the shape.
///
/// The tree stores keys only. Positions are read on demand through
/// `ObjectPositions`, so the tree never owns or copies scene objects.
///
/// Query traversal (per node):
/// - anchor in front of the camera and inside the frustum:
///   visit `back`, emit the anchor, visit `front`
/// - otherwise: skip the anchor and `back`, visit `front` only

use glam::Vec3;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use crate::camera::{Camera, Frustum, FrustumConfig};
use crate::error::{Error, Result};
use crate::{engine_debug, engine_warn};
use super::scene_object::SceneObjectKey;

/// Default splitting normal
pub const DEFAULT_NORMAL: Vec3 = Vec3::Z;

/// Position lookup used by the partition.
pub trait ObjectPositions {
    /// Current position of `key`, or `None` if the key is unknown.
    fn position_of(&self, key: SceneObjectKey) -> Option<Vec3>;
}

impl ObjectPositions for SlotMap<SceneObjectKey, Vec3> {
    fn position_of(&self, key: SceneObjectKey) -> Option<Vec3> {
        self.get(key).copied()
    }
}

/// How children of a removed node are reattached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalStrategy {
    /// Splice `back` under the deepest `front` node of the `front` subtree.
    /// O(depth), but the spliced objects are not re-classified.
    #[default]
    StructuralMerge,
    /// Re-insert every anchor of both subtrees from the root.
    /// O(n), keeps the classification invariant.
    Reinsert,
}

/// A partition node
#[derive(Debug)]
struct BspNode {
    anchor: SceneObjectKey,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    fn leaf(anchor: SceneObjectKey) -> Self {
        Self {
            anchor,
            front: None,
            back: None,
        }
    }
}

/// Fixed-axis BSP tree.
pub struct BspTree {
    root: Box<BspNode>,
    normal: Vec3,
    removal: RemovalStrategy,
    /// Keys currently held by a node (root included)
    resident: FxHashSet<SceneObjectKey>,
    /// Result buffer reused across queries
    visible: Vec<SceneObjectKey>,
}

impl BspTree {
    /// Create a tree around a root anchor (normal `+Z`).
    ///
    /// The root anchor stays resident for the lifetime of the tree.
    pub fn new(root_anchor: SceneObjectKey) -> Self {
        Self::with_normal(root_anchor, DEFAULT_NORMAL)
    }

    /// Create a tree with a custom splitting normal.
    pub fn with_normal(root_anchor: SceneObjectKey, normal: Vec3) -> Self {
        let mut resident = FxHashSet::default();
        resident.insert(root_anchor);

        engine_debug!("bsp3d::BspTree", "Created tree (normal {})", normal);

        Self {
            root: Box::new(BspNode::leaf(root_anchor)),
            normal,
            removal: RemovalStrategy::default(),
            resident,
            visible: Vec::new(),
        }
    }

    /// Choose how `remove` reattaches orphaned children.
    pub fn with_removal_strategy(mut self, removal: RemovalStrategy) -> Self {
        self.removal = removal;
        self
    }

    pub fn set_removal_strategy(&mut self, removal: RemovalStrategy) {
        self.removal = removal;
    }

    // ===== ACCESSORS =====

    pub fn root_anchor(&self) -> SceneObjectKey {
        self.root.anchor
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn removal_strategy(&self) -> RemovalStrategy {
        self.removal
    }

    /// Number of resident keys, root anchor included.
    pub fn len(&self) -> usize {
        self.resident.len()
    }

    /// `true` when only the root anchor remains.
    pub fn is_empty(&self) -> bool {
        self.resident.len() <= 1
    }

    pub fn contains(&self, key: SceneObjectKey) -> bool {
        self.resident.contains(&key)
    }

    /// Longest root-to-leaf path, in nodes.
    pub fn depth(&self) -> usize {
        Self::node_depth(Some(&*self.root))
    }

    /// Every resident key in back/anchor/front order, without culling.
    pub fn keys(&self) -> Vec<SceneObjectKey> {
        let mut keys = Vec::with_capacity(self.resident.len());
        Self::collect_in_order(Some(&*self.root), &mut keys);
        keys
    }

    // ===== INSERT =====

    /// Insert `key` below the node its position classifies into.
    ///
    /// # Errors
    ///
    /// - `DuplicateObject` if `key` is already resident
    /// - `ObjectNotFound` if `key` (or an anchor on its path) has no position
    pub fn insert<P: ObjectPositions + ?Sized>(&mut self, key: SceneObjectKey, positions: &P) -> Result<()> {
        if self.resident.contains(&key) {
            return Err(Error::DuplicateObject(format!("{:?} is already in the partition", key))
                .logged("bsp3d::BspTree"));
        }

        let position = match positions.position_of(key) {
            Some(p) => p,
            None => {
                return Err(Error::ObjectNotFound(format!("{:?} has no position", key))
                    .logged("bsp3d::BspTree"));
            }
        };

        Self::insert_below(&mut self.root, key, position, self.normal, positions)?;
        self.resident.insert(key);
        Ok(())
    }

    fn insert_below<P: ObjectPositions + ?Sized>(
        node: &mut BspNode,
        key: SceneObjectKey,
        position: Vec3,
        normal: Vec3,
        positions: &P,
    ) -> Result<()> {
        let anchor_position = match positions.position_of(node.anchor) {
            Some(p) => p,
            None => {
                return Err(Error::ObjectNotFound(format!("anchor {:?} has no position", node.anchor))
                    .logged("bsp3d::BspTree"));
            }
        };

        let child = if (position - anchor_position).dot(normal) >= 0.0 {
            &mut node.front
        } else {
            &mut node.back
        };

        match child {
            Some(next) => Self::insert_below(next, key, position, normal, positions),
            None => {
                *child = Some(Box::new(BspNode::leaf(key)));
                Ok(())
            }
        }
    }

    // ===== REMOVE =====

    /// Detach `key` from the tree.
    ///
    /// The node is located by plane descent using the key's current
    /// position, then matched by key. Returns `false` (and logs a warning)
    /// when the key is the root anchor, is not resident, or cannot be
    /// reached from its current position.
    pub fn remove<P: ObjectPositions + ?Sized>(&mut self, key: SceneObjectKey, positions: &P) -> bool {
        if key == self.root.anchor {
            engine_warn!("bsp3d::BspTree", "Refusing to remove the root anchor {:?}", key);
            return false;
        }
        if !self.resident.contains(&key) {
            engine_warn!("bsp3d::BspTree", "remove: {:?} is not in the partition", key);
            return false;
        }
        let position = match positions.position_of(key) {
            Some(p) => p,
            None => {
                engine_warn!("bsp3d::BspTree", "remove: {:?} has no position", key);
                return false;
            }
        };

        let removed = match Self::child_toward(&mut self.root, position, self.normal, positions) {
            Some(slot) => Self::unlink(slot, key, position, self.normal, self.removal, positions),
            None => None,
        };

        let mut removed = match removed {
            Some(node) => node,
            None => {
                engine_warn!("bsp3d::BspTree", "remove: {:?} not found along its plane path", key);
                return false;
            }
        };
        self.resident.remove(&key);

        if self.removal == RemovalStrategy::Reinsert {
            let mut orphans = Vec::new();
            Self::collect_preorder(removed.front.take().as_deref(), &mut orphans);
            Self::collect_preorder(removed.back.take().as_deref(), &mut orphans);
            for orphan in orphans {
                self.resident.remove(&orphan);
                if let Err(err) = self.insert(orphan, positions) {
                    engine_warn!("bsp3d::BspTree", "Dropped {:?} while re-inserting: {}", orphan, err);
                }
            }
        }

        engine_debug!("bsp3d::BspTree", "Removed {:?} ({} resident)", key, self.resident.len());
        true
    }

    /// Child slot of `node` that `position` classifies into.
    fn child_toward<'a, P: ObjectPositions + ?Sized>(
        node: &'a mut BspNode,
        position: Vec3,
        normal: Vec3,
        positions: &P,
    ) -> Option<&'a mut Option<Box<BspNode>>> {
        let anchor_position = positions.position_of(node.anchor)?;
        if (position - anchor_position).dot(normal) >= 0.0 {
            Some(&mut node.front)
        } else {
            Some(&mut node.back)
        }
    }

    /// Find `key` at or below `slot` and take its node out.
    ///
    /// With `StructuralMerge` the node's children are merged into the slot
    /// it leaves. With `Reinsert` the slot is left empty and the children
    /// stay attached to the returned node.
    fn unlink<P: ObjectPositions + ?Sized>(
        slot: &mut Option<Box<BspNode>>,
        key: SceneObjectKey,
        position: Vec3,
        normal: Vec3,
        removal: RemovalStrategy,
        positions: &P,
    ) -> Option<Box<BspNode>> {
        if slot.as_ref()?.anchor == key {
            let mut node = slot.take()?;
            if removal == RemovalStrategy::StructuralMerge {
                *slot = merge_subtrees(node.front.take(), node.back.take());
            }
            return Some(node);
        }
        let node = slot.as_mut()?;
        let child = Self::child_toward(node, position, normal, positions)?;
        Self::unlink(child, key, position, normal, removal, positions)
    }

    // ===== QUERY =====

    /// Ordered visible keys for one camera state.
    ///
    /// Clears the previous result. Deterministic for a fixed tree and camera.
    ///
    /// # Arguments
    ///
    /// * `camera` - Viewer
    /// * `apply_frustum_filter` - When `false` only the in-front test applies
    /// * `frustum_config` - Near/far/aspect used to build the frustum
    /// * `positions` - Position lookup for resident keys
    pub fn query_ordered_visible<P: ObjectPositions + ?Sized>(
        &mut self,
        camera: &Camera,
        apply_frustum_filter: bool,
        frustum_config: &FrustumConfig,
        positions: &P,
    ) -> &[SceneObjectKey] {
        self.visible.clear();
        let frustum = apply_frustum_filter.then(|| Frustum::from_camera(camera, frustum_config));
        Self::collect_front_to_back(Some(&*self.root), camera, frustum.as_ref(), positions, &mut self.visible);
        &self.visible
    }

    /// Result of the last query.
    pub fn last_visible(&self) -> &[SceneObjectKey] {
        &self.visible
    }

    fn collect_front_to_back<P: ObjectPositions + ?Sized>(
        node: Option<&BspNode>,
        camera: &Camera,
        frustum: Option<&Frustum>,
        positions: &P,
        out: &mut Vec<SceneObjectKey>,
    ) {
        let node = match node {
            Some(node) => node,
            None => return,
        };

        let emit = match positions.position_of(node.anchor) {
            Some(anchor_position) => {
                camera.is_in_front(anchor_position)
                    && frustum.map_or(true, |f| f.contains_point(anchor_position))
            }
            None => false,
        };

        if emit {
            Self::collect_front_to_back(node.back.as_deref(), camera, frustum, positions, out);
            out.push(node.anchor);
        }
        Self::collect_front_to_back(node.front.as_deref(), camera, frustum, positions, out);
    }

    // ===== DIAGNOSTICS =====

    /// Check the classification invariant at every node against all of
    /// its descendants. `false` if any position is missing.
    pub fn is_consistent<P: ObjectPositions + ?Sized>(&self, positions: &P) -> bool {
        Self::subtree_consistent(&self.root, self.normal, positions)
    }

    fn subtree_consistent<P: ObjectPositions + ?Sized>(node: &BspNode, normal: Vec3, positions: &P) -> bool {
        let anchor_position = match positions.position_of(node.anchor) {
            Some(p) => p,
            None => return false,
        };

        let side_ok = |child: Option<&BspNode>, front: bool| {
            let mut keys = Vec::new();
            Self::collect_preorder(child, &mut keys);
            keys.iter().all(|&key| match positions.position_of(key) {
                Some(p) => {
                    let d = (p - anchor_position).dot(normal);
                    if front { d >= 0.0 } else { d < 0.0 }
                }
                None => false,
            })
        };

        side_ok(node.front.as_deref(), true)
            && side_ok(node.back.as_deref(), false)
            && node.front.as_deref().map_or(true, |n| Self::subtree_consistent(n, normal, positions))
            && node.back.as_deref().map_or(true, |n| Self::subtree_consistent(n, normal, positions))
    }

    fn node_depth(node: Option<&BspNode>) -> usize {
        match node {
            Some(node) => 1 + Self::node_depth(node.front.as_deref()).max(Self::node_depth(node.back.as_deref())),
            None => 0,
        }
    }

    fn collect_in_order(node: Option<&BspNode>, out: &mut Vec<SceneObjectKey>) {
        if let Some(node) = node {
            Self::collect_in_order(node.back.as_deref(), out);
            out.push(node.anchor);
            Self::collect_in_order(node.front.as_deref(), out);
        }
    }

    fn collect_preorder(node: Option<&BspNode>, out: &mut Vec<SceneObjectKey>) {
        if let Some(node) = node {
            out.push(node.anchor);
            Self::collect_preorder(node.front.as_deref(), out);
            Self::collect_preorder(node.back.as_deref(), out);
        }
    }
}

/// Join the two children of a removed node.
///
/// If either side is empty the other is returned. Otherwise `back` becomes
/// the `front` child of the deepest node on `front`'s front chain. Members of
/// `back` are not re-classified against the nodes they end up under.
fn merge_subtrees(front: Option<Box<BspNode>>, back: Option<Box<BspNode>>) -> Option<Box<BspNode>> {
    match (front, back) {
        (None, other) | (other, None) => other,
        (Some(mut front), Some(back)) => {
            attach_at_front_end(&mut front, back);
            Some(front)
        }
    }
}

fn attach_at_front_end(node: &mut BspNode, subtree: Box<BspNode>) {
    if let Some(next) = node.front.as_mut() {
        attach_at_front_end(next, subtree);
        return;
    }
    node.front = Some(subtree);
}

#[cfg(test)]
#[path = "bsp_tree_tests.rs"]
mod tests;
