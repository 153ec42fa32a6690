/// SceneObject: a placed, drawable object of the scene.
///
/// An object is a list of render parts (its draw sequence as data), a
/// placement transform, and a behavior tag. Its `position` is the point
/// the partition and the frustum test look at.

use glam::{Mat4, Vec3};
use rand::Rng;
use slotmap::new_key_type;
use crate::error::{Error, Result};
use crate::render::{DrawMode, MeshId, TextureId};
use super::animation::Wander;
use super::lod::LodMesh;

new_key_type! {
    /// Stable key for a SceneObject within a Scene.
    ///
    /// Identity of an object: two objects at the same position are still
    /// told apart by their keys.
    pub struct SceneObjectKey;
}

/// What an object represents
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Table,
    DrinkBox,
    PopcornBucket,
    FireFlower,
    Hammer,
    FireFly,
    Walls,
    Custom(String),
}

/// Per-frame capability of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Never moves
    Static,
    /// Moves itself once per frame, right after being drawn
    Animating(Wander),
}

/// One drawable piece of an object.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPart {
    /// Transform relative to the object's placement (translate * rotate * scale)
    pub local: Mat4,
    pub mesh: LodMesh,
    /// Diffuse (unit 0) and specular (unit 1); `None` leaves the unit as is
    pub textures: [Option<TextureId>; 2],
    pub draw_mode: DrawMode,
}

impl RenderPart {
    pub fn new(local: Mat4, mesh: LodMesh, textures: [Option<TextureId>; 2], draw_mode: DrawMode) -> Self {
        Self { local, mesh, textures, draw_mode }
    }

    /// Build a part from scale, rotation and translation (applied in that order).
    pub fn placed(
        scale: Vec3,
        rotation: Mat4,
        translation: Vec3,
        mesh: LodMesh,
        textures: [Option<TextureId>; 2],
        draw_mode: DrawMode,
    ) -> Self {
        let local = Mat4::from_translation(translation) * rotation * Mat4::from_scale(scale);
        Self::new(local, mesh, textures, draw_mode)
    }
}

/// A placed scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    kind: ObjectKind,
    position: Vec3,
    initial_position: Vec3,
    transform: Mat4,
    behavior: Behavior,
    parts: Vec<RenderPart>,
}

impl SceneObject {
    /// Create an object from its placement and parts.
    ///
    /// The object's position is the world translation of its first part.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `parts` is empty or the position is not finite.
    pub fn new(kind: ObjectKind, transform: Mat4, parts: Vec<RenderPart>) -> Result<Self> {
        let first = match parts.first() {
            Some(part) => part,
            None => {
                return Err(Error::InvalidResource(format!("{:?} has no render parts", kind))
                    .logged("bsp3d::SceneObject"));
            }
        };

        let position = (transform * first.local).w_axis.truncate();
        if !position.is_finite() {
            return Err(Error::InvalidResource(format!(
                "{:?} has a non-finite position {}",
                kind, position
            ))
            .logged("bsp3d::SceneObject"));
        }

        Ok(Self {
            kind,
            position,
            initial_position: position,
            transform,
            behavior: Behavior::Static,
            parts,
        })
    }

    /// Single unit cube at `position`. Handy as a partition anchor.
    pub fn marker(name: &str, position: Vec3) -> Result<Self> {
        Self::new(
            ObjectKind::Custom(name.to_string()),
            Mat4::IDENTITY,
            vec![RenderPart::new(
                Mat4::from_translation(position),
                LodMesh::fixed(MeshId::CUBE),
                [None, None],
                DrawMode::Arrays,
            )],
        )
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    // ===== ACCESSORS =====

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Current position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position at construction time.
    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn parts(&self) -> &[RenderPart] {
        &self.parts
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.behavior, Behavior::Animating(_))
    }

    /// World matrix of a part: follows the object's displacement since construction.
    pub fn part_world_matrix(&self, part: &RenderPart) -> Mat4 {
        Mat4::from_translation(self.position - self.initial_position) * self.transform * part.local
    }

    /// Move the object.
    ///
    /// The partition is not told. A resident object that crosses an
    /// anchor's plane may no longer be found by `remove`.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Run one animation step. Returns `false` for static objects.
    pub fn animate<R: Rng + ?Sized>(&mut self, delta_time: f32, rng: &mut R) -> bool {
        match &mut self.behavior {
            Behavior::Static => false,
            Behavior::Animating(wander) => {
                wander.step(&mut self.position, self.initial_position, delta_time, rng);
                true
            }
        }
    }
}

#[cfg(test)]
#[path = "scene_object_tests.rs"]
mod tests;
