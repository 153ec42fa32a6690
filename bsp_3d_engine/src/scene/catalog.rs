/// Scene catalog: the fixed set of objects a scene is populated with.
///
/// Each builder returns a `SceneObject` whose parts are the object's draw
/// sequence as data: scale, rotation and translation per part, the mesh
/// pair to pick from, and the textures to bind.

use glam::{Mat4, Vec3};
use crate::error::Result;
use crate::render::{DrawMode, MeshId, TextureId};
use crate::render::DrawMode::{Arrays, Indexed};
use super::animation::Wander;
use super::lod::LodMesh;
use super::scene_object::{Behavior, ObjectKind, RenderPart, SceneObject};

const PLANE: LodMesh = LodMesh { high: MeshId::PLANE, low: MeshId::PLANE };
const CUBE: LodMesh = LodMesh { high: MeshId::CUBE, low: MeshId::CUBE };
const PYRAMID: LodMesh = LodMesh { high: MeshId::PYRAMID, low: MeshId::PYRAMID };
const FRUSTUM_PYRAMID: LodMesh = LodMesh { high: MeshId::FRUSTUM_PYRAMID, low: MeshId::FRUSTUM_PYRAMID };
const CONE: LodMesh = LodMesh { high: MeshId::CONE, low: MeshId::CONE };
const SPHERE: LodMesh = LodMesh { high: MeshId::SPHERE, low: MeshId::LOW_SPHERE };
const CYLINDER: LodMesh = LodMesh { high: MeshId::CYLINDER, low: MeshId::LOW_CYLINDER };
const TORUS: LodMesh = LodMesh { high: MeshId::TORUS, low: MeshId::LOW_TORUS };

/// Firefly drift speed
pub const FIREFLY_SPEED: f32 = 1.1295;

/// Yaw (degrees, about +Y) and translation of one table group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub yaw_degrees: f32,
    pub translation: Vec3,
}

impl Placement {
    pub fn new(yaw_degrees: f32, translation: Vec3) -> Self {
        Self { yaw_degrees, translation }
    }

    /// `translation * rotation_y(yaw)`
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * Mat4::from_rotation_y(self.yaw_degrees.to_radians())
    }
}

/// Object catalog and placement.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCatalog {
    /// One table with its props per placement
    pub groups: Vec<Placement>,
    /// Initial firefly positions
    pub fireflies: Vec<Vec3>,
    pub firefly_speed: f32,
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self {
            groups: vec![
                Placement::new(0.0, Vec3::new(0.0, 0.0, 0.0)),
                Placement::new(90.0, Vec3::new(-7.0, 0.0, -8.5)),
                Placement::new(270.0, Vec3::new(8.0, 0.0, -17.5)),
            ],
            fireflies: vec![
                Vec3::new(0.0, 4.0, -2.5),
                Vec3::new(1.5, 4.5, -3.5),
                Vec3::new(-2.5, 4.5, -2.5),
                Vec3::new(-1.5, 4.5, -0.5),
                Vec3::new(-8.5, 4.5, -3.5),
                Vec3::new(-4.5, 4.5, -3.5),
                Vec3::new(-6.5, 4.5, -3.5),
                Vec3::new(-2.5, 4.5, -8.5),
                Vec3::new(-6.5, 4.5, -5.5),
                Vec3::new(3.5, 4.5, -16.5),
            ],
            firefly_speed: FIREFLY_SPEED,
        }
    }
}

impl SceneCatalog {
    /// Catalog with no objects.
    pub fn empty() -> Self {
        Self {
            groups: Vec::new(),
            fireflies: Vec::new(),
            firefly_speed: FIREFLY_SPEED,
        }
    }

    /// Number of objects `build_objects` produces.
    pub fn object_count(&self) -> usize {
        self.groups.len() * 5 + self.fireflies.len()
    }

    /// Build every object, groups first (table, drink box, popcorn bucket,
    /// fire flower, hammer), then the fireflies.
    pub fn build_objects(&self) -> Result<Vec<SceneObject>> {
        let mut objects = Vec::with_capacity(self.object_count());
        for placement in &self.groups {
            let transform = placement.transform();
            objects.push(table(transform)?);
            objects.push(drink_box(transform)?);
            objects.push(popcorn_bucket(transform)?);
            objects.push(fire_flower(transform)?);
            objects.push(hammer(transform)?);
        }
        for &position in &self.fireflies {
            objects.push(firefly(position, self.firefly_speed)?);
        }
        Ok(objects)
    }
}

// ===== PART HELPERS =====

fn rot(degrees: f32, axis: Vec3) -> Mat4 {
    Mat4::from_axis_angle(axis, degrees.to_radians())
}

fn part(
    scale: [f32; 3],
    rotation: Mat4,
    translation: [f32; 3],
    mesh: LodMesh,
    textures: [Option<TextureId>; 2],
    draw_mode: DrawMode,
) -> RenderPart {
    RenderPart::placed(
        Vec3::from_array(scale),
        rotation,
        Vec3::from_array(translation),
        mesh,
        textures,
        draw_mode,
    )
}

// ===== OBJECT BUILDERS =====

/// Desk top, desk edge and brick base.
pub fn table(transform: Mat4) -> Result<SceneObject> {
    let desk = [Some(TextureId::DESK), Some(TextureId::SPECULAR_PLASTIC)];
    let brick = [Some(TextureId::BRICK), Some(TextureId::SPECULAR_PLASTIC)];
    SceneObject::new(ObjectKind::Table, transform, vec![
        part([5.5, 1.0, 4.5], Mat4::IDENTITY, [0.0, 0.0, 0.0], PLANE, desk, Indexed),
        part([5.5, 0.3, 4.5], Mat4::IDENTITY, [0.0, -0.15, 0.0], CUBE, desk, Arrays),
        part([5.0, 2.7, 4.0], Mat4::IDENTITY, [0.0, -1.65, 0.0], CUBE, brick, Arrays),
    ])
}

/// Drink carton body and lid.
pub fn drink_box(transform: Mat4) -> Result<SceneObject> {
    SceneObject::new(ObjectKind::DrinkBox, transform, vec![
        part(
            [1.35, 1.35, 1.35],
            rot(26.0, Vec3::Y),
            [-1.875, 0.676, -1.0],
            FRUSTUM_PYRAMID,
            [Some(TextureId::DRINK_FRONT), None],
            Arrays,
        ),
        part(
            [0.535, 1.0, 0.535],
            rot(26.0, Vec3::Y) * rot(-2.0, Vec3::Z),
            [-1.88, 1.7, -1.0],
            PLANE,
            [Some(TextureId::DRINK_TOP), None],
            Indexed,
        ),
    ])
}

/// Bucket, rims, handle hinges, knob, leaves and popcorn cone.
pub fn popcorn_bucket(transform: Mat4) -> Result<SceneObject> {
    let panels = [Some(TextureId::PANELS), None];
    let rim = [Some(TextureId::LEAF_DARK), Some(TextureId::SPECULAR_METAL)];
    let brass = [Some(TextureId::BRASS), Some(TextureId::SPECULAR_METAL)];
    let leaf = [Some(TextureId::LEAF), Some(TextureId::SPECULAR_METAL)];
    let hinge = |yaw: f32| rot(90.0, Vec3::Z) * rot(45.0, Vec3::X) * rot(yaw, Vec3::Y);
    let leaf_turn = |roll: f32| rot(90.0, Vec3::X) * rot(roll, Vec3::Z);

    SceneObject::new(ObjectKind::PopcornBucket, transform, vec![
        part([3.0, 0.8, 3.0], rot(60.0, Vec3::Y), [1.82, 1.3, -1.3], CYLINDER, panels, Indexed),
        part([3.45, 0.25, 3.45], rot(105.0, Vec3::Y), [1.8, 0.26, -1.3], CYLINDER, rim, Indexed),
        part([3.45, 0.25, 3.45], rot(105.0, Vec3::Y), [1.8, 2.2, -1.3], CYLINDER, rim, Indexed),
        part([0.4, 0.02, 0.4], hinge(-135.0), [1.68, 2.85, -1.38], CYLINDER, brass, Indexed),
        part([0.4, 0.02, 0.4], hinge(135.0), [1.91, 2.85, -1.18], CYLINDER, brass, Indexed),
        part(
            [0.15, 0.15, 0.15],
            rot(-90.0, Vec3::Z) * rot(45.0, Vec3::X),
            [1.8, 2.69, -1.3],
            SPHERE,
            brass,
            Indexed,
        ),
        part([0.475, 1.1, 1.5], leaf_turn(30.0), [1.42, 1.21, -0.575], PLANE, leaf, Indexed),
        part([0.475, 1.1, 1.5], leaf_turn(120.0), [1.095, 1.21, -1.72], PLANE, leaf, Indexed),
        part([0.475, 1.1, 1.5], leaf_turn(210.0), [2.22, 1.21, -2.01], PLANE, leaf, Indexed),
        part([0.475, 1.1, 1.5], leaf_turn(300.0), [2.53, 1.21, -0.9], PLANE, leaf, Indexed),
        part([0.86, 0.22, 0.86], Mat4::IDENTITY, [1.8, 2.505, -1.3], CONE, leaf, Indexed),
    ])
}

/// Question block, pipe stem, leaves, bloom and eyes.
pub fn fire_flower(transform: Mat4) -> Result<SceneObject> {
    let question = [Some(TextureId::QUESTION), Some(TextureId::SPECULAR_PLASTIC)];
    let clear = [Some(TextureId::CLEAR), None];
    let green = [Some(TextureId::GREEN), Some(TextureId::SPECULAR_PLASTIC)];
    let orange = [Some(TextureId::ORANGE), Some(TextureId::SPECULAR_PLASTIC)];
    let yellow = [Some(TextureId::YELLOW), Some(TextureId::SPECULAR_PLASTIC)];
    let eyes = [Some(TextureId::EYES), None];

    SceneObject::new(ObjectKind::FireFlower, transform, vec![
        part([1.1, 1.1, 1.1], rot(40.0, Vec3::Y), [-0.1, 0.56, -1.2], CUBE, question, Arrays),
        part([0.19, 0.7, 0.19], rot(-2.0, Vec3::Z), [0.22, 1.6, -1.42], CYLINDER, clear, Indexed),
        part([0.18, 0.3, 0.18], Mat4::IDENTITY, [-0.15, 1.2, -1.13], CYLINDER, green, Indexed),
        part(
            [0.175, 0.15, 0.175],
            rot(25.0, Vec3::X) * rot(30.0, Vec3::Z),
            [-0.225, 1.59, -1.075],
            CYLINDER,
            green,
            Indexed,
        ),
        part(
            [0.175, 0.24, 0.175],
            rot(35.0, Vec3::Y) * rot(80.0, Vec3::Z),
            [-0.475, 1.72, -0.9],
            CYLINDER,
            green,
            Indexed,
        ),
        part([0.24, 0.07, 0.24], rot(-2.0, Vec3::Z), [0.245, 2.3, -1.42], CYLINDER, orange, Indexed),
        part([0.24, 0.01, 0.24], rot(-2.0, Vec3::Z), [0.24, 2.15, -1.42], CYLINDER, orange, Indexed),
        part([0.35, 0.275, 0.35], rot(-50.0, Vec3::Y), [-0.7, 1.75, -0.75], TORUS, orange, Arrays),
        part([0.275, 0.18, 0.4], rot(-50.0, Vec3::Y), [-0.7, 1.75, -0.75], TORUS, yellow, Arrays),
        part([0.15, 0.15, 0.25], rot(40.0, Vec3::Y), [-0.7, 1.75, -0.75], SPHERE, eyes, Indexed),
    ])
}

/// Hammer head, handle and grip.
pub fn hammer(transform: Mat4) -> Result<SceneObject> {
    let head = [Some(TextureId::HAMMER_HEAD), Some(TextureId::SPECULAR_HAMMER_HEAD)];
    let wood = [Some(TextureId::WOOD), None];

    SceneObject::new(ObjectKind::Hammer, transform, vec![
        part([1.175, 0.15, 1.15], rot(90.0, Vec3::X), [1.75, 0.96, 1.0], CYLINDER, head, Indexed),
        part([0.7, 1.7, 0.4], rot(281.0, Vec3::Z), [-0.55, 0.497, 1.0], CYLINDER, wood, Indexed),
        part([0.98, 0.25, 0.98], rot(8.0, Vec3::Z), [1.87, 0.282, 1.0], CYLINDER, head, Indexed),
        part([0.8, 0.6, 0.4], rot(100.0, Vec3::Z), [1.0, 0.81, 1.0], PYRAMID, wood, Arrays),
        part([0.8, 0.6, 0.4], rot(280.0, Vec3::Z), [1.59, 0.915, 1.0], PYRAMID, wood, Arrays),
        part([0.39, 0.9, 0.27], rot(8.0, Vec3::Z), [1.82, 0.6, 1.0], CUBE, head, Arrays),
        part([0.28, 0.4, 0.28], rot(8.0, Vec3::Z), [1.74, 1.2, 1.0], CUBE, head, Arrays),
        part([0.25, 0.25, 0.25], rot(-90.0, Vec3::Z), [1.7, 1.53, 1.0], SPHERE, head, Indexed),
    ])
}

/// Small glowing sphere that wanders around its start position.
pub fn firefly(position: Vec3, speed: f32) -> Result<SceneObject> {
    let object = SceneObject::new(ObjectKind::FireFly, Mat4::IDENTITY, vec![part(
        [0.05, 0.05, 0.05],
        rot(-90.0, Vec3::Z) * rot(45.0, Vec3::X),
        position.to_array(),
        SPHERE,
        [Some(TextureId::YELLOW), None],
        Indexed,
    )])?;
    Ok(object.with_behavior(Behavior::Animating(Wander::new(speed))))
}

/// Grass floor and four fence walls around the play area.
pub fn walls() -> Result<SceneObject> {
    let grass = [Some(TextureId::GRASS), None];
    let fence = [Some(TextureId::FENCE), None];
    let upright = |roll: f32| rot(90.0, Vec3::X) * rot(roll, Vec3::Z);

    SceneObject::new(ObjectKind::Walls, Mat4::IDENTITY, vec![
        part([24.0, 1.0, 34.5], Mat4::IDENTITY, [0.0, -3.0, -6.0], PLANE, grass, Indexed),
        part([34.55, 1.0, 6.0], upright(-90.0), [-12.0, 0.0, -6.0], PLANE, fence, Indexed),
        part([34.55, 1.0, 6.0], upright(90.0), [12.0, 0.0, -6.0], PLANE, fence, Indexed),
        part([24.0, 1.0, 6.0], upright(0.0), [0.0, 0.0, -23.25], PLANE, fence, Indexed),
        part([24.0, 1.0, 6.0], upright(180.0), [0.0, 0.0, 11.25], PLANE, fence, Indexed),
    ])
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
