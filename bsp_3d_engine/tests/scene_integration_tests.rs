//! Integration tests for the scene pipeline
//!
//! These tests drive the public API end to end: building a scene,
//! culling it from a camera, drawing into a recording command list and
//! editing the partition.
//!
//! Run with: cargo test --test scene_integration_tests

use bsp_3d_engine::bsp3d::Error;
use bsp_3d_engine::bsp3d::camera::{Camera, Frustum, FrustumConfig};
use bsp_3d_engine::bsp3d::render::{DrawMode, MeshId, RecordingCommandList};
use bsp_3d_engine::bsp3d::scene::{
    self, ForwardDrawer, LodLevel, LodSelector, LodThresholds, RemovalStrategy, Scene,
    SceneCatalog, SceneConfig, SceneObject, SceneObjectKey,
};
use bsp_3d_engine::glam::{Mat4, Vec3};

// ============================================================================
// HELPERS
// ============================================================================

fn looking_down_z(position: Vec3) -> Camera {
    Camera::new(position, Vec3::NEG_Z, Vec3::Y, 90f32.to_radians())
}

fn marker_scene(config: SceneConfig) -> Scene {
    let root = SceneObject::marker("root", Vec3::ZERO).unwrap();
    Scene::new(root, config).unwrap()
}

fn add_marker(scene: &mut Scene, position: Vec3) -> SceneObjectKey {
    scene.insert_object(SceneObject::marker("marker", position).unwrap()).unwrap()
}

// ============================================================================
// ORDERED VISIBILITY
// ============================================================================

#[test]
fn test_integration_two_sided_scene_order() {
    let mut scene = marker_scene(SceneConfig::default());
    let root = scene.root_key();
    let a = add_marker(&mut scene, Vec3::new(0.0, 0.0, -5.0));
    let b = add_marker(&mut scene, Vec3::new(0.0, 0.0, 5.0));

    let outside = scene.cull(&looking_down_z(Vec3::new(0.0, 0.0, 10.0)), true);
    assert_eq!(outside.visible_objects(), &[a, root, b]);

    // B sits behind a camera placed between it and the root
    let between = scene.cull(&looking_down_z(Vec3::new(0.0, 0.0, 3.0)), true);
    assert_eq!(between.visible_objects(), &[a, root]);
}

#[test]
fn test_integration_render_follows_visible_order() {
    let mut scene = marker_scene(SceneConfig::default());
    add_marker(&mut scene, Vec3::new(0.0, 0.0, -5.0));
    add_marker(&mut scene, Vec3::new(0.0, 0.0, 5.0));
    let camera = looking_down_z(Vec3::new(0.0, 0.0, 10.0));

    let mut cmd = RecordingCommandList::new();
    let stats = scene
        .render_frame(&camera, true, 0.016, &ForwardDrawer::new(), &mut cmd)
        .unwrap();

    // Distances 15, 10 and 5: two low detail, one high detail
    assert_eq!(stats.visible_objects, 3);
    assert_eq!(stats.draw.draw_calls, 3);
    assert_eq!(stats.draw.low_detail, 2);
    assert_eq!(stats.draw.high_detail, 1);
    assert!(cmd.draws().all(|(mesh, _)| mesh == MeshId::CUBE));
}

#[test]
fn test_integration_default_scene_frame() {
    let root = scene::table(Mat4::IDENTITY).unwrap();
    let mut scene = Scene::new(root, SceneConfig::default()).unwrap();
    scene.initialize(&SceneCatalog::default()).unwrap();
    scene.add_backdrop(scene::walls().unwrap());

    let mut camera = Camera::from_euler(Vec3::new(0.0, 3.4, 6.2), -90.0, -8.0, Vec3::Y, 75f32.to_radians());
    let drawer = ForwardDrawer::new();
    let mut cmd = RecordingCommandList::new();

    for frame in 0..20 {
        cmd.clear();
        let stats = scene
            .render_frame(&camera, frame % 2 == 0, 0.016, &drawer, &mut cmd)
            .unwrap();

        assert_eq!(stats.draw.draw_calls, cmd.draw_count());
        assert!(stats.draw.draw_calls >= 5);
        assert!(stats.visible_objects <= scene.object_count());
        camera.set_position(camera.position() + Vec3::new(0.0, 0.0, -0.5));
    }

    assert_eq!(scene.object_count(), 26);
    assert!(cmd.draws().any(|(_, mode)| mode == DrawMode::Indexed));
}

// ============================================================================
// LOD AND FRUSTUM
// ============================================================================

#[test]
fn test_integration_lod_boundaries() {
    let lod = LodSelector::new(LodThresholds::default());

    assert_eq!(lod.level(0.0), Some(LodLevel::High));
    assert_eq!(lod.level(7.999), Some(LodLevel::High));
    assert_eq!(lod.level(8.0), Some(LodLevel::Low));
    assert_eq!(lod.level(19.0), Some(LodLevel::Low));
    assert_eq!(lod.level(19.001), None);
}

#[test]
fn test_integration_frustum_on_axis() {
    let camera = looking_down_z(Vec3::ZERO);
    let config = FrustumConfig::default();

    assert!(Frustum::is_point_visible(Vec3::new(0.0, 0.0, -5.0), &camera, &config));
    assert!(!Frustum::is_point_visible(Vec3::new(0.0, 0.0, 5.0), &camera, &config));
}

// ============================================================================
// PARTITION EDITS
// ============================================================================

#[test]
fn test_integration_reinsert_keeps_partition_consistent() {
    let config = SceneConfig {
        removal: RemovalStrategy::Reinsert,
        ..SceneConfig::default()
    };
    let mut scene = marker_scene(config);
    let x = add_marker(&mut scene, Vec3::new(0.0, 0.0, 4.0));
    let y = add_marker(&mut scene, Vec3::new(0.0, 0.0, 2.0));
    let w = add_marker(&mut scene, Vec3::new(0.0, 0.0, 6.0));
    let z = add_marker(&mut scene, Vec3::new(0.0, 0.0, 8.0));

    assert!(scene.remove_object(x).is_some());

    assert!(scene.is_partition_consistent());
    assert_eq!(scene.tree().len(), 4);
    for key in [y, w, z] {
        assert!(scene.tree().contains(key));
    }
}

#[test]
fn test_integration_rejected_object_not_stored() {
    let mut scene = marker_scene(SceneConfig::default());

    let result = SceneObject::marker("nan", Vec3::new(f32::NAN, 0.0, 0.0));
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert_eq!(scene.object_count(), 1);

    let key = add_marker(&mut scene, Vec3::new(1.0, 2.0, 3.0));
    assert!(scene.remove_object(key).is_some());
    assert_eq!(scene.object_count(), 1);
    assert_eq!(scene.tree().len(), 1);
}
