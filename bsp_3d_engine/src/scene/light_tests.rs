use glam::Vec3;
use crate::camera::Camera;
use crate::error::Error;
use crate::render::{Command, RecordingCommandList};
use super::*;

const HEADER_BYTES: usize = 16;
const LIGHT_BYTES: usize = 112;

fn white() -> LightColor {
    LightColor::new(Vec3::splat(0.1), Vec3::ONE, Vec3::splat(0.5))
}

fn lamp(x: f32) -> Light {
    Light::point(Vec3::new(x, 3.0, 0.0), white(), Attenuation::new(1.0, 0.09, 0.032), 1.0)
}

fn camera_at(position: Vec3, forward: Vec3) -> Camera {
    Camera::new(position, forward, Vec3::Y, 75f32.to_radians())
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-6
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    bytemuck::pod_read_unaligned(&bytes[offset..offset + 4])
}

// ============================================================================
// Light
// ============================================================================

#[test]
fn test_layout_sizes() {
    assert_eq!(std::mem::size_of::<GpuLightHeader>(), HEADER_BYTES);
    assert_eq!(std::mem::size_of::<GpuLight>(), LIGHT_BYTES);
}

#[test]
fn test_attenuation_factor() {
    assert_eq!(Attenuation::default().factor(25.0), 1.0);

    let falloff = Attenuation::new(1.0, 0.5, 0.0);
    assert!((falloff.factor(2.0) - 0.5).abs() < 1e-6);
}

#[test]
fn test_disabled_light_keeps_ambient_only() {
    let mut light = lamp(0.0);
    light.set_enabled(false);

    let emitted = light.emitted_color();
    assert_eq!(emitted.ambient, Vec3::splat(0.1));
    assert_eq!(emitted.diffuse, Vec3::ZERO);
    assert_eq!(emitted.specular, Vec3::ZERO);
    assert_eq!(light.color(), &white());

    light.set_enabled(true);
    assert_eq!(light.emitted_color(), white());
}

#[test]
fn test_translate() {
    let mut point = lamp(1.0);
    assert!(point.translate(Vec3::new(0.0, 0.0, -1.0)));
    assert_eq!(point.position(), Some(Vec3::new(1.0, 3.0, -1.0)));

    let mut sun = Light::directional(Vec3::NEG_Y, white());
    assert!(!sun.translate(Vec3::X));
    assert_eq!(sun.position(), None);
}

#[test]
fn test_flashlight_follows_camera() {
    let start = camera_at(Vec3::ZERO, Vec3::NEG_Z);
    let mut flashlight = Light::flashlight(&start, white(), Attenuation::default(), 12.5, 15.0);
    let mut fixed = Light::spot(Vec3::ONE, Vec3::NEG_Y, white(), Attenuation::default(), 12.5, 15.0);

    let moved = camera_at(Vec3::new(2.0, 3.0, 4.0), Vec3::X);
    assert!(flashlight.follow_camera(&moved));
    assert!(!fixed.follow_camera(&moved));

    match flashlight.kind() {
        LightKind::Spot { position, direction, .. } => {
            assert_eq!(*position, Vec3::new(2.0, 3.0, 4.0));
            assert!(close(*direction, Vec3::X));
        }
        other => panic!("unexpected kind {:?}", other),
    }
    assert_eq!(fixed.position(), Some(Vec3::ONE));
}

#[test]
fn test_validate_rejects_bad_lights() {
    let zero_direction = Light::directional(Vec3::ZERO, white());
    assert!(matches!(zero_direction.validate(), Err(Error::InvalidResource(_))));

    let no_falloff = Light::point(Vec3::ZERO, white(), Attenuation::new(0.0, 0.0, 0.0), 1.0);
    assert!(matches!(no_falloff.validate(), Err(Error::InvalidResource(_))));

    let negative_intensity = Light::point(Vec3::ZERO, white(), Attenuation::default(), -1.0);
    assert!(matches!(negative_intensity.validate(), Err(Error::InvalidResource(_))));

    let inverted_cone = Light::spot(Vec3::ZERO, Vec3::NEG_Z, white(), Attenuation::default(), 20.0, 10.0);
    assert!(matches!(inverted_cone.validate(), Err(Error::InvalidResource(_))));

    let bad_color = Light::directional(Vec3::NEG_Y, LightColor::new(Vec3::NAN, Vec3::ONE, Vec3::ONE));
    assert!(matches!(bad_color.validate(), Err(Error::InvalidResource(_))));

    assert!(lamp(0.0).validate().is_ok());
}

#[test]
fn test_spot_packs_cone_cosines() {
    let spot = Light::spot(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -2.0), white(), Attenuation::default(), 60.0, 90.0);
    let gpu = spot.to_gpu();

    assert_eq!(gpu.position, [1.0, 2.0, 3.0, KIND_SPOT]);
    assert_eq!(gpu.direction, [0.0, 0.0, -1.0, 0.0]);
    assert!((gpu.cone[0] - 0.5).abs() < 1e-6);
    assert!(gpu.cone[1].abs() < 1e-6);
}

// ============================================================================
// LightSet
// ============================================================================

#[test]
fn test_add_remove_clear_keep_order() {
    let mut set = LightSet::new();
    let a = set.add(lamp(0.0)).unwrap();
    let b = set.add(lamp(1.0)).unwrap();
    let c = set.add(lamp(2.0)).unwrap();

    let keys: Vec<_> = set.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![a, b, c]);

    let removed = set.remove(b).unwrap();
    assert_eq!(removed.position(), Some(Vec3::new(1.0, 3.0, 0.0)));
    let keys: Vec<_> = set.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec![a, c]);

    assert!(set.remove(b).is_none());
    assert_eq!(set.len(), 2);

    set.clear();
    assert!(set.is_empty());
    assert!(set.get(a).is_none());
}

#[test]
fn test_add_rejects_invalid_and_overflow() {
    let mut set = LightSet::new();
    let invalid = Light::directional(Vec3::ZERO, white());
    assert!(matches!(set.add(invalid), Err(Error::InvalidResource(_))));
    assert!(set.is_empty());

    for i in 0..MAX_LIGHTS {
        set.add(lamp(i as f32)).unwrap();
    }
    assert!(matches!(set.add(lamp(99.0)), Err(Error::InvalidResource(_))));
    assert_eq!(set.len(), MAX_LIGHTS);
}

#[test]
fn test_get_mut_edits_in_place() {
    let mut set = LightSet::new();
    let key = set.add(lamp(0.0)).unwrap();

    set.get_mut(key).unwrap().set_enabled(false);
    assert!(!set.get(key).unwrap().is_enabled());
}

#[test]
fn test_to_bytes_layout() {
    let mut set = LightSet::new();
    set.add(Light::directional(Vec3::new(0.0, -2.0, 0.0), white())).unwrap();
    set.add(lamp(4.0)).unwrap();

    let bytes = set.to_bytes();
    assert_eq!(bytes.len(), HEADER_BYTES + 2 * LIGHT_BYTES);
    assert_eq!(bytemuck::pod_read_unaligned::<u32>(&bytes[0..4]), 2);

    // position.w holds the kind tag
    assert_eq!(f32_at(&bytes, HEADER_BYTES + 12), KIND_DIRECTIONAL);
    assert_eq!(f32_at(&bytes, HEADER_BYTES + 20), -1.0);
    let second = HEADER_BYTES + LIGHT_BYTES;
    assert_eq!(f32_at(&bytes, second), 4.0);
    assert_eq!(f32_at(&bytes, second + 12), KIND_POINT);
}

#[test]
fn test_empty_set_uploads_header_only() {
    let mut cmd = RecordingCommandList::new();
    LightSet::new().upload(&mut cmd).unwrap();

    let expected = vec![0u8; HEADER_BYTES];
    assert_eq!(
        cmd.commands(),
        &[Command::UpdateUniforms { binding: LIGHTS_BINDING, data: expected }]
    );
}

#[test]
fn test_follow_camera_moves_bound_spots_only() {
    let start = camera_at(Vec3::ZERO, Vec3::NEG_Z);
    let mut set = LightSet::new();
    let lamp_key = set.add(lamp(1.0)).unwrap();
    let torch = set.add(Light::flashlight(&start, white(), Attenuation::default(), 12.5, 15.0)).unwrap();

    set.follow_camera(&camera_at(Vec3::new(0.0, 2.0, 5.0), Vec3::NEG_Z));

    assert_eq!(set.get(torch).unwrap().position(), Some(Vec3::new(0.0, 2.0, 5.0)));
    assert_eq!(set.get(lamp_key).unwrap().position(), Some(Vec3::new(1.0, 3.0, 0.0)));
}

// ============================================================================
// TOML description
// ============================================================================

const DESCRIPTION: &str = r#"
[[spot]]
diffuse = [1.0, 1.0, 1.0]
cutoff = 12.5
outer_cutoff = 15.0
follow_camera = true

[[point]]
position = [0.7, 3.2, 2.0]
diffuse = [0.8, 0.8, 0.8]
linear = 0.09
quadratic = 0.032
intensity = 2.0

[[directional]]
direction = [-0.2, -1.0, -0.3]
ambient = [0.05, 0.05, 0.05]
"#;

#[test]
fn test_from_toml_str_orders_by_kind() {
    let set = LightSet::from_toml_str(DESCRIPTION).unwrap();
    let kinds: Vec<_> = set.iter().map(|(_, light)| *light.kind()).collect();

    assert_eq!(kinds.len(), 3);
    assert!(matches!(kinds[0], LightKind::Directional { .. }));
    match kinds[1] {
        LightKind::Point { position, attenuation, intensity } => {
            assert!(close(position, Vec3::new(0.7, 3.2, 2.0)));
            assert_eq!(attenuation.constant, 1.0);
            assert!((attenuation.linear - 0.09).abs() < 1e-6);
            assert!((attenuation.quadratic - 0.032).abs() < 1e-6);
            assert_eq!(intensity, 2.0);
        }
        other => panic!("unexpected kind {:?}", other),
    }
    match kinds[2] {
        LightKind::Spot { direction, cut_off, outer_cut_off, follows_camera, .. } => {
            assert_eq!(direction, Vec3::NEG_Z);
            assert_eq!((cut_off, outer_cut_off), (12.5, 15.0));
            assert!(follows_camera);
        }
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_missing_color_terms_are_black() {
    let set = LightSet::from_toml_str(DESCRIPTION).unwrap();
    let (_, sun) = set.iter().next().unwrap();

    assert!(close(sun.color().ambient, Vec3::splat(0.05)));
    assert_eq!(sun.color().diffuse, Vec3::ZERO);
    assert_eq!(sun.color().specular, Vec3::ZERO);
}

#[test]
fn test_from_toml_str_errors() {
    let malformed = LightSet::from_toml_str("[[point]\nposition = 3");
    assert!(matches!(malformed, Err(Error::InvalidConfig(_))));

    let missing_field = LightSet::from_toml_str("[[spot]]\ncutoff = 10.0\n");
    assert!(matches!(missing_field, Err(Error::InvalidConfig(_))));

    let bad_cone = LightSet::from_toml_str("[[spot]]\ncutoff = 30.0\nouter_cutoff = 10.0\n");
    assert!(matches!(bad_cone, Err(Error::InvalidResource(_))));

    assert!(LightSet::from_toml_str("").unwrap().is_empty());
}

#[test]
fn test_load_missing_file() {
    let result = LightSet::load("definitely/not/here/lights.toml");
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}
