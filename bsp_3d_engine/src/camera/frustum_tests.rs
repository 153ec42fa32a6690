use glam::Vec3;
use super::*;

fn camera_at_origin(fov_degrees: f32) -> Camera {
    Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, fov_degrees.to_radians())
}

// ============================================================================
// FrustumConfig
// ============================================================================

#[test]
fn test_default_config() {
    let config = FrustumConfig::default();
    assert_eq!(config.near, 0.1);
    assert_eq!(config.far, 100.0);
    assert!((config.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_rejects_bad_values() {
    let bad = [
        FrustumConfig { near: 0.0, ..FrustumConfig::default() },
        FrustumConfig { near: 5.0, far: 5.0, ..FrustumConfig::default() },
        FrustumConfig { aspect_ratio: -1.0, ..FrustumConfig::default() },
        FrustumConfig { far: f32::INFINITY, ..FrustumConfig::default() },
        FrustumConfig { near: f32::NAN, ..FrustumConfig::default() },
    ];

    for config in bad {
        match config.validate() {
            Err(Error::InvalidConfig(_)) => {}
            other => panic!("expected InvalidConfig for {:?}, got {:?}", config, other),
        }
    }
}

// ============================================================================
// Reference points
// ============================================================================

#[test]
fn test_reference_points_layout() {
    let camera = camera_at_origin(90.0);
    let config = FrustumConfig { near: 1.0, far: 10.0, aspect_ratio: 2.0 };
    let frustum = Frustum::from_camera(&camera, &config);

    // halfV = 1 * tan(45°) = 1, halfH = 2; right = forward × up = +X
    let eps = 1e-5;
    assert!((frustum.points[POINT_TOP] - Vec3::new(0.0, 1.0, -1.0)).length() < eps);
    assert!((frustum.points[POINT_BOTTOM] - Vec3::new(0.0, -1.0, -1.0)).length() < eps);
    assert!((frustum.points[POINT_RIGHT] - Vec3::new(2.0, 0.0, -1.0)).length() < eps);
    assert!((frustum.points[POINT_LEFT] - Vec3::new(-2.0, 0.0, -1.0)).length() < eps);
    assert!((frustum.points[POINT_NEAR] - Vec3::new(0.0, 0.0, -1.0)).length() < eps);
    assert!((frustum.points[POINT_FAR] - Vec3::new(0.0, 0.0, -10.0)).length() < eps);
    assert_eq!(frustum.origin, Vec3::ZERO);
}

// ============================================================================
// contains_point
// ============================================================================

#[test]
fn test_on_axis_point_is_visible() {
    let camera = Camera::new(
        Vec3::new(3.0, 1.0, 2.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::Y,
        90.0f32.to_radians(),
    );
    let point = camera.position() + camera.forward() * 50.0;

    assert!(Frustum::is_point_visible(point, &camera, &FrustumConfig::default()));
}

#[test]
fn test_point_behind_camera_is_not_visible() {
    let camera = camera_at_origin(90.0);
    assert!(!Frustum::is_point_visible(Vec3::new(0.0, 0.0, 5.0), &camera, &FrustumConfig::default()));
}

#[test]
fn test_points_far_to_the_side_are_not_visible() {
    let camera = camera_at_origin(90.0);
    let frustum = Frustum::from_camera(&camera, &FrustumConfig::default());

    assert!(!frustum.contains_point(Vec3::new(100.0, 0.0, -1.0)));
    assert!(!frustum.contains_point(Vec3::new(-100.0, 0.0, -1.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 100.0, -1.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, -100.0, -1.0)));
}

#[test]
fn test_eye_position_is_visible() {
    // Zero vector dotted with anything is 0, which passes `>= 0`
    let camera = camera_at_origin(60.0);
    assert!(Frustum::is_point_visible(Vec3::ZERO, &camera, &FrustumConfig::default()));
}

#[test]
fn test_heuristic_admits_point_outside_true_fov() {
    // 75° vertical FOV → half angle 37.5°. A point 50° above the axis is
    // outside the real view volume but within 90° of every reference direction.
    let camera = camera_at_origin(75.0);
    let up_50 = 50.0f32.to_radians().tan();
    let point = Vec3::new(0.0, up_50, -1.0) * 10.0;

    assert!(Frustum::is_point_visible(point, &camera, &FrustumConfig::default()));
}

#[test]
fn test_heuristic_does_not_bound_depth() {
    // Past the far distance but on-axis: the far reference only tests direction.
    let camera = camera_at_origin(90.0);
    let point = Vec3::new(0.0, 0.0, -500.0);

    assert!(Frustum::is_point_visible(point, &camera, &FrustumConfig::default()));
}
