//! Headless fly-through of the default scene.
//!
//! Builds the catalog scene around a table anchor, then moves a camera
//! down the -Z axis, recording every frame into a `RecordingCommandList`
//! and logging the per-frame counters. The frustum filter is toggled
//! every `FILTER_TOGGLE_FRAMES` frames to compare both query modes.
//! Lights come from `lights.toml`; the flashlight is switched off for the
//! second half of the run.

use bsp_3d_engine::bsp3d::Result;
use bsp_3d_engine::bsp3d::camera::Camera;
use bsp_3d_engine::bsp3d::render::RecordingCommandList;
use bsp_3d_engine::bsp3d::scene::{self, ForwardDrawer, LightKind, LightSet, Scene, SceneCatalog, SceneConfig};
use bsp_3d_engine::glam::{Mat4, Vec3};
use bsp_3d_engine::{engine_error, engine_info};

const FRAME_COUNT: usize = 120;
const FRAME_TIME: f32 = 1.0 / 60.0;
const CAMERA_SPEED: f32 = 3.0;
const FILTER_TOGGLE_FRAMES: usize = 30;
const LIGHTS: &str = include_str!("../lights.toml");

fn main() {
    if let Err(err) = run() {
        engine_error!("bsp3d_demo", "Demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut scene = Scene::new(scene::table(Mat4::IDENTITY)?, SceneConfig::default())?;
    let inserted = scene.initialize(&SceneCatalog::default())?;
    scene.add_backdrop(scene::walls()?);
    scene.set_lights(LightSet::from_toml_str(LIGHTS)?);

    engine_info!("bsp3d_demo",
        "Scene ready: {} objects inserted, partition depth {}, {} lights",
        inserted, scene.tree().depth(), scene.lights().len());

    let flashlight = scene.lights()
        .iter()
        .find(|(_, light)| matches!(light.kind(), LightKind::Spot { follows_camera: true, .. }))
        .map(|(key, _)| key);

    let mut camera = Camera::from_euler(
        Vec3::new(0.0, 3.4, 6.2),
        -90.0,
        -8.0,
        Vec3::Y,
        75f32.to_radians(),
    );
    let drawer = ForwardDrawer::new();
    let mut cmd = RecordingCommandList::new();

    for frame in 0..FRAME_COUNT {
        let apply_filter = (frame / FILTER_TOGGLE_FRAMES) % 2 == 0;

        if frame == FRAME_COUNT / 2 {
            if let Some(key) = flashlight {
                if let Some(light) = scene.lights_mut().get_mut(key) {
                    light.set_enabled(false);
                    engine_info!("bsp3d_demo", "Flashlight off");
                }
            }
        }

        cmd.clear();
        let stats = scene.render_frame(&camera, apply_filter, FRAME_TIME, &drawer, &mut cmd)?;

        if frame % 10 == 0 {
            engine_info!("bsp3d_demo",
                "frame {:3} z={:6.2} filter={:5} visible={:2} animated={:2} draws={:3} (high {}, low {}, culled {})",
                frame, camera.position().z, apply_filter,
                stats.visible_objects, stats.animated_objects, stats.draw.draw_calls,
                stats.draw.high_detail, stats.draw.low_detail, stats.draw.lod_culled);
        }

        camera.set_position(camera.position() + Vec3::NEG_Z * (CAMERA_SPEED * FRAME_TIME));
    }

    engine_info!("bsp3d_demo", "Fly-through done ({} frames)", FRAME_COUNT);
    Ok(())
}
