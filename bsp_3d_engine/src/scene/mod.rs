//! Scene management module
//!
//! Provides the scene controller, the fixed-axis BSP partition, LOD
//! selection, scene objects with their animation, lights, the default
//! object catalog, and drawing strategies.

mod scene_object;
mod animation;
mod lod;
mod bsp_tree;
mod scene_config;
mod catalog;
mod drawer;
mod light;
mod scene;

pub use scene_object::{SceneObject, SceneObjectKey, ObjectKind, Behavior, RenderPart};
pub use animation::{Wander, DEFAULT_MAX_RADIUS};
pub use lod::{LodThresholds, LodLevel, LodSelector, LodMesh};
pub use bsp_tree::{BspTree, ObjectPositions, RemovalStrategy, DEFAULT_NORMAL};
pub use scene_config::{SceneConfig, DEFAULT_ANIMATION_SEED};
pub use catalog::{
    SceneCatalog, Placement, FIREFLY_SPEED,
    table, drink_box, popcorn_bucket, fire_flower, hammer, firefly, walls,
};
pub use drawer::{Drawer, ForwardDrawer, DrawStats, MVP_OFFSET, MODEL_OFFSET};
pub use light::{
    Light, LightKey, LightKind, LightColor, Attenuation, LightSet, GpuLight, GpuLightHeader,
    LightsConfig, DirectionalConfig, PointConfig, SpotConfig, ColorConfig,
    LIGHTS_BINDING, MAX_LIGHTS, KIND_DIRECTIONAL, KIND_POINT, KIND_SPOT,
};
pub use scene::{Scene, FrameStats};
