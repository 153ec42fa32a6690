//! Camera module: camera state, view-volume test, and render view.
//!
//! Provides passive data containers for the visibility pipeline.
//! The engine does NOT drive cameras (no input handling). The caller
//! owns the camera and refreshes it once per frame before querying.

mod camera;
mod frustum;
mod render_view;

pub use camera::Camera;
pub use frustum::{
    Frustum, FrustumConfig,
    POINT_TOP, POINT_BOTTOM, POINT_RIGHT, POINT_LEFT, POINT_NEAR, POINT_FAR,
};
pub use render_view::RenderView;
