/*!
# Bsp3D Engine

Scene visibility and level-of-detail core for a small, fixed 3D scene.

Each frame the engine decides *what* to draw, in *what order*, and at
*what detail*. It does not own a GPU: meshes, textures and shaders are
external, and draws are recorded through the `CommandList` trait.

## Architecture

- **BspTree**: fixed-axis binary space partition over scene objects,
  with camera-relative ordered traversal
- **Frustum**: coarse six-point half-space visibility test
- **LodSelector**: distance-based discrete LOD (high / low / none) per part
- **Scene**: object store, partition, backdrops and the per-frame loop
- **Drawer**: turns one object into commands (`ForwardDrawer` by default)
- **LightSet**: directional, point and spot lights, uploaded once per frame
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod render;
pub mod scene;

// Main bsp3d namespace module
pub mod bsp3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (global logging hub)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Camera, frustum and render view
    pub mod camera {
        pub use crate::camera::*;
    }

    // External GPU collaborator interface
    pub mod render {
        pub use crate::render::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
