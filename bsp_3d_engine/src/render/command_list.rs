/// CommandList trait - for recording draw commands

use crate::error::Result;
use super::handles::{MeshId, TextureId};

/// Number of texture units a command list exposes
pub const MAX_TEXTURE_UNITS: u32 = 16;

/// Size of the push constant range in bytes (MVP + model matrix)
pub const MAX_PUSH_CONSTANT_BYTES: u32 = 128;

/// Number of uniform buffer bindings a command list exposes
pub const MAX_UNIFORM_BINDINGS: u32 = 4;

/// Largest uniform upload accepted in one call
pub const MAX_UNIFORM_BYTES: usize = 16 * 1024;

/// How a mesh is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Non-indexed draw over all vertices
    Arrays,
    /// Indexed draw over all indices
    Indexed,
}

/// Command list for recording draw commands
///
/// Implemented by the external GPU backend. Uniforms are updated once per
/// frame, then draws follow in the order produced by the partition traversal.
pub trait CommandList {
    /// Bind a texture to a texture unit
    ///
    /// # Arguments
    ///
    /// * `unit` - Texture unit (0 = diffuse, 1 = specular)
    /// * `texture` - Texture to bind
    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<()>;

    /// Push constants to the vertex stage
    ///
    /// # Arguments
    ///
    /// * `offset` - Offset in bytes into the push constant range
    /// * `data` - Bytes to write
    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()>;

    /// Replace the contents of a uniform buffer binding
    ///
    /// Used for per-frame data shared by every draw (the light block).
    ///
    /// # Arguments
    ///
    /// * `binding` - Uniform binding slot
    /// * `data` - Whole buffer contents
    fn update_uniforms(&mut self, binding: u32, data: &[u8]) -> Result<()>;

    /// Draw a mesh with the currently bound state
    fn draw_mesh(&mut self, mesh: MeshId, mode: DrawMode) -> Result<()>;
}
