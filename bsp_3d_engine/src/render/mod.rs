/// Render module - interface to the external GPU collaborator
///
/// Mesh generation, texture loading and shader management live outside
/// the engine. Objects only reference them through opaque handles and
/// record their draw sequences into a `CommandList`.

mod handles;
mod command_list;
mod recording_command_list;

pub use handles::{MeshId, TextureId};
pub use command_list::{
    CommandList, DrawMode,
    MAX_TEXTURE_UNITS, MAX_PUSH_CONSTANT_BYTES, MAX_UNIFORM_BINDINGS, MAX_UNIFORM_BYTES,
};
pub use recording_command_list::{Command, RecordingCommandList};
