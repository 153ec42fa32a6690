/// RecordingCommandList: a CommandList that stores commands in memory.
///
/// Used as the headless backend of the demo and as a test double.
/// Enforces the same limits a GPU backend would (texture units,
/// push constant range, uniform bindings and size).

use crate::error::Result;
use crate::engine_bail;
use super::command_list::{
    CommandList, DrawMode,
    MAX_TEXTURE_UNITS, MAX_PUSH_CONSTANT_BYTES, MAX_UNIFORM_BINDINGS, MAX_UNIFORM_BYTES,
};
use super::handles::{MeshId, TextureId};

/// A recorded command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    BindTexture { unit: u32, texture: TextureId },
    PushConstants { offset: u32, data: Vec<u8> },
    UpdateUniforms { binding: u32, data: Vec<u8> },
    Draw { mesh: MeshId, mode: DrawMode },
}

/// In-memory command recorder
#[derive(Debug, Default)]
pub struct RecordingCommandList {
    commands: Vec<Command>,
}

impl RecordingCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// All recorded commands in submission order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Recorded draws only
    pub fn draws(&self) -> impl Iterator<Item = (MeshId, DrawMode)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Draw { mesh, mode } => Some((*mesh, *mode)),
            _ => None,
        })
    }

    /// Contents of the last uniform update recorded for `binding`
    pub fn uniforms(&self, binding: u32) -> Option<&[u8]> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::UpdateUniforms { binding: b, data } if *b == binding => Some(data.as_slice()),
            _ => None,
        })
    }

    /// Number of recorded draw commands
    pub fn draw_count(&self) -> usize {
        self.draws().count()
    }

    /// Drop all recorded commands (start of a new frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl CommandList for RecordingCommandList {
    fn bind_texture(&mut self, unit: u32, texture: TextureId) -> Result<()> {
        if unit >= MAX_TEXTURE_UNITS {
            engine_bail!("bsp3d::RecordingCommandList",
                "bind_texture: unit {} out of range (max {})", unit, MAX_TEXTURE_UNITS);
        }
        self.commands.push(Command::BindTexture { unit, texture });
        Ok(())
    }

    fn push_constants(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        let end = offset as usize + data.len();
        if end > MAX_PUSH_CONSTANT_BYTES as usize {
            engine_bail!("bsp3d::RecordingCommandList",
                "push_constants: range {}..{} exceeds {} bytes", offset, end, MAX_PUSH_CONSTANT_BYTES);
        }
        self.commands.push(Command::PushConstants { offset, data: data.to_vec() });
        Ok(())
    }

    fn update_uniforms(&mut self, binding: u32, data: &[u8]) -> Result<()> {
        if binding >= MAX_UNIFORM_BINDINGS {
            engine_bail!("bsp3d::RecordingCommandList",
                "update_uniforms: binding {} out of range (max {})", binding, MAX_UNIFORM_BINDINGS);
        }
        if data.len() > MAX_UNIFORM_BYTES {
            engine_bail!("bsp3d::RecordingCommandList",
                "update_uniforms: {} bytes exceeds {}", data.len(), MAX_UNIFORM_BYTES);
        }
        self.commands.push(Command::UpdateUniforms { binding, data: data.to_vec() });
        Ok(())
    }

    fn draw_mesh(&mut self, mesh: MeshId, mode: DrawMode) -> Result<()> {
        self.commands.push(Command::Draw { mesh, mode });
        Ok(())
    }
}

#[cfg(test)]
#[path = "recording_command_list_tests.rs"]
mod tests;
