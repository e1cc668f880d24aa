/// ShaderProgram - one linked GPU program and its uniform uploads

use std::path::Path;
use glam::Mat4;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, ProgramKey, ShaderStage, UniformValue};
use crate::shader::{ProgramLinker, ShaderSource, SourceLoader, StageCompiler};
use crate::{engine_info, engine_trace};

/// A linked shader program
///
/// A value of this type is always fully linked: every failure during `build`
/// returns an error and leaves no stage or program object behind. Destroy it
/// explicitly with [`ShaderProgram::destroy`] before the context goes away.
///
/// # Example
///
/// ```no_run
/// use prism_2d_engine::prism2d::{GraphicsDevice, Result};
/// use prism_2d_engine::prism2d::shader::ShaderProgram;
///
/// fn setup(device: &dyn GraphicsDevice) -> Result<ShaderProgram> {
///     let program = ShaderProgram::build(device, "shaders/vert.glsl", "shaders/frag.glsl")?;
///     program.activate(device);
///     program.set_int(device, "texture1", 0);
///     Ok(program)
/// }
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct ShaderProgram {
    program: ProgramKey,
}

impl ShaderProgram {
    /// Load, compile and link a vertex/fragment pair from files
    ///
    /// # Errors
    ///
    /// - `ResourceUnavailable` if either file can't be read
    /// - `StageCompileError` tagged with the failing stage
    /// - `ProgramLinkError` with the linker diagnostic
    pub fn build(
        device: &dyn GraphicsDevice,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<ShaderProgram> {
        let vertex = SourceLoader::load(vertex_path, ShaderStage::Vertex)?;
        let fragment = SourceLoader::load(fragment_path, ShaderStage::Fragment)?;
        Self::from_sources(device, vertex, fragment)
    }

    /// Compile and link a vertex/fragment pair from in-memory text
    pub fn build_from_sources(
        device: &dyn GraphicsDevice,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<ShaderProgram> {
        Self::from_sources(
            device,
            ShaderSource::new(ShaderStage::Vertex, vertex_source),
            ShaderSource::new(ShaderStage::Fragment, fragment_source),
        )
    }

    fn from_sources(
        device: &dyn GraphicsDevice,
        vertex: ShaderSource,
        fragment: ShaderSource,
    ) -> Result<ShaderProgram> {
        let vertex = StageCompiler::compile(device, vertex)?;
        let fragment = match StageCompiler::compile(device, fragment) {
            Ok(fragment) => fragment,
            Err(err) => {
                vertex.release(device);
                return Err(err);
            }
        };

        let program = ProgramLinker::link(device, vec![vertex, fragment])?;
        engine_info!("prism2d::shader", "Shader program ready");
        Ok(ShaderProgram { program })
    }

    /// Device handle of the program
    pub fn key(&self) -> ProgramKey {
        self.program
    }

    /// Make this program current for subsequent draws (idempotent)
    pub fn activate(&self, device: &dyn GraphicsDevice) {
        device.use_program(self.program);
    }

    /// Write an `int` (or sampler) uniform
    pub fn set_int(&self, device: &dyn GraphicsDevice, name: &str, value: i32) {
        self.set_uniform(device, name, UniformValue::Int(value));
    }

    /// Write a `float` uniform
    pub fn set_float(&self, device: &dyn GraphicsDevice, name: &str, value: f32) {
        self.set_uniform(device, name, UniformValue::Float(value));
    }

    /// Write a `mat4` uniform
    pub fn set_mat4(&self, device: &dyn GraphicsDevice, name: &str, value: &Mat4) {
        self.set_uniform(device, name, UniformValue::Mat4(*value));
    }

    /// Resolve `name` and write `value` to the current program
    ///
    /// The location is looked up on every call. A name the program doesn't
    /// declare (or that the driver optimized away) is a silent no-op, matching
    /// the GL contract for location -1: shaders may omit optional uniforms.
    pub fn set_uniform(&self, device: &dyn GraphicsDevice, name: &str, value: UniformValue) {
        match device.uniform_location(self.program, name) {
            Some(location) => device.write_uniform(location, &value),
            None => engine_trace!("prism2d::shader", "Uniform '{}' not active, write skipped", name),
        }
    }

    /// Delete the program object
    pub fn destroy(self, device: &dyn GraphicsDevice) {
        device.delete_program(self.program);
    }
}

#[cfg(test)]
#[path = "shader_program_tests.rs"]
mod tests;
