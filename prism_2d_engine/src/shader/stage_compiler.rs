/// StageCompiler - compiles one shader stage into a GPU stage object

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ShaderStage, StageKey};
use crate::shader::ShaderSource;
use crate::{engine_debug, engine_error};

/// A successfully compiled stage object
///
/// Owned by the program linker, which deletes it after linking.
#[derive(Debug, PartialEq, Eq)]
pub struct CompiledStage {
    pub(crate) key: StageKey,
    pub(crate) stage: ShaderStage,
}

impl CompiledStage {
    /// Stage kind
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Device handle
    pub fn key(&self) -> StageKey {
        self.key
    }

    /// Delete the stage object
    pub fn release(self, device: &dyn GraphicsDevice) {
        device.delete_stage(self.key);
    }
}

/// Compiles shader sources
pub struct StageCompiler;

impl StageCompiler {
    /// Compile `source` into a stage object
    ///
    /// On failure the stage object is deleted before returning, and the error
    /// carries the stage kind and the driver's diagnostic text.
    pub fn compile(device: &dyn GraphicsDevice, source: ShaderSource) -> Result<CompiledStage> {
        let stage = source.stage();
        let key = device.create_stage(stage)?;

        if !device.compile_stage(key, source.text()) {
            let log = device.stage_info_log(key);
            device.delete_stage(key);
            engine_error!("prism2d::shader", "{} shader compile error:\n{}", stage, log);
            return Err(Error::StageCompileError { stage, log });
        }

        engine_debug!("prism2d::shader", "{} stage compiled", stage);
        Ok(CompiledStage { key, stage })
    }
}

#[cfg(test)]
#[path = "stage_compiler_tests.rs"]
mod tests;
