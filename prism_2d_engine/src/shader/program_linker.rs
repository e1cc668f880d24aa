/// ProgramLinker - links compiled stages into a program object

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, ProgramKey};
use crate::shader::CompiledStage;
use crate::{engine_debug, engine_error};

/// Links stages into programs
pub struct ProgramLinker;

impl ProgramLinker {
    /// Attach `stages` to a new program and link it
    ///
    /// Every stage object is deleted afterwards, whether linking succeeded or
    /// not. A program that failed to link is deleted as well, so a failed call
    /// leaves nothing alive on the device.
    pub fn link(device: &dyn GraphicsDevice, stages: Vec<CompiledStage>) -> Result<ProgramKey> {
        let program = match device.create_program() {
            Ok(program) => program,
            Err(err) => {
                for stage in stages {
                    stage.release(device);
                }
                engine_error!("prism2d::shader", "Failed to create program object: {}", err);
                return Err(err);
            }
        };

        for stage in &stages {
            device.attach_stage(program, stage.key());
        }

        let linked = device.link_program(program);

        for stage in stages {
            stage.release(device);
        }

        if !linked {
            let log = device.program_info_log(program);
            device.delete_program(program);
            engine_error!("prism2d::shader", "Shader program link error:\n{}", log);
            return Err(Error::ProgramLinkError(log));
        }

        engine_debug!("prism2d::shader", "Program linked");
        Ok(program)
    }
}

#[cfg(test)]
#[path = "program_linker_tests.rs"]
mod tests;
