/// SourceLoader - reads shader source text from disk

use std::path::Path;
use crate::error::{Error, Result};
use crate::graphics_device::ShaderStage;
use crate::{engine_debug, engine_error};

/// Shader source text tagged with its stage
///
/// Consumed by value by the stage compiler; not retained after compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    stage: ShaderStage,
    text: String,
}

impl ShaderSource {
    /// Wrap in-memory source text
    pub fn new(stage: ShaderStage, text: impl Into<String>) -> Self {
        Self { stage, text: text.into() }
    }

    /// Stage this source is meant for
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Source text, passed to the driver as-is
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Loads shader sources from files
pub struct SourceLoader;

impl SourceLoader {
    /// Read the whole file at `path` as UTF-8 text
    ///
    /// # Errors
    ///
    /// `ResourceUnavailable` naming the path when the file can't be read.
    pub fn load(path: impl AsRef<Path>, stage: ShaderStage) -> Result<ShaderSource> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                engine_debug!("prism2d::shader", "Loaded {} shader source {} ({} bytes)",
                    stage, path.display(), text.len());
                Ok(ShaderSource { stage, text })
            }
            Err(err) => {
                engine_error!("prism2d::shader", "Failed to open shader file: {} ({})",
                    path.display(), err);
                Err(Error::ResourceUnavailable(format!(
                    "shader file {}: {}",
                    path.display(),
                    err
                )))
            }
        }
    }
}

#[cfg(test)]
#[path = "source_loader_tests.rs"]
mod tests;
