/// RenderResources - everything one scene draws with

use crate::graphics_device::GraphicsDevice;
use crate::resource::{GeometryBuffer, TextureUnit};
use crate::shader::ShaderProgram;
use crate::engine_debug;

/// Program, geometry and textures drawn together each frame
///
/// Owns its GPU objects. Call [`RenderResources::destroy`] while the context
/// is still current; objects are released buffers first, then textures, then
/// the program.
#[derive(Debug)]
pub struct RenderResources {
    program: ShaderProgram,
    geometry: GeometryBuffer,
    textures: Vec<TextureUnit>,
}

impl RenderResources {
    pub fn new(program: ShaderProgram, geometry: GeometryBuffer, textures: Vec<TextureUnit>) -> Self {
        Self { program, geometry, textures }
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    /// Textures in slot order of insertion
    pub fn textures(&self) -> &[TextureUnit] {
        &self.textures
    }

    /// Release every GPU object in dependency order
    pub fn destroy(self, device: &dyn GraphicsDevice) {
        let texture_count = self.textures.len();
        self.geometry.destroy(device);
        for texture in self.textures {
            texture.destroy(device);
        }
        self.program.destroy(device);
        engine_debug!("prism2d::resource", "Render resources destroyed ({} textures)", texture_count);
    }
}

#[cfg(test)]
#[path = "render_resources_tests.rs"]
mod tests;
