/*!
# Prism 2D Engine

Core types for the Prism2D textured-quad renderer.

This crate owns the shader program lifecycle and the render-state orchestration
of a small rasterization pipeline. Every GPU call goes through the
[`GraphicsDevice`](crate::graphics_device::GraphicsDevice) trait, so the same
code runs on a real OpenGL backend (`prism_2d_engine_renderer_gl`) or on the
recording mock used by the tests.

## Architecture

- **SourceLoader / StageCompiler / ProgramLinker**: build-time shader pipeline
- **ShaderProgram**: one linked program, activation and uniform uploads
- **GeometryBuffer**: vertex array, vertex/index buffers and attribute layout
- **TextureUnit**: one texture bound to a fixed slot, with its mip chain
- **FrameLoop**: Running/Stopped per-frame sequence driven by a `WindowContext`

Windowing and image decoding are external collaborators, described here as the
`WindowContext` and `ImageDecoder` traits.
*/

mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod shader;
pub mod resource;
pub mod frame;

/// Public namespace; applications import from here
pub mod prism2d {
    pub use crate::error::{Error, Result};

    pub use crate::engine::Engine;

    pub use crate::graphics_device::GraphicsDevice;

    // Macros live at the crate root
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod shader {
        pub use crate::shader::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    pub mod frame {
        pub use crate::frame::*;
    }
}

pub use glam;
