//! GPU seam: the device trait, its typed handles and the descriptors passed through it

pub mod graphics_device;
pub mod handles;
pub mod shader;
pub mod buffer;
pub mod texture;
#[cfg(any(test, feature = "mock"))]
pub mod mock_graphics_device;

pub use graphics_device::*;
pub use handles::*;
pub use shader::*;
pub use buffer::*;
pub use texture::*;
#[cfg(any(test, feature = "mock"))]
pub use mock_graphics_device::*;
