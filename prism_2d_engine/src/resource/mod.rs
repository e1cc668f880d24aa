/// Resource module - GPU-side geometry, textures and the per-scene bundle

pub mod geometry_buffer;
pub mod texture_unit;
pub mod image_decoder;
pub mod render_resources;

pub use geometry_buffer::*;
pub use texture_unit::*;
pub use image_decoder::*;
pub use render_resources::*;
