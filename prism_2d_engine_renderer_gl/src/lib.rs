/*!
# Prism 2D Engine - OpenGL Renderer Backend

OpenGL implementation of the `prism_2d_engine` [`GraphicsDevice`] seam, built
on `glow`. The caller creates the window and the GL context, makes the context
current and hands the loaded `glow::Context` to [`GlGraphicsDevice::new`].

```no_run
use prism_2d_engine_renderer_gl::prism2d::GlGraphicsDevice;

fn wrap(gl: glow::Context) -> GlGraphicsDevice {
    GlGraphicsDevice::new(gl)
}
```

[`GraphicsDevice`]: prism_2d_engine::prism2d::GraphicsDevice
[`GlGraphicsDevice::new`]: crate::prism2d::GlGraphicsDevice::new
*/

mod gl_conversions;
mod gl_graphics_device;

pub mod prism2d {
    pub use crate::gl_graphics_device::GlGraphicsDevice;
}
