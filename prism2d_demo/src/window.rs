//! GlWindow - winit window with a current glutin GL context
//!
//! Events are pumped without blocking from inside the frame loop, so the
//! loop keeps the same poll/draw/swap shape on every platform winit can pump.

use std::num::NonZeroU32;
use std::time::Duration;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use prism_2d_engine::prism2d::frame::WindowContext;
use prism_2d_engine::prism2d::{Error, Result};
use prism_2d_engine::{engine_debug, engine_error, engine_info, engine_warn};

use crate::config::WindowConfig;

/// Window-side state touched by event handling
///
/// Field order is drop order: context and surface go before the window.
struct WindowState {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
    size: (u32, u32),
    close_requested: bool,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && event.logical_key == Key::Named(NamedKey::Escape) {
                    self.close_requested = true;
                }
            }
            WindowEvent::Resized(size) => {
                self.size = (size.width, size.height);
                if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                    self.surface.resize(&self.context, width, height);
                }
                engine_debug!("prism2d::window", "Framebuffer resized to {}x{}", size.width, size.height);
            }
            _ => {}
        }
    }
}

/// Desktop window owning the GL context
pub struct GlWindow {
    state: WindowState,
    event_loop: EventLoop<()>,
}

impl GlWindow {
    /// Create the window, make a core-profile context current and load GL
    ///
    /// # Errors
    ///
    /// - `ResourceUnavailable` when no window can be created
    /// - `GpuInitError` when context creation or function loading fails
    ///
    /// # Panics
    ///
    /// When the display reports no framebuffer config at all. glutin-winit's
    /// picker has to return a config, so this case can't become an error.
    pub fn new(config: &WindowConfig) -> Result<(GlWindow, glow::Context)> {
        let event_loop = EventLoop::new()
            .map_err(|e| unavailable(format!("event loop: {}", e)))?;

        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(&event_loop, ConfigTemplateBuilder::new(), |configs| {
                most_samples(configs, |config| config.num_samples())
                    .expect("no GL framebuffer config matches the template")
            })
            .map_err(|e| unavailable(format!("window: {}", e)))?;
        let window = window.ok_or_else(|| unavailable("window was not created".to_string()))?;

        let raw_handle = window
            .window_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| gpu_init(format!("window handle: {}", e)))?;
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_handle));

        let gl_display = gl_config.display();
        // SAFETY: the raw window handle stays valid, the window outlives the context
        let context = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| gpu_init(format!("OpenGL {}.{} core context: {}", major, minor, e)))?;

        let surface_attributes = window
            .build_surface_attributes(SurfaceAttributesBuilder::new())
            .map_err(|e| gpu_init(format!("surface attributes: {}", e)))?;
        // SAFETY: as above
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| gpu_init(format!("window surface: {}", e)))?;

        let context = context
            .make_current(&surface)
            .map_err(|e| gpu_init(format!("make current: {}", e)))?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            engine_warn!("prism2d::window", "Could not set swap interval: {}", e);
        }

        if gl_display.get_proc_address(c"glCreateShader").is_null() {
            return Err(gpu_init("glCreateShader did not resolve".to_string()));
        }
        // SAFETY: the context is current on this thread
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        let size = window.inner_size();
        engine_info!("prism2d::window", "Window '{}' created ({}x{})", config.title, size.width, size.height);

        let state = WindowState {
            context,
            surface,
            window,
            size: (size.width, size.height),
            close_requested: false,
        };
        Ok((GlWindow { state, event_loop }, gl))
    }
}

/// Config with the most MSAA samples; the first one wins a tie
fn most_samples<T>(configs: impl Iterator<Item = T>, samples: impl Fn(&T) -> u8) -> Option<T> {
    configs.reduce(|best, next| if samples(&next) > samples(&best) { next } else { best })
}

fn unavailable(message: String) -> Error {
    engine_error!("prism2d::window", "Window creation failed: {}", message);
    Error::ResourceUnavailable(message)
}

fn gpu_init(message: String) -> Error {
    engine_error!("prism2d::window", "GL initialization failed: {}", message);
    Error::GpuInitError(message)
}

impl WindowContext for GlWindow {
    fn poll_events(&mut self) {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state);
        if let PumpStatus::Exit(code) = status {
            engine_debug!("prism2d::window", "Event loop exited with code {}", code);
            self.state.close_requested = true;
        }
    }

    fn should_close(&self) -> bool {
        self.state.close_requested
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.state
            .surface
            .swap_buffers(&self.state.context)
            .map_err(|e| Error::BackendError(format!("swap buffers: {}", e)))
    }

    fn set_title(&mut self, title: &str) {
        self.state.window.set_title(title);
    }

    fn size(&self) -> (u32, u32) {
        self.state.size
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
