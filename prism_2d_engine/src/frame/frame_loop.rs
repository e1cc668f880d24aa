/// FrameLoop - the Running/Stopped per-frame sequence

use std::time::{Duration, Instant};

use crate::error::Result;
use crate::frame::WindowContext;
use crate::graphics_device::{GraphicsDevice, UniformValue};
use crate::resource::RenderResources;
use crate::{engine_debug, engine_info};

const FPS_INTERVAL: Duration = Duration::from_secs(1);

/// Loop state; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Running,
    Stopped,
}

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLoopConfig {
    /// Colour the framebuffer is cleared to every frame
    pub clear_color: [f32; 4],
    /// Initial viewport size in pixels
    pub viewport: (u32, u32),
    /// Base title for the once-a-second FPS title update (`None` = off)
    pub title_fps: Option<String>,
}

impl Default for FrameLoopConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.5, 0.7, 0.8, 1.0],
            viewport: (800, 600),
            title_fps: None,
        }
    }
}

/// Per-frame timing handed to the uniform callback of [`FrameLoop::run`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// 0 for the first frame
    pub index: u64,
    /// Seconds since the loop's first frame
    pub elapsed: f32,
}

/// Counters kept by the loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames presented
    pub frames: u64,
    /// Draw calls issued
    pub draw_calls: u64,
}

/// Per-frame driver
///
/// Each Running frame polls the window, clears, activates the program,
/// uploads the frame's uniforms, binds every texture to its slot, draws the
/// geometry once and presents. The transition to `Stopped` happens exactly
/// once, on the first poll that sees a close request, and nothing is drawn
/// in that frame or after it.
pub struct FrameLoop {
    config: FrameLoopConfig,
    state: FrameState,
    stats: FrameStats,
    viewport: (u32, u32),
    viewport_dirty: bool,
    started: Option<Instant>,
    fps_window: Option<(Instant, u64)>,
}

impl FrameLoop {
    pub fn new(config: FrameLoopConfig) -> Self {
        let viewport = config.viewport;
        Self {
            config,
            state: FrameState::Running,
            stats: FrameStats::default(),
            viewport,
            viewport_dirty: true,
            started: None,
            fps_window: None,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn config(&self) -> &FrameLoopConfig {
        &self.config
    }

    /// Current viewport size
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Change the viewport; applied at the start of the next frame
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if self.viewport != (width, height) {
            self.viewport = (width, height);
            self.viewport_dirty = true;
        }
    }

    /// Run one iteration of the loop
    ///
    /// A no-op returning `Stopped` once the loop has stopped.
    ///
    /// # Errors
    ///
    /// Only a failed buffer swap; the loop stays `Running` and the caller
    /// decides whether to retry or tear down.
    pub fn run_frame(
        &mut self,
        window: &mut dyn WindowContext,
        device: &dyn GraphicsDevice,
        resources: &RenderResources,
        uniforms: &[(&str, UniformValue)],
    ) -> Result<FrameState> {
        if self.state == FrameState::Stopped {
            return Ok(FrameState::Stopped);
        }

        window.poll_events();
        if window.should_close() {
            self.state = FrameState::Stopped;
            engine_info!("prism2d::frame", "Close requested, frame loop stopped after {} frames ({} draw calls)",
                self.stats.frames, self.stats.draw_calls);
            return Ok(FrameState::Stopped);
        }

        let now = Instant::now();
        if self.started.is_none() {
            self.started = Some(now);
        }

        let (width, height) = window.size();
        if width > 0 && height > 0 {
            self.set_viewport(width, height);
        }
        if self.viewport_dirty {
            device.set_viewport(0, 0, self.viewport.0, self.viewport.1);
            self.viewport_dirty = false;
            engine_debug!("prism2d::frame", "Viewport set to {}x{}", self.viewport.0, self.viewport.1);
        }

        device.clear(self.config.clear_color);

        let program = resources.program();
        program.activate(device);
        for (name, value) in uniforms {
            program.set_uniform(device, name, *value);
        }

        for texture in resources.textures() {
            texture.bind(device);
        }

        resources.geometry().draw(device);
        self.stats.draw_calls += 1;

        window.swap_buffers()?;
        self.stats.frames += 1;

        self.update_fps_title(window, now);

        Ok(FrameState::Running)
    }

    /// Drive `run_frame` until the loop stops
    ///
    /// `per_frame` is called once per Running frame, before drawing, and
    /// returns the uniforms to upload for that frame.
    pub fn run<'a, F>(
        &mut self,
        window: &mut dyn WindowContext,
        device: &dyn GraphicsDevice,
        resources: &RenderResources,
        mut per_frame: F,
    ) -> Result<FrameStats>
    where
        F: FnMut(&FrameInfo) -> Vec<(&'a str, UniformValue)>,
    {
        engine_info!("prism2d::frame", "Frame loop started");
        while self.state == FrameState::Running {
            let info = FrameInfo {
                index: self.stats.frames,
                elapsed: self.started.map_or(0.0, |start| start.elapsed().as_secs_f32()),
            };
            let uniforms = per_frame(&info);
            self.run_frame(window, device, resources, &uniforms)?;
        }
        Ok(self.stats)
    }

    fn update_fps_title(&mut self, window: &mut dyn WindowContext, now: Instant) {
        let Some(base) = self.config.title_fps.as_deref() else {
            return;
        };
        let (window_start, window_frames) = *self.fps_window.get_or_insert((now, self.stats.frames));
        let elapsed = now.duration_since(window_start);
        if elapsed < FPS_INTERVAL {
            return;
        }
        let fps = (self.stats.frames - window_frames) as f64 / elapsed.as_secs_f64();
        window.set_title(&fps_title(base, fps));
        self.fps_window = Some((now, self.stats.frames));
    }
}

/// Window title with the frame rate appended
pub fn fps_title(base: &str, fps: f64) -> String {
    format!("{} - {:.0} FPS", base, fps)
}

#[cfg(test)]
#[path = "frame_loop_tests.rs"]
mod tests;
