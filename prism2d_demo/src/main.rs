//! Prism2D demo
//!
//! Opens an 800x600 OpenGL 4.1 core window and draws one of the demo scenes
//! until the window is closed (close button or Escape).
//!
//! Usage: `prism2d_demo [config.json] [--verbose]`

mod config;
mod image_loader;
mod scenes;
mod window;

use anyhow::Context;

use prism_2d_engine::prism2d::frame::{FrameLoop, FrameLoopConfig, WindowContext};
use prism_2d_engine::prism2d::log::LogSeverity;
use prism_2d_engine::prism2d::Engine;
use prism_2d_engine::{engine_error, engine_info};
use prism_2d_engine_renderer_gl::prism2d::GlGraphicsDevice;

use crate::config::{CliArgs, DemoConfig};
use crate::image_loader::ImageCrateDecoder;
use crate::window::GlWindow;

fn main() {
    if let Err(err) = run() {
        engine_error!("prism2d::demo", "{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1));
    let config = DemoConfig::load(args.config.as_deref())?;
    Engine::set_min_severity(if args.verbose { LogSeverity::Debug } else { config.log_severity() });

    let (mut window, gl) = GlWindow::new(&config.window).context("failed to open the demo window")?;
    let device = GlGraphicsDevice::new(gl);

    let resources = scenes::build(&device, &config, &ImageCrateDecoder)
        .with_context(|| format!("failed to build scene {:?}", config.scene))?;

    let mut frame_loop = FrameLoop::new(FrameLoopConfig {
        clear_color: config.clear_color,
        viewport: window.size(),
        title_fps: config.window.show_fps.then(|| config.window.title.clone()),
    });
    let result = frame_loop.run(&mut window, &device, &resources, |info| scenes::uniforms(config.scene, info));

    resources.destroy(&device);

    let stats = result.context("frame loop failed")?;
    engine_info!("prism2d::demo", "Exiting after {} frames", stats.frames);
    Ok(())
}
