//! Demo configuration, loaded from a JSON file
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "scene": "rotating_quad", "window": { "vsync": false }, "log_level": "debug" }
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use prism_2d_engine::prism2d::device::{FilterMode, WrapMode};
use prism_2d_engine::prism2d::log::LogSeverity;

/// Scene drawn by the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Single positions-only triangle, non-indexed
    #[default]
    Triangle,
    /// Vertex-coloured indexed quad
    Quad,
    /// Quad mixing two textures
    TexturedQuad,
    /// Textured quad spinning around its centre
    RotatingQuad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapSetting {
    #[default]
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

impl From<WrapSetting> for WrapMode {
    fn from(wrap: WrapSetting) -> Self {
        match wrap {
            WrapSetting::Repeat => WrapMode::Repeat,
            WrapSetting::MirroredRepeat => WrapMode::MirroredRepeat,
            WrapSetting::ClampToEdge => WrapMode::ClampToEdge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterSetting {
    Nearest,
    #[default]
    Linear,
}

impl From<FilterSetting> for FilterMode {
    fn from(filter: FilterSetting) -> Self {
        match filter {
            FilterSetting::Nearest => FilterMode::Nearest,
            FilterSetting::Linear => FilterMode::Linear,
        }
    }
}

/// Window and GL context settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Requested core-profile version (major, minor)
    pub gl_version: (u8, u8),
    pub vsync: bool,
    /// Append the frame rate to the title once a second
    pub show_fps: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Learn OpenGL".to_string(),
            gl_version: (4, 1),
            vsync: true,
            show_fps: false,
        }
    }
}

/// Vertex/fragment source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

/// Top-level demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub scene: SceneKind,
    /// Shader files; the scene's built-in sources when absent
    pub shaders: Option<ShaderPaths>,
    /// Image files for the textured scenes, slot 0 first; generated
    /// checkerboards fill the missing slots
    pub textures: Vec<PathBuf>,
    /// Decode images with the first row at the bottom, as GL samples them
    pub flip_vertically: bool,
    pub wrap: WrapSetting,
    pub filter: FilterSetting,
    pub clear_color: [f32; 4],
    /// trace, debug, info, warn or error
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            scene: SceneKind::default(),
            shaders: None,
            textures: Vec::new(),
            flip_vertically: true,
            wrap: WrapSetting::default(),
            filter: FilterSetting::default(),
            clear_color: [0.5, 0.7, 0.8, 1.0],
            log_level: "info".to_string(),
        }
    }
}

impl DemoConfig {
    /// Parse a JSON document
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: DemoConfig = serde_json::from_str(text).context("invalid demo config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config file {}", path.display()))
    }

    /// Minimum log severity named by `log_level`
    pub fn log_severity(&self) -> LogSeverity {
        LogSeverity::parse(&self.log_level).unwrap_or(LogSeverity::Info)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            anyhow::bail!("window size {}x{} has a zero dimension", self.window.width, self.window.height);
        }
        if LogSeverity::parse(&self.log_level).is_none() {
            anyhow::bail!("unknown log level '{}'", self.log_level);
        }
        Ok(())
    }
}

/// Command line: `prism2d_demo [config.json] [--verbose]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl CliArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut cli = CliArgs::default();
        for arg in args {
            match arg.as_str() {
                "-v" | "--verbose" => cli.verbose = true,
                _ if cli.config.is_none() => cli.config = Some(PathBuf::from(arg)),
                _ => {}
            }
        }
        cli
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
