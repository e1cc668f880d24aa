//! Error types for the Prism2D engine
//!
//! Every failure of the build-time pipeline (source loading, stage compilation,
//! program linking), of GPU initialization and of resource creation is reported
//! through [`Error`]. The variants keep the failure kinds apart so callers can
//! tell which one fired and read the raw driver diagnostic it carried.

use std::fmt;
use crate::graphics_device::ShaderStage;

/// Result type for Prism2D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prism2D engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required resource is missing (window, context, shader source, image)
    ResourceUnavailable(String),

    /// A shader stage failed to compile
    StageCompileError {
        /// Stage that failed
        stage: ShaderStage,
        /// Raw compiler diagnostic
        log: String,
    },

    /// The program failed to link (raw linker diagnostic)
    ProgramLinkError(String),

    /// GPU function loading or context creation failed
    GpuInitError(String),

    /// Invalid resource description (layout, texture size, channel count...)
    InvalidResource(String),

    /// Backend-specific error (object allocation failure, surface error...)
    BackendError(String),
}

impl Error {
    /// Short name of the failure kind, stable across messages
    pub fn kind(&self) -> &'static str {
        match self {
            Error::ResourceUnavailable(_) => "ResourceUnavailable",
            Error::StageCompileError { .. } => "StageCompileError",
            Error::ProgramLinkError(_) => "ProgramLinkError",
            Error::GpuInitError(_) => "GpuInitError",
            Error::InvalidResource(_) => "InvalidResource",
            Error::BackendError(_) => "BackendError",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ResourceUnavailable(msg) => write!(f, "Resource unavailable: {}", msg),
            Error::StageCompileError { stage, log } => {
                write!(f, "{} shader compile error:\n{}", stage, log)
            }
            Error::ProgramLinkError(log) => write!(f, "Shader program link error:\n{}", log),
            Error::GpuInitError(msg) => write!(f, "GPU initialization failed: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
