//! Central error handling for the relief viewer.
//!
//! Every variant is fatal at startup: generation happens once before the
//! viewer loop begins, so there is no runtime recovery path. Camera update
//! rejections are not errors and never appear here.

use std::fmt;
use std::path::PathBuf;

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Centralized error type for all viewer operations.
#[derive(thiserror::Error, Debug)]
pub enum ReliefError {
    #[error("cannot load heightmap {path}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("invalid grid dimensions {x_range}x{y_range}: both must be at least 2")]
    InvalidDimensions { x_range: u32, y_range: u32 },

    #[error("degenerate mesh {x_range}x{y_range}: cannot triangulate fewer than 2 cells per axis")]
    DegenerateMesh { x_range: u32, y_range: u32 },

    #[error("shader '{name}' failed to compile: {reason}")]
    ShaderCompile { name: String, reason: String },

    #[error("shader '{name}' is missing its {stage} stage")]
    MissingShaderStage { name: String, stage: ShaderStage },

    #[error("no shader named '{name}'")]
    UnknownShader { name: String },

    #[error("texture slot error: {0}")]
    TextureSlot(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReliefError {
    pub fn image_load<P: Into<PathBuf>, T: ToString>(path: P, reason: T) -> Self {
        ReliefError::ImageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn shader_compile<N: Into<String>, T: ToString>(name: N, reason: T) -> Self {
        ReliefError::ShaderCompile {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config<T: ToString>(msg: T) -> Self {
        ReliefError::Config(msg.to_string())
    }

    pub fn texture_slot<T: ToString>(msg: T) -> Self {
        ReliefError::TextureSlot(msg.to_string())
    }
}

/// Result type alias for viewer operations.
pub type ReliefResult<T> = Result<T, ReliefError>;
