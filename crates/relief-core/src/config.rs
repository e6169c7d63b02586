//! Viewer configuration.
//!
//! Layered as defaults, then an optional JSON file, then command-line
//! overrides applied by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ReliefError, ReliefResult};
use crate::types::{GridResolution, Viewport};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view (degrees).
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: DEFAULT_FOV_Y_DEG,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
        }
    }
}

/// One named texture sampler bound to a texture unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSlotConfig {
    /// Sampler uniform name in the shader program.
    pub name: String,
    pub unit: u32,
    /// Asset path, relative to the texture directory unless absolute.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Root directory holding `heightmaps/`, `shaders/` and `textures/`.
    pub resources_dir: PathBuf,
    pub shader_name: String,
    pub map_name: String,
    /// Vertical scale applied to elevations by the model transform.
    pub height_scale: f32,
    /// Logical grid resolution. `None` samples at the image's own size.
    pub grid: Option<GridResolution>,
    /// Sea floor in elevation units. Clamps the mesh and bounds the camera.
    pub sea_level: Option<f32>,
    pub projection: ProjectionConfig,
    pub obj_color: [f32; 3],
    pub water_color: [f32; 3],
    /// When set, the model spins about the vertical axis once per period.
    pub turntable_period_secs: Option<f32>,
    pub textures: Vec<TextureSlotConfig>,
    pub frame_rate: u32,
    /// Stop the viewer loop after this many frames.
    pub max_frames: Option<u64>,
    pub viewport: Viewport,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
            shader_name: String::new(),
            map_name: String::new(),
            height_scale: DEFAULT_HEIGHT_SCALE,
            grid: None,
            sea_level: None,
            projection: ProjectionConfig::default(),
            obj_color: DEFAULT_OBJ_COLOR,
            water_color: DEFAULT_WATER_COLOR,
            turntable_period_secs: None,
            textures: Vec::new(),
            frame_rate: DEFAULT_FRAME_RATE,
            max_frames: None,
            viewport: Viewport::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ReliefResult<Self> {
        serde_json::from_str(json).map_err(ReliefError::config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> ReliefResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject configurations the viewer cannot start with.
    pub fn validate(&self) -> ReliefResult<()> {
        if self.shader_name.is_empty() {
            return Err(ReliefError::config("shader name is required"));
        }
        if self.map_name.is_empty() {
            return Err(ReliefError::config("heightmap name is required"));
        }
        if !(self.height_scale.is_finite() && self.height_scale > 0.0) {
            return Err(ReliefError::config(format!(
                "height scale must be positive, got {}",
                self.height_scale
            )));
        }
        if let Some(grid) = self.grid {
            if !grid.is_triangulable() {
                return Err(ReliefError::InvalidDimensions {
                    x_range: grid.x_range,
                    y_range: grid.y_range,
                });
            }
        }
        if let Some(sea_level) = self.sea_level {
            if !(sea_level.is_finite() && sea_level >= 0.0) {
                return Err(ReliefError::config(format!(
                    "sea level must be a non-negative elevation, got {sea_level}"
                )));
            }
        }
        let p = &self.projection;
        if !(p.fov_y_deg > 0.0 && p.fov_y_deg < 180.0) {
            return Err(ReliefError::config(format!(
                "field of view must be in (0, 180) degrees, got {}",
                p.fov_y_deg
            )));
        }
        if !(p.near > 0.0 && p.far > p.near) {
            return Err(ReliefError::config(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                p.near, p.far
            )));
        }
        if let Some(period) = self.turntable_period_secs {
            if !(period.is_finite() && period > 0.0) {
                return Err(ReliefError::config("turntable period must be positive"));
            }
        }
        if self.frame_rate == 0 {
            return Err(ReliefError::config("frame rate must be positive"));
        }
        Ok(())
    }

    /// `<resources>/heightmaps/<map_name>.png`
    pub fn heightmap_path(&self) -> PathBuf {
        self.resources_dir
            .join(HEIGHTMAP_DIR)
            .join(format!("{}.{}", self.map_name, HEIGHTMAP_EXTENSION))
    }

    pub fn shader_dir(&self) -> PathBuf {
        self.resources_dir.join(SHADER_DIR)
    }

    pub fn texture_dir(&self) -> PathBuf {
        self.resources_dir.join(TEXTURE_DIR)
    }
}
