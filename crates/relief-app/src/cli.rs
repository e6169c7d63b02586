//! Command-line flags layered over the JSON configuration.

use std::path::PathBuf;

use clap::Parser;
use relief_core::config::ViewerConfig;
use relief_core::error::ReliefResult;
use relief_core::types::GridResolution;

use crate::viewer_loop::LoopOptions;

/// Frames rendered by a headless run when neither flags nor config bound it.
pub const DEFAULT_HEADLESS_FRAMES: u64 = 600;

#[derive(Parser, Debug)]
#[command(name = "relief")]
#[command(about = "Renders a heightmap as a shaded 3D terrain with an orbit camera")]
pub struct Args {
    /// Shader program to use (`<resources>/shaders/<name>.vert` + `.frag`).
    #[arg(long, alias = "shader_name")]
    pub shader_name: Option<String>,

    /// Heightmap to load (`<resources>/heightmaps/<name>.png`).
    #[arg(long, alias = "map_name")]
    pub map_name: Option<String>,

    /// Vertical exaggeration applied by the model matrix.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Mesh resolution; defaults to the image size.
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub grid: Option<Vec<u32>>,

    /// Raise terrain below this elevation and keep the camera above it.
    #[arg(long)]
    pub sea_level: Option<f32>,

    /// JSON configuration applied before these flags.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Asset root.
    #[arg(long)]
    pub resources: Option<PathBuf>,

    /// JSON script of input events to replay.
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Spin the terrain once every N seconds.
    #[arg(long, value_name = "SECONDS")]
    pub turntable: Option<f32>,

    /// Render as fast as possible instead of holding the frame rate.
    #[arg(long)]
    pub no_pace: bool,
}

impl Args {
    /// Defaults, then `--config`, then the remaining flags.
    pub fn resolve(&self) -> ReliefResult<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        if let Some(dir) = &self.resources {
            config.resources_dir = dir.clone();
        }
        if let Some(name) = &self.shader_name {
            config.shader_name = name.clone();
        }
        if let Some(name) = &self.map_name {
            config.map_name = name.clone();
        }
        if let Some(scale) = self.height_scale {
            config.height_scale = scale;
        }
        if let Some(&[x, y]) = self.grid.as_deref() {
            config.grid = Some(GridResolution::new(x, y));
        }
        if self.sea_level.is_some() {
            config.sea_level = self.sea_level;
        }
        if self.turntable.is_some() {
            config.turntable_period_secs = self.turntable;
        }
        if self.frames.is_some() {
            config.max_frames = self.frames;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn loop_options(&self, config: &ViewerConfig) -> LoopOptions {
        LoopOptions {
            max_frames: Some(config.max_frames.unwrap_or(DEFAULT_HEADLESS_FRAMES)),
            frame_rate: config.frame_rate,
            pace: !self.no_pace,
        }
    }
}
