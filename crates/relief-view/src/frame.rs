//! Per-frame transform composition.
//!
//! `tr_matrix = projection · view · rotation · translation · scale`, where the
//! translation centers the grid on the focus point and the scale applies the
//! height factor to `z` only.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};
use relief_core::config::{ProjectionConfig, ViewerConfig};
use relief_core::constants::{DEFAULT_OBJ_COLOR, DEFAULT_WATER_COLOR, MODEL_Z_OFFSET};
use relief_core::error::ReliefResult;
use relief_core::types::GridResolution;
use relief_terrain::TerrainMesh;

use crate::camera::OrbitCamera;
use crate::textures::TextureTable;

/// Values written to the program's uniforms each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub tr_matrix: Mat4,
    pub obj_color: Vec3,
    pub water_color: Vec3,
}

/// Primitive topology for the terrain draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleStrip,
    TriangleList,
}

/// How the terrain index buffer is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub topology: Topology,
    pub index_count: usize,
    /// Index value that restarts the primitive, as seen by the GPU.
    pub primitive_restart: Option<u32>,
}

impl DrawCall {
    /// Strip draw over the whole index buffer with 32-bit restart.
    pub fn for_mesh(mesh: &TerrainMesh) -> Self {
        Self {
            topology: Topology::TriangleStrip,
            index_count: mesh.indices().len(),
            primitive_restart: Some(u32::MAX),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub time_secs: f32,
    pub eye: Vec3,
    pub aspect_ratio: f32,
    pub uniforms: FrameUniforms,
}

/// The rendering collaborator: owns GPU resources and issues draws.
pub trait FrameSink {
    /// Called once before the first frame.
    fn upload(
        &mut self,
        mesh: &TerrainMesh,
        draw: &DrawCall,
        textures: &TextureTable,
    ) -> ReliefResult<()>;

    /// Called once per frame.
    fn submit(&mut self, frame: &Frame) -> ReliefResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameComposer {
    resolution: GridResolution,
    height_scale: f32,
    projection: ProjectionConfig,
    obj_color: Vec3,
    water_color: Vec3,
    turntable_period_secs: Option<f32>,
}

impl FrameComposer {
    pub fn new(resolution: GridResolution, height_scale: f32) -> Self {
        Self {
            resolution,
            height_scale,
            projection: ProjectionConfig::default(),
            obj_color: Vec3::from_array(DEFAULT_OBJ_COLOR),
            water_color: Vec3::from_array(DEFAULT_WATER_COLOR),
            turntable_period_secs: None,
        }
    }

    pub fn from_config(config: &ViewerConfig, resolution: GridResolution) -> Self {
        Self {
            resolution,
            height_scale: config.height_scale,
            projection: config.projection,
            obj_color: Vec3::from_array(config.obj_color),
            water_color: Vec3::from_array(config.water_color),
            turntable_period_secs: config.turntable_period_secs,
        }
    }

    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_turntable(mut self, period_secs: Option<f32>) -> Self {
        self.turntable_period_secs = period_secs;
        self
    }

    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// World-space height of a mesh elevation after the model transform.
    pub fn world_height(&self, elevation: f32) -> f32 {
        elevation * self.height_scale + MODEL_Z_OFFSET
    }

    /// OpenGL-convention perspective projection.
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        let p = &self.projection;
        Mat4::perspective_rh_gl(p.fov_y_deg.to_radians(), aspect_ratio, p.near, p.far)
    }

    pub fn model_matrix(&self, time_secs: f32) -> Mat4 {
        let rotation = match self.turntable_period_secs {
            Some(period) => Mat4::from_rotation_z(time_secs / period * TAU),
            None => Mat4::IDENTITY,
        };
        let translation = Mat4::from_translation(Vec3::new(
            -(self.resolution.x_range as f32) / 2.0,
            -(self.resolution.y_range as f32) / 2.0,
            MODEL_Z_OFFSET,
        ));
        let scale = Mat4::from_scale(Vec3::new(1.0, 1.0, self.height_scale));
        rotation * translation * scale
    }

    pub fn compose(
        &self,
        index: u64,
        time_secs: f32,
        camera: &OrbitCamera,
        aspect_ratio: f32,
    ) -> Frame {
        let tr_matrix = self.projection_matrix(aspect_ratio)
            * camera.view_matrix()
            * self.model_matrix(time_secs);
        Frame {
            index,
            time_secs,
            eye: camera.eye(),
            aspect_ratio,
            uniforms: FrameUniforms {
                tr_matrix,
                obj_color: self.obj_color,
                water_color: self.water_color,
            },
        }
    }
}
