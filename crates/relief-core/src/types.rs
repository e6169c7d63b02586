//! Fundamental grid and vertex types.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::{INDICES_PER_QUAD, MIN_GRID_DIMENSION};

/// Logical grid resolution, independent of the source image's pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridResolution {
    /// Number of cells along x (fast axis of the vertex buffer).
    pub x_range: u32,
    /// Number of cells along y (slow axis of the vertex buffer).
    pub y_range: u32,
}

impl GridResolution {
    pub fn new(x_range: u32, y_range: u32) -> Self {
        Self { x_range, y_range }
    }

    /// True when at least one quad, and therefore one triangle, can be formed.
    pub fn is_triangulable(&self) -> bool {
        self.x_range >= MIN_GRID_DIMENSION && self.y_range >= MIN_GRID_DIMENSION
    }

    /// Row-major vertex index; y is the slow dimension.
    pub fn vertex_index(&self, x_i: u32, y_i: u32) -> usize {
        y_i as usize * self.x_range as usize + x_i as usize
    }

    pub fn vertex_count(&self) -> usize {
        self.x_range as usize * self.y_range as usize
    }

    pub fn quad_count(&self) -> usize {
        if !self.is_triangulable() {
            return 0;
        }
        (self.x_range as usize - 1) * (self.y_range as usize - 1)
    }

    pub fn triangle_count(&self) -> usize {
        2 * self.quad_count()
    }

    /// Number of primitive restart markers, one per completed row of quads.
    pub fn restart_count(&self) -> usize {
        if !self.is_triangulable() {
            return 0;
        }
        self.y_range as usize - 1
    }

    /// Exact index buffer length: `3*2*(x-1)*(y-1) + (y-1)`.
    pub fn index_count(&self) -> usize {
        INDICES_PER_QUAD * self.quad_count() + self.restart_count()
    }

    /// Indices emitted for one row of quads, including its restart marker.
    pub fn indices_per_row(&self) -> usize {
        if !self.is_triangulable() {
            return 0;
        }
        INDICES_PER_QUAD * (self.x_range as usize - 1) + 1
    }
}

/// Terrain vertex as uploaded to the GPU (`3f 3f`: position, normal).
///
/// `normal` is the unnormalized sum of adjacent face normals. The shading
/// stage normalizes it.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Zeroable, Pod)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl TerrainVertex {
    pub fn new(position: [f32; 3]) -> Self {
        Self {
            position,
            normal: [0.0; 3],
        }
    }

    pub fn position(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.normal)
    }
}

/// Framebuffer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Shrink one side so the viewport matches `aspect` (width / height).
    pub fn fit_to_aspect(&self, aspect: f32) -> Viewport {
        let mut width = self.width;
        let mut height = self.height;
        if width > height * aspect {
            width = height * aspect;
        } else {
            height = width / aspect;
        }
        Viewport { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}
