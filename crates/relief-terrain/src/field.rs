//! HeightField: sampled elevations on the logical grid.

use glam::Vec3;
use relief_core::error::{ReliefError, ReliefResult};
use relief_core::types::GridResolution;

/// Immutable grid of elevations.
///
/// Each cell stores `(x_i, y_i, elevation)` so the mesh builder can take
/// positions directly. Cells are row-major with y as the slow dimension,
/// matching the vertex buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    resolution: GridResolution,
    cells: Vec<Vec3>,
}

impl HeightField {
    /// Build a field from per-cell elevations in row-major (y outer) order.
    pub fn from_elevations(resolution: GridResolution, elevations: &[f32]) -> ReliefResult<Self> {
        if !resolution.is_triangulable() {
            return Err(ReliefError::InvalidDimensions {
                x_range: resolution.x_range,
                y_range: resolution.y_range,
            });
        }
        if elevations.len() != resolution.vertex_count() {
            return Err(ReliefError::config(format!(
                "expected {} elevations for a {}x{} grid, got {}",
                resolution.vertex_count(),
                resolution.x_range,
                resolution.y_range,
                elevations.len()
            )));
        }

        let mut cells = Vec::with_capacity(elevations.len());
        for y_i in 0..resolution.y_range {
            for x_i in 0..resolution.x_range {
                let z = elevations[resolution.vertex_index(x_i, y_i)].max(0.0);
                cells.push(Vec3::new(x_i as f32, y_i as f32, z));
            }
        }

        Ok(Self { resolution, cells })
    }

    /// A field where every cell has the same elevation.
    pub fn flat(resolution: GridResolution, elevation: f32) -> ReliefResult<Self> {
        let elevations = vec![elevation; resolution.vertex_count()];
        Self::from_elevations(resolution, &elevations)
    }

    pub fn resolution(&self) -> GridResolution {
        self.resolution
    }

    pub fn x_range(&self) -> u32 {
        self.resolution.x_range
    }

    pub fn y_range(&self) -> u32 {
        self.resolution.y_range
    }

    /// Cell as `(x_i, y_i, elevation)`. Panics when out of range.
    pub fn cell(&self, x_i: u32, y_i: u32) -> Vec3 {
        self.cells[self.resolution.vertex_index(x_i, y_i)]
    }

    pub fn elevation(&self, x_i: u32, y_i: u32) -> f32 {
        self.cell(x_i, y_i).z
    }

    /// All cells in vertex order.
    pub fn cells(&self) -> &[Vec3] {
        &self.cells
    }

    /// (min, max) elevation over the field.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.cells
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.z), hi.max(c.z))
            })
    }
}
