//! Triangulation of a height field into a vertex and index buffer.
//!
//! Every grid quad `(x, y), (x+1, y), (x, y+1), (x+1, y+1)` becomes two
//! triangles, `(x, y) → (x+1, y) → (x, y+1)` and
//! `(x+1, y) → (x+1, y+1) → (x, y+1)`. The winding is the front-face
//! orientation and must not change.
//!
//! Normals are accumulated, not normalized: each vertex holds the sum of the
//! unnormalized face normals of its incident triangles, which weights them
//! by triangle area. Shaders normalize at use.
//!
//! Each row of quads ends with one `RESTART_INDEX` so a strip-style draw never
//! stitches the last vertex of a row to the first of the next.

use glam::Vec3;
use relief_core::constants::{INDICES_PER_QUAD, RESTART_INDEX};
use relief_core::error::{ReliefError, ReliefResult};
use relief_core::types::{GridResolution, TerrainVertex};

use crate::field::HeightField;

/// Builds a `TerrainMesh`, optionally clamping elevations to a sea floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrainMeshBuilder {
    min_height: Option<f32>,
}

impl TerrainMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise every vertex below `min_height` to it.
    pub fn with_min_height(mut self, min_height: Option<f32>) -> Self {
        self.min_height = min_height;
        self
    }

    pub fn min_height(&self) -> Option<f32> {
        self.min_height
    }

    pub fn build(&self, field: &HeightField) -> ReliefResult<TerrainMesh> {
        self.build_from_cells(field.resolution(), field.cells())
    }

    /// Triangulate raw `(x, y, z)` cells laid out row-major with y outer.
    pub fn build_from_cells(
        &self,
        resolution: GridResolution,
        cells: &[Vec3],
    ) -> ReliefResult<TerrainMesh> {
        if !resolution.is_triangulable() {
            return Err(ReliefError::DegenerateMesh {
                x_range: resolution.x_range,
                y_range: resolution.y_range,
            });
        }
        if cells.len() != resolution.vertex_count() {
            return Err(ReliefError::config(format!(
                "expected {} cells for a {}x{} mesh, got {}",
                resolution.vertex_count(),
                resolution.x_range,
                resolution.y_range,
                cells.len()
            )));
        }
        if cells.len() > i32::MAX as usize {
            return Err(ReliefError::config(format!(
                "{} vertices exceed the 32-bit index range",
                cells.len()
            )));
        }

        let mut clamped_cells = 0;
        let positions: Vec<Vec3> = cells
            .iter()
            .map(|&cell| match self.min_height {
                Some(floor) if cell.z < floor => {
                    clamped_cells += 1;
                    Vec3::new(cell.x, cell.y, floor)
                }
                _ => cell,
            })
            .collect();

        let mut normals = vec![Vec3::ZERO; positions.len()];
        let mut indices = vec![0i32; resolution.index_count()];
        let row_len = resolution.indices_per_row();

        for y_i in 0..resolution.y_range - 1 {
            let row_base = y_i as usize * row_len;
            for x_i in 0..resolution.x_range - 1 {
                let v00 = resolution.vertex_index(x_i, y_i);
                let v10 = resolution.vertex_index(x_i + 1, y_i);
                let v01 = resolution.vertex_index(x_i, y_i + 1);
                let v11 = resolution.vertex_index(x_i + 1, y_i + 1);

                let base = row_base + x_i as usize * INDICES_PER_QUAD;
                emit_triangle(
                    &mut indices[base..base + 3],
                    &mut normals,
                    &positions,
                    [v00, v10, v01],
                );
                emit_triangle(
                    &mut indices[base + 3..base + 6],
                    &mut normals,
                    &positions,
                    [v10, v11, v01],
                );
            }
            indices[row_base + row_len - 1] = RESTART_INDEX;
        }

        let vertices = positions
            .iter()
            .zip(&normals)
            .map(|(p, n)| TerrainVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();

        log::debug!(
            "Triangulated {}x{} grid: {} triangles, {} cells clamped to sea floor",
            resolution.x_range,
            resolution.y_range,
            resolution.triangle_count(),
            clamped_cells
        );

        Ok(TerrainMesh {
            resolution,
            vertices,
            indices,
            clamped_cells,
        })
    }
}

/// Write one triangle's indices and add its face normal to its three vertices.
fn emit_triangle(slot: &mut [i32], normals: &mut [Vec3], positions: &[Vec3], tri: [usize; 3]) {
    let [a, b, c] = tri;
    let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
    for (dst, &v) in slot.iter_mut().zip(&tri) {
        *dst = v as i32;
        normals[v] += face;
    }
}

/// Vertex and index buffers for one terrain, immutable once built.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    resolution: GridResolution,
    vertices: Vec<TerrainVertex>,
    indices: Vec<i32>,
    clamped_cells: usize,
}

impl TerrainMesh {
    pub fn resolution(&self) -> GridResolution {
        self.resolution
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Triangle indices with `RESTART_INDEX` closing every row.
    pub fn indices(&self) -> &[i32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn restart_count(&self) -> usize {
        self.indices.iter().filter(|&&i| i == RESTART_INDEX).count()
    }

    pub fn triangle_count(&self) -> usize {
        (self.indices.len() - self.restart_count()) / 3
    }

    /// Number of vertices raised to the sea floor.
    pub fn clamped_cells(&self) -> usize {
        self.clamped_cells
    }

    /// Triangles as vertex index triples, restart markers skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let row_len = self.resolution.indices_per_row();
        self.indices
            .chunks_exact(row_len)
            .flat_map(|row| row[..row.len() - 1].chunks_exact(3))
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Unit-length normal of vertex `i`, or zero when nothing accumulated.
    pub fn unit_normal(&self, i: usize) -> Vec3 {
        self.vertices[i].normal().normalize_or_zero()
    }

    /// (min, max) vertex elevation after clamping.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.vertices
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.position[2]), hi.max(v.position[2]))
            })
    }

    /// Interleaved `3f 3f` vertex data for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// 32-bit index data for upload; the restart marker reads as `0xFFFF_FFFF`.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
