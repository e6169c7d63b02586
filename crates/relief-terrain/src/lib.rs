//! Terrain generation for the relief viewer.
//!
//! Heightmap loading and resampling, the sampled height field,
//! and triangulation into a GPU-ready mesh.

pub use relief_core as core;

pub mod field;
pub mod heightmap;
pub mod mesh;

// Re-export key types for convenience.
pub use field::HeightField;
pub use heightmap::{HeightmapSampler, RawHeightmap};
pub use mesh::{TerrainMesh, TerrainMeshBuilder};
