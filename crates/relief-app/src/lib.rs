//! Relief terrain viewer application.
//!
//! This crate wires the terrain and view crates together: it resolves
//! configuration, loads shaders and the heightmap at startup, and runs the
//! single-threaded viewer loop that feeds input events to the camera and
//! frames to the rendering collaborator.

pub mod cli;
pub mod input;
pub mod scene;
pub mod shaders;
pub mod sink;
pub mod viewer_loop;

pub use relief_core as core;
