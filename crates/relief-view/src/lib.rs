//! Viewing for the relief viewer.
//!
//! The orbit camera and its input handlers, per-frame matrix composition,
//! and the texture slot table consumed by the rendering collaborator.

pub use relief_core as core;

pub mod camera;
pub mod frame;
pub mod textures;

pub use camera::{DragInput, OrbitCamera};
pub use frame::{DrawCall, Frame, FrameComposer, FrameSink, FrameUniforms};
pub use textures::{TextureSlot, TextureTable};

#[cfg(test)]
mod tests;
