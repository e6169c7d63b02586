//! Headless frame sink that logs instead of drawing.

use relief_core::error::ReliefResult;
use relief_terrain::TerrainMesh;
use relief_view::{DrawCall, Frame, FrameSink, TextureTable};

/// Records what a GPU backend would have received.
#[derive(Debug, Default)]
pub struct LogSink {
    uploaded_bytes: usize,
    frames: u64,
    last_frame: Option<Frame>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex plus index bytes handed over by `upload`.
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl FrameSink for LogSink {
    fn upload(
        &mut self,
        mesh: &TerrainMesh,
        draw: &DrawCall,
        textures: &TextureTable,
    ) -> ReliefResult<()> {
        self.uploaded_bytes = mesh.vertex_bytes().len() + mesh.index_bytes().len();
        log::info!(
            "Upload: {} vertices, {} indices ({} bytes), {:?} restart={:?}",
            mesh.vertex_count(),
            draw.index_count,
            self.uploaded_bytes,
            draw.topology,
            draw.primitive_restart
        );
        for (name, unit) in textures.sampler_bindings() {
            log::info!("Sampler '{name}' -> unit {unit}");
        }
        Ok(())
    }

    fn submit(&mut self, frame: &Frame) -> ReliefResult<()> {
        log::debug!(
            "Frame {} t={:.3}s eye=({:.2}, {:.2}, {:.2})",
            frame.index,
            frame.time_secs,
            frame.eye.x,
            frame.eye.y,
            frame.eye.z
        );
        self.frames += 1;
        self.last_frame = Some(*frame);
        Ok(())
    }
}
