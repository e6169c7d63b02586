//! Startup pipeline and the state the viewer loop mutates.
//!
//! shaders → heightmap → height field → mesh, then camera and composer.
//! Every step is fatal on failure; nothing is retried.

use relief_core::config::ViewerConfig;
use relief_core::constants::{UNIFORM_OBJ_COLOR, UNIFORM_WATER_COLOR};
use relief_core::error::ReliefResult;
use relief_core::types::Viewport;
use relief_terrain::{HeightField, HeightmapSampler, TerrainMesh, TerrainMeshBuilder};
use relief_view::{DragInput, DrawCall, Frame, FrameComposer, OrbitCamera, TextureTable};

use crate::input::InputEvent;
use crate::shaders::{ShaderLibrary, ShaderSource};

/// Outcome of applying one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    CameraMoved,
    CameraRejected,
    ViewportChanged,
}

pub struct Scene {
    shader_name: String,
    shader: ShaderSource,
    mesh: TerrainMesh,
    draw_call: DrawCall,
    textures: TextureTable,
    camera: OrbitCamera,
    composer: FrameComposer,
    viewport: Viewport,
    /// Fixed render aspect ratio, independent of later resizes.
    aspect_ratio: f32,
}

impl Scene {
    /// Load every asset named by `config` and build the scene.
    pub fn load(config: &ViewerConfig) -> ReliefResult<Self> {
        config.validate()?;

        let library = ShaderLibrary::load(&config.shader_dir())?;
        let shader = library.get(&config.shader_name)?.clone();
        shader.check_interface(&config.shader_name)?;

        let sampler = HeightmapSampler::open(&config.heightmap_path())?;
        let field = sampler.sample(config.grid)?;

        Self::from_parts(config, shader, &field)
    }

    /// Build from an already-sampled field.
    pub fn from_parts(
        config: &ViewerConfig,
        shader: ShaderSource,
        field: &HeightField,
    ) -> ReliefResult<Self> {
        let resolution = field.resolution();
        let mesh = TerrainMeshBuilder::new()
            .with_min_height(config.sea_level)
            .build(field)?;
        let (lo, hi) = mesh.elevation_range();
        log::info!(
            "Built terrain mesh {}x{}: {} vertices, {} triangles, {} indices, elevation {lo}..{hi}",
            resolution.x_range,
            resolution.y_range,
            mesh.vertex_count(),
            mesh.triangle_count(),
            mesh.indices().len()
        );
        if mesh.clamped_cells() > 0 {
            log::info!("{} cell(s) raised to the sea floor", mesh.clamped_cells());
        }

        for uniform in [UNIFORM_OBJ_COLOR, UNIFORM_WATER_COLOR] {
            if !shader.declares_uniform(uniform) {
                log::debug!("Shader '{}' does not use '{uniform}'", config.shader_name);
            }
        }

        let textures = TextureTable::from_config(&config.textures, &config.texture_dir())?;
        for slot in textures.missing_assets() {
            log::warn!("Texture '{}' not found at {}", slot.name, slot.path.display());
        }

        let composer = FrameComposer::from_config(config, resolution);
        let camera_floor = config.sea_level.map(|level| composer.world_height(level));
        let camera = OrbitCamera::for_terrain(resolution, camera_floor);

        Ok(Self {
            shader_name: config.shader_name.clone(),
            shader,
            draw_call: DrawCall::for_mesh(&mesh),
            mesh,
            textures,
            camera,
            composer,
            viewport: config.viewport,
            aspect_ratio: config.viewport.aspect_ratio(),
        })
    }

    pub fn shader_name(&self) -> &str {
        &self.shader_name
    }

    pub fn shader(&self) -> &ShaderSource {
        &self.shader
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn draw_call(&self) -> &DrawCall {
        &self.draw_call
    }

    pub fn textures(&self) -> &TextureTable {
        &self.textures
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn apply(&mut self, event: InputEvent) -> EventOutcome {
        let moved = match event {
            InputEvent::Drag { dx, dy } => self.camera.on_drag(&DragInput {
                dx,
                dy,
                viewport: self.viewport,
                aspect_ratio: self.aspect_ratio,
            }),
            InputEvent::Scroll { y_offset, .. } => self.camera.on_scroll(y_offset),
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                return EventOutcome::ViewportChanged;
            }
        };
        if moved {
            EventOutcome::CameraMoved
        } else {
            EventOutcome::CameraRejected
        }
    }

    pub fn compose(&self, index: u64, time_secs: f32) -> Frame {
        self.composer
            .compose(index, time_secs, &self.camera, self.aspect_ratio)
    }
}
