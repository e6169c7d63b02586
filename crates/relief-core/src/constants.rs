//! Viewer constants and tuning parameters.

// --- Terrain ---

/// Index value marking a primitive restart between grid rows.
pub const RESTART_INDEX: i32 = -1;

/// Smallest grid dimension that still forms a triangle.
pub const MIN_GRID_DIMENSION: u32 = 2;

/// Indices emitted per grid quad (two triangles).
pub const INDICES_PER_QUAD: usize = 6;

// --- Camera ---

/// Angular gain applied to normalized drag deltas (radians per viewport half-width).
pub const DRAG_GAIN: f32 = 4.0;

/// Scroll offsets are multiplied by this before zooming.
pub const SCROLL_DAMPING: f32 = 0.5;

/// Minimum distance between eye and focus point.
pub const MIN_ZOOM_RADIUS: f32 = 1.0;

/// A drag is rejected when the new horizontal radius falls to this fraction of
/// the eye distance or below. Keeps the eye away from the vertical axis.
pub const POLE_RATIO_LIMIT: f32 = 0.1;

// --- Frame composition ---

/// Default vertical scale applied to sampled elevations.
pub const DEFAULT_HEIGHT_SCALE: f32 = 0.5;

/// Default vertical field of view (degrees).
pub const DEFAULT_FOV_Y_DEG: f32 = 45.0;

/// Default near clip plane.
pub const DEFAULT_NEAR: f32 = 0.1;

/// Default far clip plane.
pub const DEFAULT_FAR: f32 = 2000.0;

/// Vertical offset of the model after height scaling.
pub const MODEL_Z_OFFSET: f32 = 1.0;

/// Default terrain color.
pub const DEFAULT_OBJ_COLOR: [f32; 3] = [0.45, 0.62, 0.30];

/// Default color for cells clamped to the sea floor.
pub const DEFAULT_WATER_COLOR: [f32; 3] = [0.12, 0.32, 0.58];

/// Target frame rate of the viewer loop (Hz).
pub const DEFAULT_FRAME_RATE: u32 = 60;

// --- Shader boundary ---

/// Combined projection/view/model matrix uniform.
pub const UNIFORM_TR_MATRIX: &str = "tr_matrix";

/// Terrain color uniform.
pub const UNIFORM_OBJ_COLOR: &str = "obj_color";

/// Water color uniform.
pub const UNIFORM_WATER_COLOR: &str = "water_color";

/// Vertex attribute carrying the position.
pub const ATTRIBUTE_POSITION: &str = "in_position";

/// Vertex attribute carrying the accumulated normal.
pub const ATTRIBUTE_NORMAL: &str = "in_normal";

/// Number of texture units a program may bind.
pub const MAX_TEXTURE_UNITS: u32 = 6;

// --- Assets ---

/// Directory below the resources root holding heightmap images.
pub const HEIGHTMAP_DIR: &str = "heightmaps";

/// Directory below the resources root holding shader sources.
pub const SHADER_DIR: &str = "shaders";

/// Directory below the resources root holding textures.
pub const TEXTURE_DIR: &str = "textures";

/// Heightmap file extension.
pub const HEIGHTMAP_EXTENSION: &str = "png";

/// Vertex shader file extension.
pub const VERTEX_SHADER_EXTENSION: &str = "vert";

/// Fragment shader file extension.
pub const FRAGMENT_SHADER_EXTENSION: &str = "frag";
