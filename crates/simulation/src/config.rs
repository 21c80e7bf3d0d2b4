/// World units per grid cell along each axis.
pub const TILE_SIZE: f32 = 2.0;
/// World-space distance from the map centre to the outermost cell centre.
/// Subtracted from `grid * TILE_SIZE` so the playable grid is centred on the origin.
pub const HALF_EXTENT: f32 = 48.0;
/// Cells per axis. Cell coordinates run `0..GRID_CELLS` on both axes.
pub const GRID_CELLS: i32 = (2.0 * HALF_EXTENT / TILE_SIZE) as i32 + 1;

pub const MIN_ZOOM: f32 = 5.0;
pub const MAX_ZOOM: f32 = 50.0;
pub const INITIAL_ZOOM: f32 = 20.0;

/// Orbit pitch limits in degrees.
pub const MIN_PITCH_DEG: f32 = -10.0;
pub const MAX_PITCH_DEG: f32 = 60.0;

/// Screen-space distance (pixels) under which a press/release pair counts as a click.
pub const CLICK_THRESHOLD_PX: f32 = 5.0;

/// Below this, a picking ray is treated as parallel to the ground plane.
pub const RAY_PARALLEL_EPSILON: f32 = 1e-4;

/// Default seed for `SimRng` when the host does not supply one.
pub const DEFAULT_SEED: u64 = 42;
