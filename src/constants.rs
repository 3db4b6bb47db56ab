//! Engine-wide constants.
//!
//! Centralizes the grid scale, tolerances and label formats so the
//! geometry code never carries magic numbers.

// ============================================================================
// Grid & Scale
// ============================================================================

/// Default pixel length of one grid cell
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

/// Smallest allowed grid cell size in pixels
pub const MIN_CELL_SIZE: f64 = 5.0;

/// Largest allowed grid cell size in pixels
pub const MAX_CELL_SIZE: f64 = 100.0;

/// Real-world length of one grid cell in meters (10px = 0.1m at the default scale)
pub const UNIT_METERS: f64 = 0.1;

/// Cell size change per wheel notch
pub const ZOOM_STEP: f64 = 5.0;

// ============================================================================
// Interaction Tolerances
// ============================================================================

/// Distance in meters from the first point within which a click closes the shape
pub const CLOSING_TOLERANCE_M: f64 = 0.05;

/// Pick radius for clicking an existing point, in pixels
pub const HIT_RADIUS_PX: f64 = 5.0;

/// Deviation in pixels still considered horizontal or vertical
pub const AXIS_TOLERANCE_PX: f64 = 2.0;

/// Minimum number of distinct vertices for a closed shape
pub const MIN_CLOSED_POINTS: usize = 3;

// ============================================================================
// Shape Defaults
// ============================================================================

/// Prefix for auto-generated shape names ("Figure 1", "Figure 2", ...)
pub const AUTO_NAME_PREFIX: &str = "Figure";

/// Saturation of generated shape colors, in percent
pub const SHAPE_SATURATION: u8 = 70;

/// Lightness of generated shape colors, in percent
pub const SHAPE_LIGHTNESS: u8 = 50;

// ============================================================================
// Config
// ============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "gridsketch";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default tracing filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "gridsketch=info";
