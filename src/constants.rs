//! Global constants for the zone engine

/// Mean Earth radius used by every geodesic computation, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

/// Square metres per square kilometre.
pub const M2_PER_KM2: f64 = 1_000_000.0;

/// Minimum number of positions for a line.
pub const MIN_LINE_POSITIONS: usize = 2;

/// Minimum number of positions for a polygon.
pub const MIN_POLYGON_POSITIONS: usize = 3;

/// Application name used for config and data directories.
pub const APP_DIR_NAME: &str = "msp-zones";

/// Default name given to a fresh, unsaved project.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";
