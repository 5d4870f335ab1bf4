//! Core constants for the clustering engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Mean Earth radius used by the Haversine distance, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate kilometres per degree of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Web Mercator radius in metres (EPSG:3857).
pub const MERCATOR_RADIUS: f64 = 6378137.0;

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Zoom range a `Viewport` is clamped to.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Half-width of the box drawn around a singleton marker, in degrees.
pub const SINGLETON_PADDING: f64 = 0.001;

/// Base grid size for grid clustering.
pub const DEFAULT_GRID_SIZE: f64 = 60.0;

/// Zoom above which clustering is bypassed.
pub const DEFAULT_MAX_ZOOM: u8 = 15;

/// Smallest group emitted as a cluster.
pub const DEFAULT_MINIMUM_CLUSTER_SIZE: usize = 2;

/// Viewport padding as a fraction of the viewport span.
pub const DEFAULT_BUFFER_RATIO: f64 = 0.1;

/// Display budget applied before clustering.
pub const DEFAULT_MAX_VISIBLE: usize = 200;

/// On-screen merge distance for distance clustering.
pub const DEFAULT_MIN_DISTANCE_PX: f64 = 100.0;

/// Quiet period before a viewport change is processed.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
