//! # mapcluster
//!
//! Viewport reduction for listing maps.
//!
//! Given every listing marker, the settled viewport and a zoom level, the
//! engine decides which markers are drawn as individual pins and which are
//! merged into cluster badges. It also recycles the widget's marker handles
//! between viewport changes and offers a small timing monitor for tuning.
//!
//! The map widget stays outside: it supplies bounds, zoom, center and
//! (for distance clustering) a [`Projection`], and draws the returned
//! [`ClusterUnit`]s.

pub mod core;
pub mod layers;
pub mod pipeline;
pub mod prelude;
pub mod rendering;
pub mod spatial;
pub mod traits;

#[cfg(feature = "tokio-runtime")]
pub mod background;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{ClusterOptions, ClusterProfile},
    geo::{bounds_from_radius, distance_km, LatLng, LatLngBounds, Point},
    viewport::{Viewport, ViewportState},
};

pub use layers::marker::{Marker, Priority};

pub use pipeline::{compute_draw_list, ClusterAlgorithm};

pub use rendering::{
    metrics::{Operation, PerformanceMonitor},
    pool::{MarkerHandle, MarkerPool},
};

pub use spatial::{
    clustering::{ClusterUnit, GridClusterer},
    culling::Culling,
    distance::DistanceClusterer,
    priority::prioritize,
};

pub use traits::Projection;

/// Install `env_logger` as the `log` backend, filtered by `RUST_LOG`.
///
/// Later calls are ignored once a logger is installed.
#[cfg(feature = "debug")]
pub fn init_logger() {
    let _ = env_logger::builder().format_timestamp_millis().try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Map loader error: {0}")]
    Loader(String),

    #[error("Background task error: {0}")]
    Background(String),
}

/// Error type alias for convenience
pub type Error = MapError;
