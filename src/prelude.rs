//! Prelude module for common mapcluster types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapcluster::prelude::*;`

pub use crate::core::{
    config::{ClusterOptions, ClusterProfile},
    debounce::ViewportDebouncer,
    geo::{bounds_from_radius, distance_km, LatLng, LatLngBounds, Point},
    loader::{LoaderState, MapLoader},
    viewport::{Viewport, ViewportState},
};

pub use crate::layers::marker::{Marker, Priority};

pub use crate::spatial::{
    clustering::{ClusterUnit, GridClusterer},
    culling::Culling,
    distance::DistanceClusterer,
    priority::prioritize,
};

pub use crate::rendering::{
    metrics::{Operation, PerformanceMetrics, PerformanceMonitor},
    pool::{MarkerHandle, MarkerPool},
};

pub use crate::pipeline::{compute_draw_list, compute_draw_list_timed, ClusterAlgorithm};

pub use crate::traits::{Projection, UnavailableProjection};

#[cfg(feature = "tokio-runtime")]
pub use crate::background::clustering::ClusterWorker;

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
