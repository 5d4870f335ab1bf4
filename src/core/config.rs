//! Configuration for the clustering pipeline
//!
//! A single options object drives every stage. Presets cover the common
//! device classes; `Custom` passes a hand-tuned set straight through.

use crate::core::constants::{
    DEFAULT_BUFFER_RATIO, DEFAULT_GRID_SIZE, DEFAULT_MAX_VISIBLE, DEFAULT_MAX_ZOOM,
    DEFAULT_MINIMUM_CLUSTER_SIZE, DEFAULT_MIN_DISTANCE_PX,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ClusterProfile {
    Balanced,
    LowEnd,
    HighEnd,
    Custom(ClusterOptions),
}

impl ClusterProfile {
    pub fn resolve(&self) -> ClusterOptions {
        match self {
            Self::Balanced => ClusterOptions::default(),
            Self::LowEnd => ClusterOptions {
                grid_size: 90.0,
                max_zoom: 16,
                minimum_cluster_size: 2,
                buffer_ratio: 0.05,
                max_visible: 100,
                min_distance_px: 120.0,
            },
            Self::HighEnd => ClusterOptions {
                grid_size: 40.0,
                max_zoom: 14,
                minimum_cluster_size: 3,
                buffer_ratio: 0.2,
                max_visible: 500,
                min_distance_px: 60.0,
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for ClusterProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

/// Tuning knobs for filtering, truncation and clustering.
///
/// Deserializes from the camelCase options object used by the map layer;
/// missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterOptions {
    /// Base cell size for grid clustering, divided by `2^(zoom-1)`
    pub grid_size: f64,
    /// Zoom levels above this skip clustering entirely
    pub max_zoom: u8,
    /// Smallest group that is emitted as a cluster
    pub minimum_cluster_size: usize,
    /// Viewport padding as a fraction of its height and width
    pub buffer_ratio: f64,
    /// Display budget applied before clustering
    pub max_visible: usize,
    /// Merge distance for pixel-space clustering
    #[serde(alias = "minDistance")]
    pub min_distance_px: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_zoom: DEFAULT_MAX_ZOOM,
            minimum_cluster_size: DEFAULT_MINIMUM_CLUSTER_SIZE,
            buffer_ratio: DEFAULT_BUFFER_RATIO,
            max_visible: DEFAULT_MAX_VISIBLE,
            min_distance_px: DEFAULT_MIN_DISTANCE_PX,
        }
    }
}

impl ClusterOptions {
    /// Parse and validate an options object
    pub fn from_json(json: &str) -> Result<Self> {
        let options: ClusterOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "gridSize must be a positive number, got {}",
                self.grid_size
            )));
        }
        if self.minimum_cluster_size == 0 {
            return Err(MapError::InvalidConfig(
                "minimumClusterSize must be at least 1".to_string(),
            ));
        }
        if !(self.buffer_ratio.is_finite() && self.buffer_ratio >= 0.0) {
            return Err(MapError::InvalidConfig(format!(
                "bufferRatio must be a non-negative number, got {}",
                self.buffer_ratio
            )));
        }
        if self.min_distance_px.is_nan() || self.min_distance_px < 0.0 {
            return Err(MapError::InvalidConfig(format!(
                "minDistancePx must be non-negative, got {}",
                self.min_distance_px
            )));
        }
        Ok(())
    }

    /// Whether clustering is skipped at this zoom
    pub fn bypasses_clustering(&self, zoom: u8) -> bool {
        zoom > self.max_zoom
    }
}
