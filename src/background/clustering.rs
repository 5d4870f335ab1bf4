//! Background clustering
//!
//! Keeps the filter/prioritize/cluster pass off the UI thread. Each request
//! carries a generation number; when a newer viewport arrives before an older
//! result is delivered, the older result is discarded instead of drawn.

use crate::core::{config::ClusterOptions, viewport::ViewportState};
use crate::layers::marker::Marker;
use crate::pipeline::{compute_draw_list, ClusterAlgorithm};
use crate::prelude::Arc;
use crate::spatial::clustering::ClusterUnit;
use crate::{MapError, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// Runs grid clustering on the blocking thread pool
#[derive(Debug, Clone)]
pub struct ClusterWorker {
    options: ClusterOptions,
    generation: Arc<AtomicU64>,
}

impl ClusterWorker {
    pub fn new(options: ClusterOptions) -> Self {
        Self {
            options,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Generation of the most recent request
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Cluster `markers` for `viewport` off the calling thread.
    ///
    /// Resolves to `Ok(None)` when another request was submitted while this
    /// one was running.
    pub async fn submit(
        &self,
        markers: Arc<Vec<Marker>>,
        viewport: ViewportState,
    ) -> Result<Option<Vec<ClusterUnit>>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let options = self.options.clone();

        let units = tokio::task::spawn_blocking(move || {
            compute_draw_list(&markers, &viewport, &options, ClusterAlgorithm::Grid)
        })
        .await
        .map_err(|e| MapError::Background(e.to_string()))?;

        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("discarding clusters from superseded request {}", generation);
            return Ok(None);
        }

        Ok(Some(units))
    }
}

impl Default for ClusterWorker {
    fn default() -> Self {
        Self::new(ClusterOptions::default())
    }
}
