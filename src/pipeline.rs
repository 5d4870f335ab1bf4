//! The composed viewport pipeline: filter, then prioritize, then cluster.

use crate::{
    core::{config::ClusterOptions, viewport::ViewportState},
    layers::marker::Marker,
    rendering::metrics::{Operation, PerformanceMonitor},
    spatial::{
        clustering::{ClusterUnit, GridClusterer},
        culling::Culling,
        distance::DistanceClusterer,
        priority::prioritize,
    },
    traits::Projection,
};

/// Which clustering pass turns the visible markers into drawable units
#[derive(Clone, Copy)]
pub enum ClusterAlgorithm<'p> {
    /// Degree-space grid cells
    Grid,
    /// On-screen distance through the widget's projection
    Distance(&'p dyn Projection),
}

impl std::fmt::Debug for ClusterAlgorithm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid => f.write_str("Grid"),
            Self::Distance(_) => f.write_str("Distance"),
        }
    }
}

/// Turn the caller's markers into the list of things to draw for one settled
/// viewport.
///
/// Stages run in a fixed order: buffered viewport filter, priority
/// truncation to `max_visible`, then clustering. The grid pass receives the
/// buffered bounds so markers kept by the filter are not dropped again.
///
/// `options` must pass [`ClusterOptions::validate`]. Options built as struct
/// literals skip that check; a zero `grid_size` puts every marker in one cell.
pub fn compute_draw_list(
    markers: &[Marker],
    viewport: &ViewportState,
    options: &ClusterOptions,
    algorithm: ClusterAlgorithm<'_>,
) -> Vec<ClusterUnit> {
    debug_assert!(options.validate().is_ok(), "invalid cluster options: {options:?}");

    let visible = Culling::filter_in_viewport(markers, &viewport.bounds, options.buffer_ratio);
    let kept = prioritize(visible, &viewport.center, viewport.zoom, options.max_visible);

    let units = match algorithm {
        ClusterAlgorithm::Grid => {
            let buffered = viewport.bounds.padded(options.buffer_ratio);
            GridClusterer::new(options.clone()).cluster(kept, viewport.zoom, &buffered)
        }
        ClusterAlgorithm::Distance(projection) => {
            DistanceClusterer::new(options.clone()).cluster(kept, viewport.zoom, projection)
        }
    };

    log::debug!(
        "draw list at zoom {}: {} markers in, {} units out ({:?})",
        viewport.zoom,
        markers.len(),
        units.len(),
        algorithm
    );
    units
}

/// `compute_draw_list` with the clustering time and the viewport update
/// recorded on `monitor`
pub fn compute_draw_list_timed(
    markers: &[Marker],
    viewport: &ViewportState,
    options: &ClusterOptions,
    algorithm: ClusterAlgorithm<'_>,
    monitor: &PerformanceMonitor,
) -> Vec<ClusterUnit> {
    monitor.record_viewport_update();
    let stop = monitor.start_timer(Operation::Clustering);
    let units = compute_draw_list(markers, viewport, options, algorithm);
    stop();
    units
}
