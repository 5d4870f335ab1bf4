//! Lightweight timing for tuning the clustering pipeline.
//!
//! Nothing in the pipeline reads these values back.

use crate::prelude::{Arc, Duration, Mutex};
use instant::Instant;

/// Operations the monitor can time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    MarkerRender,
    Clustering,
}

/// Snapshot of the collected metrics
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    /// Last marker render duration
    pub marker_render_time: Option<Duration>,
    /// Last clustering duration
    pub clustering_time: Option<Duration>,
    /// Number of viewport updates recorded
    pub viewport_updates: u64,
    /// When the latest viewport update was recorded
    pub last_viewport_update: Option<Instant>,
}

impl PerformanceMetrics {
    pub fn last_sample(&self, operation: Operation) -> Option<Duration> {
        match operation {
            Operation::MarkerRender => self.marker_render_time,
            Operation::Clustering => self.clustering_time,
        }
    }

    fn slot_mut(&mut self, operation: Operation) -> &mut Option<Duration> {
        match operation {
            Operation::MarkerRender => &mut self.marker_render_time,
            Operation::Clustering => &mut self.clustering_time,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitor {
    metrics: Arc<Mutex<PerformanceMetrics>>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing `operation`.
    ///
    /// Calling the returned closure stores the elapsed time as the latest
    /// sample for that operation, replacing the previous one, and returns it.
    pub fn start_timer(&self, operation: Operation) -> impl FnOnce() -> Duration {
        let metrics = Arc::clone(&self.metrics);
        let started = Instant::now();

        move || {
            let elapsed = started.elapsed();
            if let Ok(mut metrics) = metrics.lock() {
                *metrics.slot_mut(operation) = Some(elapsed);
            }
            log::trace!("{:?} took {:?}", operation, elapsed);
            elapsed
        }
    }

    pub fn record_viewport_update(&self) {
        if let Ok(mut metrics) = self.metrics.lock() {
            metrics.viewport_updates += 1;
            metrics.last_viewport_update = Some(Instant::now());
        }
    }

    pub fn get_metrics(&self) -> PerformanceMetrics {
        self.metrics
            .lock()
            .map(|metrics| metrics.clone())
            .unwrap_or_default()
    }

    pub fn reset(&self) {
        if let Ok(mut metrics) = self.metrics.lock() {
            *metrics = PerformanceMetrics::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_records_last_sample() {
        let monitor = PerformanceMonitor::new();
        assert!(monitor.get_metrics().clustering_time.is_none());

        let stop = monitor.start_timer(Operation::Clustering);
        std::thread::sleep(Duration::from_millis(2));
        let elapsed = stop();

        let metrics = monitor.get_metrics();
        assert_eq!(metrics.clustering_time, Some(elapsed));
        assert!(elapsed >= Duration::from_millis(2));
        assert!(metrics.marker_render_time.is_none());
    }

    #[test]
    fn test_timer_overwrites_previous_sample() {
        let monitor = PerformanceMonitor::new();

        let slow = monitor.start_timer(Operation::MarkerRender);
        std::thread::sleep(Duration::from_millis(5));
        slow();

        let fast = monitor.start_timer(Operation::MarkerRender)();
        assert_eq!(monitor.get_metrics().last_sample(Operation::MarkerRender), Some(fast));
    }

    #[test]
    fn test_viewport_updates_and_reset() {
        let monitor = PerformanceMonitor::new();
        monitor.record_viewport_update();
        monitor.record_viewport_update();

        let metrics = monitor.get_metrics();
        assert_eq!(metrics.viewport_updates, 2);
        assert!(metrics.last_viewport_update.is_some());

        monitor.reset();
        let metrics = monitor.get_metrics();
        assert_eq!(metrics.viewport_updates, 0);
        assert!(metrics.last_viewport_update.is_none());
    }

    #[test]
    fn test_clones_share_metrics() {
        let monitor = PerformanceMonitor::new();
        let shared = monitor.clone();
        shared.record_viewport_update();
        assert_eq!(monitor.get_metrics().viewport_updates, 1);
    }
}
