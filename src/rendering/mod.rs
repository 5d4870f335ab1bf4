pub mod metrics;
pub mod pool;

// Re-export main types
pub use metrics::{Operation, PerformanceMetrics, PerformanceMonitor};
pub use pool::{MarkerHandle, MarkerPool};
