use anyhow::Context;
use mapcluster::prelude::*;
use std::cell::Cell;
use std::hash::{Hash, Hasher};

/// Example of driving the clustering engine without any map widget
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mapcluster::init_logger();

    let options = match std::env::args().nth(1) {
        Some(json) => ClusterOptions::from_json(&json).context("invalid options object")?,
        None => ClusterProfile::Balanced.resolve(),
    };
    log::info!("options: {:?}", options);

    let listings = Arc::new(synthetic_listings(5_000));
    let center = LatLng::new(37.7749, -122.4194); // San Francisco
    let mut viewport = Viewport::new(center, 10.0, Point::new(1280.0, 800.0));

    let mut loader = MapLoader::new();
    if loader.begin_load() {
        loader.on_ready(|| log::info!("map ready, clustering can start"));
        loader.mark_loaded()?;
    }

    let monitor = PerformanceMonitor::new();
    let mut pool: MarkerPool<DemoHandle> = MarkerPool::new();
    let mut drawn: Vec<DemoHandle> = Vec::new();
    let created = Cell::new(0u32);

    for zoom in [8.0, 10.0, 12.0, 14.0, 16.0, 12.0] {
        viewport.set_zoom(zoom);
        let state = viewport.state();

        for algorithm in [ClusterAlgorithm::Grid, ClusterAlgorithm::Distance(&viewport)] {
            let units = compute_draw_list_timed(&listings, &state, &options, algorithm, &monitor);
            let clusters = units.iter().filter(|u| !u.is_single()).count();

            let render = monitor.start_timer(Operation::MarkerRender);
            for handle in drawn.drain(..) {
                pool.release_handle(&handle);
            }
            for _ in &units {
                let handle = pool.get_handle().unwrap_or_else(|| {
                    created.set(created.get() + 1);
                    DemoHandle(created.get())
                });
                drawn.push(handle);
            }
            render();

            let metrics = monitor.get_metrics();
            println!(
                "zoom {:>4.1} {:<8} {:>4} units ({:>3} clusters) | cluster {:?} render {:?}",
                zoom,
                format!("{:?}", algorithm),
                units.len(),
                clusters,
                metrics.clustering_time.unwrap_or_default(),
                metrics.marker_render_time.unwrap_or_default(),
            );
        }
    }

    let worker = ClusterWorker::new(options.clone());
    if let Some(units) = worker.submit(Arc::clone(&listings), viewport.state()).await? {
        println!("background pass: {} units", units.len());
    }

    pool.release_all();
    for handle in drawn.drain(..) {
        pool.release_handle(&handle);
    }
    let idle = pool.trim(64);
    println!(
        "pool: {} handles created, {} kept idle, {} trimmed; {} viewport updates",
        created.get(),
        pool.free_count(),
        idle.len(),
        monitor.get_metrics().viewport_updates,
    );

    Ok(())
}

/// Stand-in for a native marker object
#[derive(Debug, Clone)]
struct DemoHandle(u32);

impl PartialEq for DemoHandle {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for DemoHandle {}

impl Hash for DemoHandle {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.0.hash(state);
    }
}

impl MarkerHandle for DemoHandle {
    fn detach(&self) {
        log::trace!("detach marker {}", self.0);
    }

    fn clear_listeners(&self) {}
}

/// Listings scattered around the Bay Area without a random number generator
fn synthetic_listings(count: usize) -> Vec<Marker> {
    (0..count)
        .map(|i| {
            let f = i as f64;
            let position = LatLng::new(
                37.7749 + (f * 0.618).sin() * 0.4 * (f * 0.013).cos(),
                -122.4194 + (f * 1.414).cos() * 0.5 * (f * 0.007).sin(),
            );
            let mut marker = Marker::new(format!("listing-{i}"), position)
                .with_title(format!("Listing #{i}"))
                .with_price(400_000.0 + (i % 97) as f64 * 12_500.0);
            marker.priority = match i % 20 {
                0 => Some(Priority::High),
                1..=5 => Some(Priority::Medium),
                _ => None,
            };
            marker
        })
        .collect()
}
