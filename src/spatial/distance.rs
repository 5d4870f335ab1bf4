use crate::{
    core::{config::ClusterOptions, geo::Point},
    layers::marker::Marker,
    spatial::clustering::{emit_group, ClusterUnit},
    traits::Projection,
};

/// Pixel-space clustering through the widget's projection.
///
/// Grouping is greedy in input order: each unprocessed marker becomes a seed
/// and takes every unprocessed marker within `min_distance_px` of the seed.
/// Two members of one group can therefore be up to twice the threshold apart,
/// and the result depends on input order.
#[derive(Debug, Clone, Default)]
pub struct DistanceClusterer {
    options: ClusterOptions,
}

impl DistanceClusterer {
    pub fn new(options: ClusterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Pixel distance between two projected positions, infinite when either
    /// side could not be projected
    fn pixel_distance(a: Option<&Point>, b: Option<&Point>) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => a.distance_to(b),
            _ => f64::INFINITY,
        }
    }

    pub fn cluster<'a, P: Projection + ?Sized>(
        &self,
        markers: impl IntoIterator<Item = &'a Marker>,
        zoom: u8,
        projection: &P,
    ) -> Vec<ClusterUnit> {
        if self.options.bypasses_clustering(zoom) {
            return markers.into_iter().map(ClusterUnit::single).collect();
        }

        let markers: Vec<&Marker> = markers.into_iter().collect();
        let pixels: Vec<Option<Point>> = markers
            .iter()
            .map(|m| projection.to_pixel(&m.position, zoom))
            .collect();

        if !markers.is_empty() && pixels.iter().all(Option::is_none) {
            log::warn!("projection unavailable, emitting {} single markers", markers.len());
        }

        let threshold = self.options.min_distance_px;
        let mut processed = vec![false; markers.len()];
        let mut units = Vec::new();

        for seed in 0..markers.len() {
            if processed[seed] {
                continue;
            }
            processed[seed] = true;

            let mut group = vec![seed];
            for candidate in 0..markers.len() {
                if processed[candidate] {
                    continue;
                }
                let distance =
                    Self::pixel_distance(pixels[seed].as_ref(), pixels[candidate].as_ref());
                if distance <= threshold {
                    processed[candidate] = true;
                    group.push(candidate);
                }
            }

            let members: Vec<&Marker> = group.iter().map(|&i| markers[i]).collect();
            emit_group(
                format!("distance_{}", markers[seed].id),
                &members,
                self.options.minimum_cluster_size,
                &mut units,
            );
        }

        log::debug!(
            "distance clustering at zoom {}: {} markers into {} units",
            zoom,
            markers.len(),
            units.len()
        );
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::traits::UnavailableProjection;

    /// Treats degrees as pixels at zoom 0 and doubles per zoom level
    struct LinearProjection;

    impl Projection for LinearProjection {
        fn to_pixel(&self, position: &LatLng, zoom: u8) -> Option<Point> {
            let scale = 2_f64.powi(zoom as i32);
            Some(Point::new(position.lng * scale, -position.lat * scale))
        }
    }

    fn marker(id: &str, lat: f64, lng: f64) -> Marker {
        Marker::new(id, LatLng::new(lat, lng))
    }

    #[test]
    fn test_tight_group_becomes_one_cluster() {
        // 1/1024 degree is one pixel at zoom 10
        let px = 1.0 / 1024.0;
        let markers: Vec<Marker> = (0..10)
            .map(|i| marker(&format!("m{i}"), (i % 3) as f64 * px, (i % 4) as f64 * px))
            .collect();

        let units = DistanceClusterer::default().cluster(&markers, 10, &LinearProjection);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].count, 10);
        assert_eq!(units[0].id, "distance_m0");
    }

    #[test]
    fn test_far_markers_stay_single() {
        let markers = vec![marker("a", 0.0, 0.0), marker("b", 0.0, 1.0), marker("c", 1.0, 0.0)];
        // One degree is 1024 px at zoom 10
        let units = DistanceClusterer::default().cluster(&markers, 10, &LinearProjection);

        assert_eq!(units.len(), 3);
        assert!(units.iter().all(ClusterUnit::is_single));
    }

    /// Markers at 0, 80 and 160 px on one row at zoom 10
    fn row() -> (Marker, Marker, Marker) {
        let px = 1.0 / 1024.0;
        (
            marker("a", 0.0, 0.0),
            marker("b", 0.0, 80.0 * px),
            marker("c", 0.0, 160.0 * px),
        )
    }

    /// Known property of greedy grouping: a-b and b-c are close, a-c is not,
    /// yet all three end up together when b seeds the group.
    #[test]
    fn test_middle_seed_merges_far_ends() {
        let (a, b, c) = row();
        let pa = LinearProjection.to_pixel(&a.position, 10).unwrap();
        let pc = LinearProjection.to_pixel(&c.position, 10).unwrap();
        assert!(pa.distance_to(&pc) > 100.0);

        let markers = vec![b, a, c];
        let units = DistanceClusterer::default().cluster(&markers, 10, &LinearProjection);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].id, "distance_b");
        assert_eq!(units[0].count, 3);
    }

    #[test]
    fn test_group_only_takes_neighbors_of_seed() {
        let (a, b, c) = row();
        let markers = vec![a, b, c];
        let units = DistanceClusterer::default().cluster(&markers, 10, &LinearProjection);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].id, "distance_a");
        let ids: Vec<&str> = units[0].members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(units[1].id, "single_c");
        assert!(units[1].is_single());
    }

    #[test]
    fn test_unavailable_projection_yields_singles() {
        let markers: Vec<Marker> = (0..5).map(|i| marker(&format!("m{i}"), 0.0, 0.0)).collect();
        let units = DistanceClusterer::default().cluster(&markers, 10, &UnavailableProjection);

        assert_eq!(units.len(), 5);
        assert!(units.iter().all(ClusterUnit::is_single));
    }

    #[test]
    fn test_high_zoom_bypass() {
        let markers: Vec<Marker> = (0..4).map(|i| marker(&format!("m{i}"), 0.0, 0.0)).collect();
        let units = DistanceClusterer::default().cluster(&markers, 16, &LinearProjection);

        assert_eq!(units.len(), 4);
        assert!(units.iter().all(|u| u.count == 1));
    }

    #[test]
    fn test_completeness_and_centroid() {
        let markers: Vec<Marker> = (0..60)
            .map(|i| {
                let f = i as f64;
                marker(&format!("m{i:02}"), (f * 1.3).sin() * 0.2, (f * 0.7).cos() * 0.2)
            })
            .collect();

        let units = DistanceClusterer::default().cluster(&markers, 8, &LinearProjection);

        let mut ids: Vec<String> = units
            .iter()
            .flat_map(|u| u.members.iter().map(|m| m.id.clone()))
            .collect();
        ids.sort();
        let mut expected: Vec<String> = markers.iter().map(|m| m.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);

        for unit in units.iter().filter(|u| u.count > 1) {
            let n = unit.count as f64;
            let lat = unit.members.iter().map(|m| m.position.lat).sum::<f64>() / n;
            let lng = unit.members.iter().map(|m| m.position.lng).sum::<f64>() / n;
            assert!((unit.position.lat - lat).abs() < 1e-12);
            assert!((unit.position.lng - lng).abs() < 1e-12);
        }
    }

    #[test]
    fn test_group_below_minimum_is_split() {
        let options = ClusterOptions {
            minimum_cluster_size: 3,
            ..Default::default()
        };
        let markers = vec![marker("a", 0.0, 0.0), marker("b", 0.0, 0.00001)];
        let units = DistanceClusterer::new(options).cluster(&markers, 10, &LinearProjection);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].id, "single_a");
        assert_eq!(units[1].id, "single_b");
    }
}
