use crate::{
    core::geo::{distance_km, LatLng},
    layers::marker::Marker,
};

/// Rank markers by priority tier, then by distance from `center`, and keep
/// the first `max_visible`.
///
/// The sort is stable, so markers with equal keys stay in input order. This
/// runs before clustering: anything dropped here never reappears inside a
/// cluster.
pub fn prioritize<'a>(
    markers: Vec<&'a Marker>,
    center: &LatLng,
    zoom: u8,
    max_visible: usize,
) -> Vec<&'a Marker> {
    let total = markers.len();

    let mut ranked: Vec<(u8, f64, &'a Marker)> = markers
        .into_iter()
        .map(|marker| {
            (
                marker.effective_priority().rank(),
                distance_km(&marker.position, center),
                marker,
            )
        })
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));
    ranked.truncate(max_visible);

    if ranked.len() < total {
        log::debug!(
            "truncated {} markers to a budget of {} at zoom {}",
            total,
            max_visible,
            zoom
        );
    }

    ranked.into_iter().map(|(_, _, marker)| marker).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::marker::Priority;

    fn marker(id: &str, lat: f64, lng: f64, priority: Option<Priority>) -> Marker {
        let marker = Marker::new(id, LatLng::new(lat, lng));
        match priority {
            Some(p) => marker.with_priority(p),
            None => marker,
        }
    }

    #[test]
    fn test_high_priority_beats_proximity() {
        let far_high = marker("far-high", 10.0, 10.0, Some(Priority::High));
        let near_low = marker("near-low", 0.001, 0.0, Some(Priority::Low));

        let kept = prioritize(vec![&near_low, &far_high], &LatLng::new(0.0, 0.0), 12, 1);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "far-high");
    }

    #[test]
    fn test_cap_is_min_of_len_and_budget() {
        let markers: Vec<Marker> = (0..25)
            .map(|i| marker(&format!("m{i}"), i as f64 * 0.01, 0.0, None))
            .collect();
        let center = LatLng::new(0.0, 0.0);

        for budget in [0, 1, 10, 25, 100] {
            let refs: Vec<&Marker> = markers.iter().collect();
            let kept = prioritize(refs, &center, 10, budget);
            assert_eq!(kept.len(), budget.min(markers.len()));
        }
    }

    #[test]
    fn test_ordering_by_tier_then_distance() {
        let markers = vec![
            marker("low-near", 0.1, 0.0, Some(Priority::Low)),
            marker("none-nearest", 0.05, 0.0, None),
            marker("med-far", 3.0, 0.0, Some(Priority::Medium)),
            marker("high-far", 5.0, 0.0, Some(Priority::High)),
            marker("med-near", 1.0, 0.0, Some(Priority::Medium)),
            marker("high-near", 2.0, 0.0, Some(Priority::High)),
        ];
        let center = LatLng::new(0.0, 0.0);
        let kept = prioritize(markers.iter().collect(), &center, 10, 200);

        let ids: Vec<&str> = kept.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            ["high-near", "high-far", "med-near", "med-far", "none-nearest", "low-near"]
        );

        for pair in kept.windows(2) {
            let (i, j) = (pair[0], pair[1]);
            let tier_i = i.effective_priority();
            let tier_j = j.effective_priority();
            assert!(
                tier_i > tier_j
                    || (tier_i == tier_j
                        && distance_km(&i.position, &center) <= distance_km(&j.position, &center))
            );
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let a = marker("a", 1.0, 0.0, None);
        let b = marker("b", -1.0, 0.0, None);
        let c = marker("c", 0.0, 1.0, None);

        let kept = prioritize(vec![&a, &b, &c], &LatLng::new(0.0, 0.0), 5, 3);
        let ids: Vec<&str> = kept.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(prioritize(Vec::new(), &LatLng::new(0.0, 0.0), 3, 10).is_empty());
    }
}
