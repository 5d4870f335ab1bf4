use crate::prelude::HashMap;
use crate::{
    core::{
        config::ClusterOptions,
        constants::SINGLETON_PADDING,
        geo::{LatLng, LatLngBounds},
    },
    layers::marker::Marker,
};
use serde::{Deserialize, Serialize};

/// One drawable unit: an aggregate badge, or a single pin when `count == 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterUnit {
    /// Unique identifier for the unit
    pub id: String,
    /// Mean latitude/longitude of the members
    pub position: LatLng,
    /// Number of members, always at least one
    pub count: usize,
    /// Markers represented by this unit, in input order
    pub members: Vec<Marker>,
    /// Tight box around the members, or a small padded box for a single pin
    pub bounds: LatLngBounds,
}

impl ClusterUnit {
    /// Aggregate unit over `members`.
    ///
    /// Returns `None` for an empty member list.
    pub fn cluster(id: String, members: Vec<Marker>) -> Option<Self> {
        let position = centroid(&members)?;
        let bounds = LatLngBounds::from_points(members.iter().map(|m| &m.position))?;

        Some(Self {
            id,
            position,
            count: members.len(),
            members,
            bounds,
        })
    }

    /// Pass-through unit for one marker
    pub fn single(marker: &Marker) -> Self {
        Self {
            id: Self::single_id(marker),
            position: marker.position,
            count: 1,
            members: vec![marker.clone()],
            bounds: LatLngBounds::around(&marker.position, SINGLETON_PADDING),
        }
    }

    pub fn single_id(marker: &Marker) -> String {
        format!("single_{}", marker.id)
    }

    pub fn cell_id(grid_x: i64, grid_y: i64) -> String {
        format!("cluster_{}_{}", grid_x, grid_y)
    }

    /// Check if this is a single-item unit
    pub fn is_single(&self) -> bool {
        self.count == 1
    }
}

/// Arithmetic mean of the member positions, summed in member order
pub(crate) fn centroid(members: &[Marker]) -> Option<LatLng> {
    if members.is_empty() {
        return None;
    }

    let (lat_sum, lng_sum) = members.iter().fold((0.0, 0.0), |(lat, lng), m| {
        (lat + m.position.lat, lng + m.position.lng)
    });
    let n = members.len() as f64;

    Some(LatLng::new(lat_sum / n, lng_sum / n))
}

/// Emit a cluster for a group that reaches `minimum_cluster_size`, one single
/// per member otherwise
pub(crate) fn emit_group(
    id: String,
    group: &[&Marker],
    minimum_cluster_size: usize,
    out: &mut Vec<ClusterUnit>,
) {
    if group.len() >= minimum_cluster_size {
        let members: Vec<Marker> = group.iter().map(|m| (*m).clone()).collect();
        if let Some(unit) = ClusterUnit::cluster(id, members) {
            out.push(unit);
        }
    } else {
        out.extend(group.iter().map(|m| ClusterUnit::single(m)));
    }
}

/// Grid clustering in degree space.
///
/// Holds configuration only; every call recomputes its result from scratch.
#[derive(Debug, Clone, Default)]
pub struct GridClusterer {
    options: ClusterOptions,
}

impl GridClusterer {
    pub fn new(options: ClusterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Cell edge length at `zoom`: `grid_size / 2^(zoom - 1)`.
    ///
    /// `grid_size` is applied directly to degrees, which mixes a pixel-style
    /// constant into degree arithmetic. Existing cell layouts depend on it.
    pub fn cell_size(&self, zoom: u8) -> f64 {
        self.options.grid_size / 2_f64.powi(zoom as i32 - 1)
    }

    /// Cell key of a position at the given cell size
    pub fn cell_key(position: &LatLng, cell_size: f64) -> (i64, i64) {
        (
            (position.lng / cell_size).floor() as i64,
            (position.lat / cell_size).floor() as i64,
        )
    }

    /// Group the markers inside `bounds` into grid cells.
    ///
    /// Above `max_zoom` every marker comes back as its own unit and `bounds`
    /// is not applied.
    pub fn cluster<'a>(
        &self,
        markers: impl IntoIterator<Item = &'a Marker>,
        zoom: u8,
        bounds: &LatLngBounds,
    ) -> Vec<ClusterUnit> {
        if self.options.bypasses_clustering(zoom) {
            return markers.into_iter().map(ClusterUnit::single).collect();
        }

        let cell_size = self.cell_size(zoom);

        // Cells in first-seen order so output follows input order
        let mut cell_index: HashMap<(i64, i64), usize> = HashMap::default();
        let mut cells: Vec<((i64, i64), Vec<&Marker>)> = Vec::new();

        for marker in markers {
            if !bounds.contains(&marker.position) {
                continue;
            }

            let key = Self::cell_key(&marker.position, cell_size);
            let slot = *cell_index.entry(key).or_insert_with(|| {
                cells.push((key, Vec::new()));
                cells.len() - 1
            });
            cells[slot].1.push(marker);
        }

        let mut units = Vec::with_capacity(cells.len());
        for ((grid_x, grid_y), group) in &cells {
            emit_group(
                ClusterUnit::cell_id(*grid_x, *grid_y),
                group,
                self.options.minimum_cluster_size,
                &mut units,
            );
        }

        log::debug!(
            "grid clustering at zoom {} (cell {:.5}): {} cells, {} units",
            zoom,
            cell_size,
            cells.len(),
            units.len()
        );
        units
    }
}
