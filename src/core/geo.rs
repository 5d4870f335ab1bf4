use crate::core::constants::{EARTH_RADIUS_KM, KM_PER_DEGREE};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude in degrees.
///
/// Values are not range-checked. NaN or infinite components flow through the
/// distance and centroid math unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another coordinate in kilometres (Haversine)
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Great-circle distance between two coordinates in kilometres.
pub fn distance_km(a: &LatLng, b: &LatLng) -> f64 {
    a.distance_to(b)
}

/// Approximate square bounds of `radius_km` around `center`.
///
/// Longitude span divides by `cos(lat)` and blows up near the poles.
pub fn bounds_from_radius(center: &LatLng, radius_km: f64) -> LatLngBounds {
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lng_delta = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());

    LatLngBounds::from_coords(
        center.lat - lat_delta,
        center.lng - lng_delta,
        center.lat + lat_delta,
        center.lng + lng_delta,
    )
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates.
///
/// `north_east.lat >= south_west.lat` is expected. A box whose west edge is
/// east of its east edge (antimeridian crossing) contains nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Tight bounds around a set of points, `None` when empty
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(*first, *first);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Square box of `padding` degrees on each side of a point
    pub fn around(point: &LatLng, padding: f64) -> Self {
        Self::from_coords(
            point.lat - padding,
            point.lng - padding,
            point.lat + padding,
            point.lng + padding,
        )
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    /// Checks if the bounds contain a point (edges inclusive)
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Returns bounds grown by `ratio` of the height (north/south) and of
    /// the width (east/west) on each side
    pub fn padded(&self, ratio: f64) -> LatLngBounds {
        let span = self.span();
        let lat_buffer = span.lat * ratio;
        let lng_buffer = span.lng * ratio;

        LatLngBounds::from_coords(
            self.south() - lat_buffer,
            self.west() - lng_buffer,
            self.north() + lat_buffer,
            self.east() + lng_buffer,
        )
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Gets the span of the bounds
    pub fn span(&self) -> LatLng {
        LatLng::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }
}
