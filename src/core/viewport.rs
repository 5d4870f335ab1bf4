use crate::core::constants::{MAX_ZOOM, MERCATOR_RADIUS, MIN_ZOOM, TILE_SIZE};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::traits::Projection;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// What the map widget reports when the view settles: the visible bounds,
/// the integer zoom level and the view center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub bounds: LatLngBounds,
    pub zoom: u8,
    pub center: LatLng,
}

impl ViewportState {
    pub fn new(bounds: LatLngBounds, zoom: u8, center: LatLng) -> Self {
        Self {
            bounds,
            zoom,
            center,
        }
    }

    /// State with the center placed in the middle of `bounds`
    pub fn from_bounds(bounds: LatLngBounds, zoom: u8) -> Self {
        let center = bounds.center();
        Self::new(bounds, zoom, center)
    }
}

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
        }
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Integer zoom level used by the clustering stages
    pub fn zoom_level(&self) -> u8 {
        self.zoom.floor().clamp(0.0, u8::MAX as f64) as u8
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let x = lat_lng.lng.to_radians() * MERCATOR_RADIUS;
        let y = (PI / 4.0 + lat_lng.lat.to_radians() / 2.0).tan().ln() * MERCATOR_RADIUS;

        let pixel_x = (x + PI * MERCATOR_RADIUS) / (2.0 * PI * MERCATOR_RADIUS) * scale;
        let pixel_y = (-y + PI * MERCATOR_RADIUS) / (2.0 * PI * MERCATOR_RADIUS) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE as f64 * 2_f64.powf(z);

        let x = (pixel.x / scale) * (2.0 * PI * MERCATOR_RADIUS) - PI * MERCATOR_RADIUS;
        let y = PI * MERCATOR_RADIUS - (pixel.y / scale) * (2.0 * PI * MERCATOR_RADIUS);

        let lng = (x / MERCATOR_RADIUS).to_degrees();
        let lat = (2.0 * (y / MERCATOR_RADIUS).exp().atan() - PI / 2.0).to_degrees();

        LatLng::new(lat, lng)
    }

    /// Geographic bounds covered by the viewport
    pub fn bounds(&self) -> LatLngBounds {
        let center = self.project(&self.center, None);
        let half_w = self.size.x / 2.0;
        let half_h = self.size.y / 2.0;

        let north_west = self.unproject(&Point::new(center.x - half_w, center.y - half_h), None);
        let south_east = self.unproject(&Point::new(center.x + half_w, center.y + half_h), None);

        LatLngBounds::from_coords(south_east.lat, north_west.lng, north_west.lat, south_east.lng)
    }

    /// Snapshot handed to the clustering pipeline
    pub fn state(&self) -> ViewportState {
        ViewportState::new(self.bounds(), self.zoom_level(), self.center)
    }
}

impl Projection for Viewport {
    fn to_pixel(&self, position: &LatLng, zoom: u8) -> Option<Point> {
        Some(self.project(position, Some(zoom as f64)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(37.7749, -122.4194), 12.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let viewport = viewport();
        let point = viewport.project(&viewport.center, None);
        let back = viewport.unproject(&point, None);

        assert!((back.lat - viewport.center.lat).abs() < 1e-9);
        assert!((back.lng - viewport.center.lng).abs() < 1e-9);
    }

    #[test]
    fn test_world_size_at_zoom_zero() {
        let viewport = viewport();
        let origin = viewport.project(&LatLng::new(0.0, 0.0), Some(0.0));
        assert!((origin.x - 128.0).abs() < 1e-9);
        assert!((origin.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_pixel_distance_doubles_per_zoom() {
        let viewport = viewport();
        let a = LatLng::new(37.0, -122.0);
        let b = LatLng::new(37.01, -122.01);

        let d10 = viewport
            .to_pixel(&a, 10)
            .unwrap()
            .distance_to(&viewport.to_pixel(&b, 10).unwrap());
        let d11 = viewport
            .to_pixel(&a, 11)
            .unwrap()
            .distance_to(&viewport.to_pixel(&b, 11).unwrap());

        assert!((d11 / d10 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 25.0, Point::new(800.0, 600.0));
        assert_eq!(viewport.zoom, MAX_ZOOM);

        viewport.set_zoom(-3.0);
        assert_eq!(viewport.zoom_level(), 0);
        viewport.set_zoom(14.7);
        assert_eq!(viewport.zoom_level(), 14);
    }

    #[test]
    fn test_bounds_contains_center() {
        let viewport = viewport();
        let bounds = viewport.bounds();
        assert!(bounds.contains(&viewport.center));
        assert!(bounds.north() > bounds.south());
        assert!(bounds.east() > bounds.west());

        let state = viewport.state();
        assert_eq!(state.zoom, 12);
        assert_eq!(state.center, viewport.center);
    }
}
