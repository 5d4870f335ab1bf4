//! Shared trait abstractions at the seams with the map widget
//!
//! The engine never talks to a concrete widget. It consumes these
//! capabilities, which the widget (or a test double) provides.

use crate::core::geo::{LatLng, Point};

/// Maps geographic coordinates to on-screen pixels.
///
/// Implementations return pixel coordinates at the requested zoom level, so a
/// pixel distance measured between two projected points already reflects the
/// `2^zoom` scale of that level. `None` means the projection is not available
/// yet, typically because the widget has not finished initializing.
pub trait Projection {
    fn to_pixel(&self, position: &LatLng, zoom: u8) -> Option<Point>;
}

impl<P: Projection + ?Sized> Projection for &P {
    fn to_pixel(&self, position: &LatLng, zoom: u8) -> Option<Point> {
        (**self).to_pixel(position, zoom)
    }
}

/// Projection that is never ready.
///
/// Stands in for a widget that has not initialized yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableProjection;

impl Projection for UnavailableProjection {
    fn to_pixel(&self, _position: &LatLng, _zoom: u8) -> Option<Point> {
        None
    }
}
