use crate::{core::geo::LatLngBounds, layers::marker::Marker};

/// Viewport culling for listing markers.
///
/// Bounds are treated as a plain lat/lng rectangle; antimeridian-crossing
/// viewports are not special-cased.
pub struct Culling;

impl Culling {
    /// Returns `true` if the marker lies inside the rectangle, edges included.
    pub fn marker_visible(bounds: &LatLngBounds, marker: &Marker) -> bool {
        bounds.contains(&marker.position)
    }

    /// Keep the markers inside `bounds` grown by `buffer_ratio` of its span on
    /// every side, so pins just past the edge are ready before they scroll in.
    pub fn filter_in_viewport<'a>(
        markers: impl IntoIterator<Item = &'a Marker>,
        bounds: &LatLngBounds,
        buffer_ratio: f64,
    ) -> Vec<&'a Marker> {
        let expanded = bounds.padded(buffer_ratio);
        let visible: Vec<&Marker> = markers
            .into_iter()
            .filter(|marker| Self::marker_visible(&expanded, marker))
            .collect();

        log::trace!(
            "viewport filter kept {} markers (buffer ratio {})",
            visible.len(),
            buffer_ratio
        );
        visible
    }
}
