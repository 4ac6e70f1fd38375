//! Densification of polygon rings, on top of `geo`'s [`Densify`].

use crate::float_types::Real;
use geo::{Densify, Distance, Euclidean, LineString, MultiPolygon, Point};

/// Number of pieces a segment of `length` is cut into so none exceeds `max_segment_length`.
#[inline]
fn pieces(length: Real, max_segment_length: Real) -> usize {
    if max_segment_length <= 0.0 || !length.is_finite() {
        return 1;
    }
    ((length / max_segment_length).ceil() as usize).max(1)
}

/// Inserts vertices so that no ring segment is longer than `max_segment_length`.
///
/// Every segment is split into equal pieces; the original vertices are kept.
/// A non-positive `max_segment_length` returns the input unchanged.
pub fn segmentize(polygon: &MultiPolygon<Real>, max_segment_length: Real) -> MultiPolygon<Real> {
    if max_segment_length <= 0.0 || !max_segment_length.is_finite() {
        return polygon.clone();
    }
    polygon.densify::<Euclidean>(max_segment_length)
}

/// Number of coordinates [`segmentize`] would produce, without building the geometry.
pub fn segmentized_coord_count(polygon: &MultiPolygon<Real>, max_segment_length: Real) -> usize {
    let ring_count = |ring: &LineString<Real>| -> usize {
        if ring.0.is_empty() {
            return 0;
        }
        1 + ring
            .lines()
            .map(|segment| {
                let length = Euclidean::distance(Point::from(segment.start), Point::from(segment.end));
                pieces(length, max_segment_length)
            })
            .sum::<usize>()
    };
    polygon
        .iter()
        .map(|part| ring_count(part.exterior()) + part.interiors().iter().map(ring_count).sum::<usize>())
        .sum()
}
