//! Boundary length and coordinate counts of (multi)polygons.

use crate::float_types::Real;
use geo::{Euclidean, Length, MultiPolygon};

/// Length of the boundary of a (multi)polygon: exterior rings plus holes.
pub fn perimeter(polygon: &MultiPolygon<Real>) -> Real {
    polygon
        .iter()
        .map(|part| {
            part.exterior().length::<Euclidean>()
                + part.interiors().iter().map(|ring| ring.length::<Euclidean>()).sum::<Real>()
        })
        .sum()
}

/// Number of coordinates, closing coordinates of rings included.
pub fn coord_count(polygon: &MultiPolygon<Real>) -> usize {
    polygon
        .iter()
        .map(|part| part.exterior().0.len() + part.interiors().iter().map(|ring| ring.0.len()).sum::<usize>())
        .sum()
}
