//! Repeated point removal and grid snapping.

use crate::errors::KernelError;
use crate::float_types::Real;
use geo::{Coord, Distance, Euclidean, LineString, MapCoords, MultiPolygon, Point, Polygon, RemoveRepeatedPoints};

#[inline]
fn distance(a: Coord<Real>, b: Coord<Real>) -> Real {
    Euclidean::distance(Point::from(a), Point::from(b))
}

fn dedup_ring(ring: &LineString<Real>, tolerance: Real) -> Result<LineString<Real>, KernelError> {
    let Some((&first, rest)) = ring.0.split_first() else {
        return Ok(ring.clone());
    };

    let mut coords = vec![first];
    // The closing coordinate is re-added below, so only the ring body is scanned.
    let body = if ring.is_closed() { &rest[..rest.len().saturating_sub(1)] } else { rest };
    for &coord in body {
        if let Some(&last) = coords.last() {
            if distance(last, coord) > tolerance {
                coords.push(coord);
            }
        }
    }
    while coords.len() > 1 && coords.last().is_some_and(|&last| distance(last, first) <= tolerance) {
        coords.pop();
    }
    coords.push(first);

    if coords.len() < 4 {
        return Err(KernelError::MalformedRing { count: coords.len() });
    }
    Ok(LineString::new(coords))
}

/// Removes consecutive ring coordinates that lie within `tolerance` of the previously kept one.
///
/// Fails with [`KernelError::MalformedRing`] when a ring is left with less than 4 coordinates.
pub fn remove_repeated_points(
    polygon: &MultiPolygon<Real>,
    tolerance: Real,
) -> Result<MultiPolygon<Real>, KernelError> {
    let parts = polygon
        .iter()
        .map(|part| {
            let exterior = dedup_ring(part.exterior(), tolerance)?;
            let interiors = part
                .interiors()
                .iter()
                .map(|ring| dedup_ring(ring, tolerance))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Polygon::new(exterior, interiors))
        })
        .collect::<Result<Vec<_>, KernelError>>()?;
    Ok(MultiPolygon::new(parts))
}

/// Rounds every coordinate to a multiple of `grid_size` and drops the repeats this creates.
pub fn snap_precision(polygon: &MultiPolygon<Real>, grid_size: Real) -> MultiPolygon<Real> {
    if grid_size <= 0.0 {
        return polygon.clone();
    }
    polygon
        .map_coords(|coord| Coord {
            x: (coord.x / grid_size).round() * grid_size,
            y: (coord.y / grid_size).round() * grid_size,
        })
        .remove_repeated_points()
}
