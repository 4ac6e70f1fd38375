//! Test support library
//! Polygon builders and small structural inspectors shared by the integration tests.
#![allow(dead_code)]

use geo::{Coord, LineString, MultiPolygon, Polygon, polygon};
use geoops::Centerline;
use geoops::float_types::Real;

pub const EPSILON: Real = 1e-6;

pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn approx_coord(a: Coord<Real>, b: (Real, Real)) -> bool {
    approx_eq(a.x, b.0, EPSILON) && approx_eq(a.y, b.1, EPSILON)
}

/// Asserts that `line` has exactly the given coordinates, up to [`EPSILON`].
pub fn assert_line(line: &LineString<Real>, expected: &[(Real, Real)]) {
    assert_eq!(line.0.len(), expected.len(), "unexpected coordinates: {:?}", line.0);
    for (coord, expected) in line.0.iter().zip(expected) {
        assert!(approx_coord(*coord, *expected), "{coord:?} != {expected:?} in {:?}", line.0);
    }
}

/// Asserts the parts of `centerline`, in order, up to [`EPSILON`].
pub fn assert_parts(centerline: &Centerline, expected: &[&[(Real, Real)]]) {
    let lines = centerline.clone().into_multi_line_string();
    assert_eq!(lines.0.len(), expected.len(), "unexpected parts: {lines:?}");
    if expected.len() == 1 {
        assert!(matches!(centerline, Centerline::Line(_)), "a single part must be a line");
    }
    for (line, expected) in lines.iter().zip(expected) {
        assert_line(line, expected);
    }
}

pub fn line_length(line: &LineString<Real>) -> Real {
    line.lines().map(|segment| segment.dx().hypot(segment.dy())).sum()
}

/// Axis aligned rectangle with its lower left corner at `(x, y)`.
pub fn rectangle(x: Real, y: Real, length: Real, width: Real) -> Polygon<Real> {
    polygon![
        (x: x, y: y),
        (x: x, y: y + width),
        (x: x + length, y: y + width),
        (x: x + length, y: y),
    ]
}

/// Two arms of width 2 and outer length 10 meeting at the origin.
pub fn l_shape() -> Polygon<Real> {
    polygon![
        (x: 0.0, y: 0.0),
        (x: 0.0, y: 10.0),
        (x: 2.0, y: 10.0),
        (x: 2.0, y: 2.0),
        (x: 10.0, y: 2.0),
        (x: 10.0, y: 0.0),
    ]
}

/// Polygon from its exterior coordinates; the ring is closed automatically.
pub fn ring(coords: &[(Real, Real)]) -> Polygon<Real> {
    Polygon::new(LineString::from(coords.to_vec()), vec![])
}

pub fn square(size: Real) -> Polygon<Real> {
    rectangle(0.0, 0.0, size, size)
}

pub fn multi(polygons: Vec<Polygon<Real>>) -> MultiPolygon<Real> {
    MultiPolygon::new(polygons)
}

/// Whether `coord` lies inside or on the bounding box of `polygon`.
pub fn within_bounds(polygon: &Polygon<Real>, coord: Coord<Real>) -> bool {
    use geo::BoundingRect;
    polygon.bounding_rect().is_some_and(|rect| {
        coord.x >= rect.min().x - EPSILON
            && coord.x <= rect.max().x + EPSILON
            && coord.y >= rect.min().y - EPSILON
            && coord.y <= rect.max().y + EPSILON
    })
}
