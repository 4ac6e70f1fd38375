//! Clipping of lines to the interior of a polygon, in the input's own float coordinates.

use crate::float_types::Real;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Coord, Line, LineString, MultiLineString, MultiPolygon};

/// Position of `point` along `segment`, 0 at its start and 1 at its end.
#[inline]
fn parameter(segment: Line<Real>, point: Coord<Real>) -> Real {
    let d = segment.delta();
    let length2 = d.x * d.x + d.y * d.y;
    if length2 == 0.0 {
        return 0.0;
    }
    ((point.x - segment.start.x) * d.x + (point.y - segment.start.y) * d.y) / length2
}

/// Splits `segment` at every crossing with a ring of `polygon`.
fn split_points(polygon: &MultiPolygon<Real>, segment: Line<Real>) -> Vec<(Real, Coord<Real>)> {
    let mut points = vec![(0.0, segment.start), (1.0, segment.end)];
    let rings = polygon
        .iter()
        .flat_map(|part| std::iter::once(part.exterior()).chain(part.interiors()));
    for edge in rings.flat_map(|ring| ring.lines()) {
        match line_intersection(segment, edge) {
            None => {},
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                points.push((parameter(segment, intersection), intersection));
            },
            Some(LineIntersection::Collinear { intersection }) => {
                points.push((parameter(segment, intersection.start), intersection.start));
                points.push((parameter(segment, intersection.end), intersection.end));
            },
        }
    }
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    points.dedup_by(|a, b| a.1 == b.1);
    points
}

/// The parts of `lines` that run through the interior of `polygon`.
///
/// Pieces lying on the boundary are dropped. Consecutive interior pieces of one input
/// line stay joined.
pub fn clip_lines(polygon: &MultiPolygon<Real>, lines: &MultiLineString<Real>) -> MultiLineString<Real> {
    let mut clipped = Vec::new();
    for line in lines {
        let mut run: Vec<Coord<Real>> = Vec::new();
        for segment in line.lines() {
            let points = split_points(polygon, segment);
            for pair in points.windows(2) {
                let (start, end) = (pair[0].1, pair[1].1);
                let mid = Coord {
                    x: (start.x + end.x) / 2.0,
                    y: (start.y + end.y) / 2.0,
                };
                if polygon.coordinate_position(&mid) == CoordPos::Inside {
                    if run.last() != Some(&start) {
                        if run.len() >= 2 {
                            clipped.push(LineString::new(std::mem::take(&mut run)));
                        }
                        run.clear();
                        run.push(start);
                    }
                    run.push(end);
                } else if run.len() >= 2 {
                    clipped.push(LineString::new(std::mem::take(&mut run)));
                } else {
                    run.clear();
                }
            }
        }
        if run.len() >= 2 {
            clipped.push(LineString::new(run));
        }
    }
    MultiLineString::new(clipped)
}
