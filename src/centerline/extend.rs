//! Extension of dangling line ends up to the polygon boundary.

use crate::float_types::Real;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{BoundingRect, Coord, Distance, Euclidean, Line, LineString, MultiLineString, MultiPolygon, Point, Rect};
use hashbrown::HashMap;

/// Returns the segment `p1 → p2` scaled by `ratio` around the fixed end.
///
/// For a positive ratio `p1` stays fixed and the second point moves to
/// `p1 + ratio·(p2 - p1)`; for a negative ratio that moved point is returned first
/// and `p2` stays fixed.
pub fn extend_line_by_ratio(p1: Coord<Real>, p2: Coord<Real>, ratio: Real) -> (Coord<Real>, Coord<Real>) {
    let extended = Coord {
        x: p1.x + ratio * (p2.x - p1.x),
        y: p1.y + ratio * (p2.y - p1.y),
    };
    if ratio > 0.0 { (p1, extended) } else { (extended, p2) }
}

/// Stretches the infinite line through `p1` and `p2` until both ends lie on the border of `bbox`.
pub fn extend_line_to_bbox(p1: Coord<Real>, p2: Coord<Real>, bbox: Rect<Real>) -> (Coord<Real>, Coord<Real>) {
    let (min, max) = (bbox.min(), bbox.max());
    if p1.x == p2.x {
        return (Coord { x: p1.x, y: min.y }, Coord { x: p1.x, y: max.y });
    }
    if p1.y == p2.y {
        return (Coord { x: min.x, y: p1.y }, Coord { x: max.x, y: p1.y });
    }

    // y = k·x + m
    let k = (p2.y - p1.y) / (p2.x - p1.x);
    let m = p1.y - k * p1.x;
    let mut candidates = [
        Coord { x: min.x, y: k * min.x + m },
        Coord { x: max.x, y: k * max.x + m },
        Coord { x: (min.y - m) / k, y: min.y },
        Coord { x: (max.y - m) / k, y: max.y },
    ];
    let outside = |c: &Coord<Real>| -> Real {
        let dx = (min.x - c.x).max(0.0).max(c.x - max.x);
        let dy = (min.y - c.y).max(0.0).max(c.y - max.y);
        dx.hypot(dy)
    };
    candidates.sort_by(|a, b| outside(a).total_cmp(&outside(b)));
    // a line through a corner yields that corner twice
    let first = candidates[0];
    let second = candidates[1..].iter().copied().find(|c| *c != first).unwrap_or(candidates[1]);
    (first, second)
}

#[inline]
fn distance(a: Coord<Real>, b: Coord<Real>) -> Real {
    Euclidean::distance(Point::from(a), Point::from(b))
}

#[inline]
fn endpoint_key(coord: Coord<Real>) -> (u64, u64) {
    ((coord.x + 0.0).to_bits() as u64, (coord.y + 0.0).to_bits() as u64)
}

/// Nearest point where the ray `from → far` meets a polygon ring.
fn first_boundary_hit(polygon: &MultiPolygon<Real>, ray: Line<Real>) -> Option<Coord<Real>> {
    polygon
        .iter()
        .flat_map(|part| std::iter::once(part.exterior()).chain(part.interiors()))
        .flat_map(|ring| ring.lines())
        .filter_map(|edge| match line_intersection(ray, edge)? {
            LineIntersection::SinglePoint { intersection, .. } => Some(intersection),
            LineIntersection::Collinear { intersection } => {
                if distance(ray.start, intersection.start) <= distance(ray.start, intersection.end) {
                    Some(intersection.start)
                } else {
                    Some(intersection.end)
                }
            },
        })
        .min_by(|a, b| distance(ray.start, *a).total_cmp(&distance(ray.start, *b)))
}

/// Whether `extension` touches the network anywhere but at its own start, ignoring the
/// segment it continues.
fn crosses_network(lines: &[LineString<Real>], extension: Line<Real>, continued: (usize, usize)) -> bool {
    lines.iter().enumerate().any(|(line_idx, line)| {
        line.lines().enumerate().any(|(segment_idx, segment)| {
            if (line_idx, segment_idx) == continued {
                return false;
            }
            match line_intersection(extension, segment) {
                None => false,
                Some(LineIntersection::SinglePoint { intersection, .. }) => intersection != extension.start,
                Some(LineIntersection::Collinear { .. }) => true,
            }
        })
    })
}

/// Moves every dangling end of `lines` along its last segment up to the boundary of `polygon`.
///
/// An end is dangling when no other line end shares its coordinate. An end stays where it
/// is when the way to the boundary would cross another part of the network.
pub fn extend_lines_to_boundary(lines: &MultiLineString<Real>, polygon: &MultiPolygon<Real>) -> MultiLineString<Real> {
    let Some(bbox) = polygon.bounding_rect() else {
        return lines.clone();
    };
    let reach = bbox.width().hypot(bbox.height());

    let mut degree: HashMap<(u64, u64), usize> = HashMap::new();
    for line in lines.iter().filter(|line| line.0.len() >= 2) {
        *degree.entry(endpoint_key(line.0[0])).or_insert(0) += 1;
        *degree.entry(endpoint_key(line.0[line.0.len() - 1])).or_insert(0) += 1;
    }

    let mut extended = lines.0.clone();
    for (line_idx, line) in lines.iter().enumerate() {
        let n = line.0.len();
        if n < 2 {
            continue;
        }
        // (index of the end, index of its neighbour, index of the segment between them)
        for (end, inner, segment) in [(0, 1, 0), (n - 1, n - 2, n - 2)] {
            let tip = line.0[end];
            if degree.get(&endpoint_key(tip)).copied().unwrap_or(0) != 1 {
                continue;
            }
            let length = distance(line.0[inner], tip);
            if length == 0.0 {
                continue;
            }
            let (_, far) = extend_line_by_ratio(line.0[inner], tip, (length + reach) / length);
            let Some(hit) = first_boundary_hit(polygon, Line::new(tip, far)) else {
                continue;
            };
            if hit == tip || crosses_network(&lines.0, Line::new(tip, hit), (line_idx, segment)) {
                continue;
            }
            extended[line_idx].0[end] = hit;
        }
    }
    MultiLineString::new(extended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    fn l_shape() -> MultiPolygon<Real> {
        MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 10.0),
            (x: 2.0, y: 10.0),
            (x: 2.0, y: 2.0),
            (x: 10.0, y: 2.0),
            (x: 10.0, y: 0.0),
        ]])
    }

    #[test]
    fn ratio_extension() {
        let (a, b) = extend_line_by_ratio(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }, 3.0);
        assert_eq!(a, Coord { x: 0.0, y: 0.0 });
        assert_eq!(b, Coord { x: 3.0, y: 3.0 });
        let (a, b) = extend_line_by_ratio(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }, -1.0);
        assert_eq!(a, Coord { x: -1.0, y: -1.0 });
        assert_eq!(b, Coord { x: 1.0, y: 1.0 });
    }

    #[test]
    fn bbox_extension() {
        let bbox = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 });
        let (a, b) = extend_line_to_bbox(Coord { x: 2.0, y: 3.0 }, Coord { x: 2.0, y: 4.0 }, bbox);
        assert_eq!((a, b), (Coord { x: 2.0, y: 0.0 }, Coord { x: 2.0, y: 10.0 }));

        let (a, b) = extend_line_to_bbox(Coord { x: 1.0, y: 1.0 }, Coord { x: 2.0, y: 2.0 }, bbox);
        let mut ends = [a, b];
        ends.sort_by(|p, q| p.x.total_cmp(&q.x));
        assert_eq!(ends, [Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }]);
    }

    #[test]
    fn l_centerline_reaches_the_boundary() {
        let lines = MultiLineString::new(vec![line_string![
            (x: 1.0, y: 9.0),
            (x: 1.0, y: 1.0),
            (x: 9.0, y: 1.0),
        ]]);
        let extended = extend_lines_to_boundary(&lines, &l_shape());
        assert_eq!(
            extended.0[0],
            line_string![(x: 1.0, y: 10.0), (x: 1.0, y: 1.0), (x: 10.0, y: 1.0)]
        );
    }

    #[test]
    fn junction_ends_stay() {
        let lines = MultiLineString::new(vec![
            line_string![(x: 1.0, y: 1.0), (x: 1.0, y: 9.0)],
            line_string![(x: 1.0, y: 1.0), (x: 9.0, y: 1.0)],
        ]);
        let extended = extend_lines_to_boundary(&lines, &l_shape());
        assert_eq!(extended.0[0].0[0], Coord { x: 1.0, y: 1.0 });
        assert_eq!(extended.0[0].0[1], Coord { x: 1.0, y: 10.0 });
        assert_eq!(extended.0[1].0[1], Coord { x: 10.0, y: 1.0 });
    }

    #[test]
    fn blocked_extension_stays() {
        let square = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 0.0),
        ]]);
        // the spur pointing right would have to cross the vertical line
        let lines = MultiLineString::new(vec![
            line_string![(x: 1.0, y: 5.0), (x: 3.0, y: 5.0)],
            line_string![(x: 6.0, y: 1.0), (x: 6.0, y: 9.0)],
        ]);
        let extended = extend_lines_to_boundary(&lines, &square);
        assert_eq!(extended.0[0].0[1], Coord { x: 3.0, y: 5.0 });
        assert_eq!(extended.0[0].0[0], Coord { x: 0.0, y: 5.0 });
        assert_eq!(extended.0[1].0[0], Coord { x: 6.0, y: 0.0 });
    }
}
