//! Canonical coordinate order for line results.

use super::Centerline;
use crate::float_types::Real;
use geo::{Coord, LineString, MultiLineString};
use std::cmp::Ordering;

#[inline]
fn compare_coords(a: &Coord<Real>, b: &Coord<Real>) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Orders lines by coordinate count first, then coordinate by coordinate.
fn compare_lines(a: &LineString<Real>, b: &LineString<Real>) -> Ordering {
    a.0.len().cmp(&b.0.len()).then_with(|| {
        a.0.iter()
            .zip(&b.0)
            .map(|(ca, cb)| compare_coords(ca, cb))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Reverses `line` if, walking in from both ends, the first differing front coordinate
/// is the greater one.
pub fn normalize_line(line: &mut LineString<Real>) {
    let n = line.0.len();
    for i in 0..n / 2 {
        match compare_coords(&line.0[i], &line.0[n - 1 - i]) {
            Ordering::Less => return,
            Ordering::Greater => {
                line.0.reverse();
                return;
            },
            Ordering::Equal => {},
        }
    }
}

/// Normalizes every part, then sorts the parts in descending order.
pub fn normalize_parts(mut parts: Vec<LineString<Real>>) -> Vec<LineString<Real>> {
    for part in &mut parts {
        normalize_line(part);
    }
    parts.sort_by(|a, b| compare_lines(b, a));
    parts
}

/// Normal form of a centerline; a single part becomes a [`Centerline::Line`].
pub fn normalize(lines: MultiLineString<Real>) -> Centerline {
    let mut parts = normalize_parts(lines.0);
    if parts.len() == 1 {
        if let Some(line) = parts.pop() {
            return Centerline::Line(line);
        }
    }
    Centerline::MultiLine(MultiLineString::new(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    #[test]
    fn line_starts_at_smaller_end() {
        let mut line = line_string![(x: 9.0, y: 1.0), (x: 1.0, y: 1.0)];
        normalize_line(&mut line);
        assert_eq!(line, line_string![(x: 1.0, y: 1.0), (x: 9.0, y: 1.0)]);

        let mut l_shape = line_string![(x: 9.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 9.0)];
        normalize_line(&mut l_shape);
        assert_eq!(l_shape.0[0], Coord { x: 1.0, y: 9.0 });
    }

    #[test]
    fn parts_sorted_descending_by_size_then_coordinates() {
        let parts = normalize_parts(vec![
            line_string![(x: -1.25, y: 9.75), (x: 1.0, y: 8.75)],
            line_string![(x: 1.0, y: 8.75), (x: 3.25, y: 9.75)],
            line_string![(x: 1.0, y: 8.75), (x: 1.0, y: 1.0), (x: 9.0, y: 1.0)],
        ]);
        assert_eq!(parts[0].0.len(), 3);
        assert_eq!(parts[1].0[1], Coord { x: 3.25, y: 9.75 });
        assert_eq!(parts[2].0[0], Coord { x: -1.25, y: 9.75 });
    }

    #[test]
    fn single_part_becomes_line() {
        let single = MultiLineString::new(vec![line_string![(x: 2.0, y: 0.0), (x: 0.0, y: 0.0)]]);
        assert_eq!(
            normalize(single),
            Centerline::Line(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0)])
        );
    }
}
