//! Validity checks on input polygons and on repaired geometries.

use crate::errors::ValidationError;
use crate::float_types::Real;
use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Intersects, Line, LineString, MultiPolygon, Point, Polygon};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, RTreeObject};

/// Segments of `ring`, skipping the zero length ones left by repeated coordinates.
fn segments(ring: &LineString<Real>) -> Vec<Line<Real>> {
    ring.lines().filter(|segment| segment.start != segment.end).collect()
}

fn validate_ring(ring: &LineString<Real>) -> Result<(), ValidationError> {
    let coords = &ring.0;
    if let Some(bad) = coords.iter().find(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(ValidationError::InvalidCoordinate(*bad));
    }
    let segments = segments(ring);
    if segments.len() < 3 {
        return Err(ValidationError::TooFewPoints(coords.first().copied()));
    }
    let (first, last) = (coords[0], coords[coords.len() - 1]);
    if first != last {
        return Err(ValidationError::RingNotClosed { first, last });
    }

    // Neighbouring segments may only share their common vertex.
    let index = SegmentIndex::build(&segments);
    let n = segments.len();
    for (i, j) in index.candidate_pairs() {
        let adjacent = j == i + 1 || (i == 0 && j == n - 1);
        match line_intersection(segments[i], segments[j]) {
            None => {},
            Some(LineIntersection::SinglePoint { intersection, .. }) => {
                if !adjacent {
                    return Err(ValidationError::RingSelfIntersection(intersection));
                }
            },
            Some(LineIntersection::Collinear { intersection }) => {
                if !adjacent || intersection.start != intersection.end {
                    return Err(ValidationError::RingSelfIntersection(intersection.start));
                }
            },
        }
    }
    Ok(())
}

/// Rings of one polygon may touch in single points but never cross or share an edge.
fn validate_ring_pair(a: &LineString<Real>, b: &LineString<Real>) -> Result<(), ValidationError> {
    let (a, b) = (segments(a), segments(b));
    let index = SegmentIndex::build(&b);
    for segment in &a {
        for j in index.overlapping(segment) {
            match line_intersection(*segment, b[j]) {
                Some(LineIntersection::SinglePoint { intersection, is_proper: true }) => {
                    return Err(ValidationError::SelfIntersection(intersection));
                },
                Some(LineIntersection::Collinear { intersection }) if intersection.start != intersection.end => {
                    return Err(ValidationError::SelfIntersection(intersection.start));
                },
                _ => {},
            }
        }
    }
    Ok(())
}

fn validate_polygon(polygon: &Polygon<Real>) -> Result<(), ValidationError> {
    validate_ring(polygon.exterior())?;
    let shell = Polygon::new(polygon.exterior().clone(), vec![]);
    for (i, hole) in polygon.interiors().iter().enumerate() {
        validate_ring(hole)?;
        validate_ring_pair(polygon.exterior(), hole)?;
        for other in &polygon.interiors()[i + 1..] {
            validate_ring_pair(hole, other)?;
        }
        let off_shell = hole.0.iter().find(|c| !polygon.exterior().0.contains(c));
        if let Some(&coord) = off_shell {
            if !shell.intersects(&Point::from(coord)) {
                return Err(ValidationError::HoleOutsideShell(coord));
            }
        }
    }
    Ok(())
}

/// Checks every ring of a (multi)polygon, reporting the first problem found.
///
/// Exactly repeated consecutive coordinates are accepted; every other ring defect, two
/// rings of a polygon crossing and a hole outside its shell are not.
pub fn validate(polygon: &MultiPolygon<Real>) -> Result<(), ValidationError> {
    polygon
        .iter()
        .filter(|part| !part.exterior().0.is_empty())
        .try_for_each(validate_polygon)
}

/// R-tree over segment envelopes, for the pairwise intersection checks.
struct SegmentIndex {
    tree: RTree<GeomWithData<Rectangle<[Real; 2]>, usize>>,
}

impl SegmentIndex {
    fn build(segments: &[Line<Real>]) -> Self {
        let envelopes = segments
            .iter()
            .enumerate()
            .map(|(idx, segment)| GeomWithData::new(envelope(segment), idx))
            .collect();
        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    fn overlapping(&self, segment: &Line<Real>) -> impl Iterator<Item = usize> + '_ {
        let rect = envelope(segment);
        self.tree
            .locate_in_envelope_intersecting(&rect.envelope())
            .map(|entry| entry.data)
    }

    /// Every pair `(i, j)` with `i < j` whose envelopes overlap.
    fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .tree
            .intersection_candidates_with_other_tree(&self.tree)
            .filter(|(a, b)| a.data < b.data)
            .map(|(a, b)| (a.data, b.data))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

#[inline]
fn envelope(segment: &Line<Real>) -> Rectangle<[Real; 2]> {
    Rectangle::from_corners([segment.start.x, segment.start.y], [segment.end.x, segment.end.y])
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn square_is_valid() {
        let square = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
        ]]);
        assert_eq!(validate(&square), Ok(()));
    }

    #[test]
    fn bowtie_self_intersects() {
        let bowtie = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
        ]]);
        assert!(matches!(
            validate(&bowtie),
            Err(ValidationError::RingSelfIntersection(_))
        ));
    }

    #[test]
    fn spike_back_along_edge_is_invalid() {
        let spike = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
        ]]);
        assert!(validate(&spike).is_err());
    }

    #[test]
    fn repeated_coordinates_are_accepted() {
        let square = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 1.0, y: 1.0),
            (x: 1.0, y: 0.0),
        ]]);
        assert_eq!(validate(&square), Ok(()));
    }

    #[test]
    fn collapsed_ring_has_too_few_points() {
        let flat = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ]]);
        assert!(matches!(validate(&flat), Err(ValidationError::TooFewPoints(_))));
    }

    #[test]
    fn hole_crossing_the_shell() {
        let polygon = MultiPolygon::new(vec![polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 0.0, y: 10.0),
                (x: 10.0, y: 10.0),
                (x: 10.0, y: 0.0),
            ],
            interiors: [[
                (x: 8.0, y: 4.0),
                (x: 8.0, y: 6.0),
                (x: 12.0, y: 6.0),
                (x: 12.0, y: 4.0),
            ]],
        )]);
        assert!(matches!(
            validate(&polygon),
            Err(ValidationError::SelfIntersection(_))
        ));
    }

    #[test]
    fn hole_touching_the_shell_in_one_point() {
        let polygon = MultiPolygon::new(vec![polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 0.0, y: 10.0),
                (x: 10.0, y: 10.0),
                (x: 10.0, y: 0.0),
            ],
            interiors: [[
                (x: 0.0, y: 5.0),
                (x: 5.0, y: 6.0),
                (x: 5.0, y: 4.0),
            ]],
        )]);
        assert_eq!(validate(&polygon), Ok(()));
    }

    #[test]
    fn hole_outside_shell() {
        let polygon = MultiPolygon::new(vec![polygon!(
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 0.0, y: 1.0),
                (x: 1.0, y: 1.0),
                (x: 1.0, y: 0.0),
            ],
            interiors: [[
                (x: 5.0, y: 5.0),
                (x: 5.0, y: 6.0),
                (x: 6.0, y: 6.0),
                (x: 5.0, y: 5.0),
            ]],
        )]);
        assert!(matches!(
            validate(&polygon),
            Err(ValidationError::HoleOutsideShell(_))
        ));
    }
}
