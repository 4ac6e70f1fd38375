//! R-tree over the bounding boxes of a set of line strings.

use crate::float_types::Real;
use geo::{BoundingRect, Coord, LineString};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

type IndexedEnvelope = GeomWithData<Rectangle<[Real; 2]>, usize>;

/// Read-only spatial index answering "which edges may touch this point".
///
/// Queries only compare bounding boxes; callers re-check exact intersection.
pub struct EdgeIndex {
    tree: RTree<IndexedEnvelope>,
}

impl EdgeIndex {
    /// Bulk loads the index; the data of each entry is the edge's position in `edges`.
    pub fn build(edges: &[LineString<Real>]) -> Self {
        let envelopes = edges
            .iter()
            .enumerate()
            .filter_map(|(idx, edge)| {
                let rect = edge.bounding_rect()?;
                Some(GeomWithData::new(
                    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
                    idx,
                ))
            })
            .collect();
        Self {
            tree: RTree::bulk_load(envelopes),
        }
    }

    /// Candidate edge ids whose envelope contains `point`.
    pub fn query(&self, point: Coord<Real>) -> impl Iterator<Item = usize> + '_ {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([point.x, point.y]))
            .map(|entry| entry.data)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
