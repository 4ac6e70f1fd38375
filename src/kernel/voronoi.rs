//! Voronoi edges of a point set, derived from the dual of a Delaunay triangulation.
//!
//! Each inner Delaunay face contributes its circumcenter as a voronoi vertex. A
//! Delaunay edge shared by two faces becomes the segment between their
//! circumcenters; a convex hull edge becomes a ray, which is cut off once it is
//! further from the sites' envelope than the envelope's own diagonal.
//!
//! The sites are triangulated relative to the lower left corner of their envelope and
//! circumcenters closer than `tolerance()` times the envelope diagonal share one vertex.

use crate::errors::KernelError;
use crate::float_types::{Real, tolerance};
use geo::{Coord, LineString, MultiLineString};
use hashbrown::{HashMap, HashSet};
use spade::handles::{FixedFaceHandle, InnerTag, VoronoiVertex};
use spade::{DelaunayTriangulation, Point2, Triangulation};

/// Groups circumcenters that lie within `cell` of each other into one voronoi vertex,
/// placed at the mean of its members.
///
/// Nearly cocircular sites give circumcenters that differ by rounding noise only.
struct VertexClusters {
    cell: Real,
    grid: HashMap<(i64, i64), Vec<usize>>,
    seeds: Vec<Coord<Real>>,
    sums: Vec<(Real, Real, usize)>,
}

impl VertexClusters {
    fn new(cell: Real) -> Self {
        Self {
            cell,
            grid: HashMap::new(),
            seeds: Vec::new(),
            sums: Vec::new(),
        }
    }

    #[inline]
    fn cell_of(&self, coord: Coord<Real>) -> (i64, i64) {
        ((coord.x / self.cell).floor() as i64, (coord.y / self.cell).floor() as i64)
    }

    fn insert(&mut self, position: Point2<Real>) -> usize {
        let coord = Coord {
            x: position.x,
            y: position.y,
        };
        let (cx, cy) = self.cell_of(coord);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(members) = self.grid.get(&(cx + dx, cy + dy)) else { continue };
                if let Some(&id) = members.iter().find(|&&id| {
                    let seed = self.seeds[id];
                    (seed.x - coord.x).hypot(seed.y - coord.y) <= self.cell
                }) {
                    let sum = &mut self.sums[id];
                    *sum = (sum.0 + coord.x, sum.1 + coord.y, sum.2 + 1);
                    return id;
                }
            }
        }
        let id = self.seeds.len();
        self.seeds.push(coord);
        self.sums.push((coord.x, coord.y, 1));
        self.grid.entry((cx, cy)).or_default().push(id);
        id
    }

    fn position(&self, id: usize) -> Coord<Real> {
        let (x, y, n) = self.sums[id];
        Coord {
            x: x / n as Real,
            y: y / n as Real,
        }
    }
}

/// Circumcenter of a triangle, solved from the corner opposite its longest side.
///
/// The two short sides keep the squared lengths of a sliver free of cancellation.
fn circumcenter(corners: [Point2<Real>; 3]) -> Option<Point2<Real>> {
    let side = |i: usize| {
        let (p, q) = (corners[(i + 1) % 3], corners[(i + 2) % 3]);
        (q.x - p.x).hypot(q.y - p.y)
    };
    let apex = (0..3).max_by(|&i, &j| side(i).total_cmp(&side(j)))?;
    let p0 = corners[apex];
    let (p1, p2) = (corners[(apex + 1) % 3], corners[(apex + 2) % 3]);
    let b = (p1.x - p0.x, p1.y - p0.y);
    let c = (p2.x - p0.x, p2.y - p0.y);
    let d = 2.0 * (b.0 * c.1 - c.0 * b.1);
    if d == 0.0 {
        return None;
    }
    let len_b = b.0 * b.0 + b.1 * b.1;
    let len_c = c.0 * c.0 + c.1 * c.1;
    Some(Point2::new(
        p0.x + (len_b * c.1 - len_c * b.1) / d,
        p0.y + (b.0 * len_c - c.0 * len_b) / d,
    ))
}

#[inline]
fn coord_key(coord: &Coord<Real>) -> (u64, u64) {
    // +0.0 folds negative zero onto positive zero
    ((coord.x + 0.0).to_bits() as u64, (coord.y + 0.0).to_bits() as u64)
}

/// Computes the edges of the voronoi diagram of `sites`.
///
/// Fails with [`KernelError::DegeneratePointArray`] when fewer than three distinct,
/// non-collinear, finite sites are given.
pub fn voronoi_edges(
    sites: impl IntoIterator<Item = Coord<Real>>,
) -> Result<MultiLineString<Real>, KernelError> {
    let mut unique = HashSet::new();
    let coords: Vec<Coord<Real>> = sites
        .into_iter()
        .filter(|coord| unique.insert(coord_key(coord)))
        .collect();

    if coords.len() < 3 {
        return Err(KernelError::DegeneratePointArray(format!(
            "{} distinct sites, at least 3 are needed",
            coords.len()
        )));
    }

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (Real::MAX, Real::MAX, Real::MIN, Real::MIN);
    for c in &coords {
        min_x = min_x.min(c.x);
        min_y = min_y.min(c.y);
        max_x = max_x.max(c.x);
        max_y = max_y.max(c.y);
    }
    let diagonal = (max_x - min_x).hypot(max_y - min_y);

    let origin = Coord { x: min_x, y: min_y };
    let points: Vec<Point2<Real>> = coords
        .iter()
        .map(|c| Point2::new(c.x - origin.x, c.y - origin.y))
        .collect();
    let (sum_x, sum_y) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let centroid = Coord {
        x: sum_x / points.len() as Real,
        y: sum_y / points.len() as Real,
    };

    let triangulation: DelaunayTriangulation<Point2<Real>> =
        DelaunayTriangulation::bulk_load(points).map_err(|err| {
            KernelError::DegeneratePointArray(format!("triangulation rejected a site: {err:?}"))
        })?;
    if triangulation.all_vertices_on_line() {
        return Err(KernelError::DegeneratePointArray(
            "all sites are collinear".to_string(),
        ));
    }

    let mut clusters = VertexClusters::new(tolerance() * diagonal.max(1.0));
    let vertex_of: HashMap<_, usize> = triangulation
        .inner_faces()
        .map(|face| {
            let corners = face.vertices().map(|vertex| vertex.position());
            let center = circumcenter(corners).unwrap_or_else(|| face.circumcenter());
            (face.fix(), clusters.insert(center))
        })
        .collect();
    let vertex = |face: FixedFaceHandle<InnerTag>| vertex_of.get(&face).map(|&id| clusters.position(id));

    let mut edges = Vec::new();
    for edge in triangulation.undirected_voronoi_edges() {
        let edge = edge.as_directed();
        let (from, to) = match (edge.from(), edge.to()) {
            (VoronoiVertex::Inner(a), VoronoiVertex::Inner(b)) => {
                match (vertex(a.fix()), vertex(b.fix())) {
                    (Some(from), Some(to)) => (from, to),
                    _ => continue,
                }
            },
            (VoronoiVertex::Inner(face), VoronoiVertex::Outer(_))
            | (VoronoiVertex::Outer(_), VoronoiVertex::Inner(face)) => {
                let Some(start) = vertex(face.fix()) else { continue };
                let hull_edge = edge.as_delaunay_edge();
                let a = hull_edge.from().position();
                let b = hull_edge.to().position();

                // Outward normal of the hull edge: all sites are on the centroid's side.
                let mut normal = Coord {
                    x: -(b.y - a.y),
                    y: b.x - a.x,
                };
                let mid = Coord {
                    x: (a.x + b.x) / 2.0,
                    y: (a.y + b.y) / 2.0,
                };
                if normal.x * (mid.x - centroid.x) + normal.y * (mid.y - centroid.y) < 0.0 {
                    normal = Coord {
                        x: -normal.x,
                        y: -normal.y,
                    };
                }
                let norm = normal.x.hypot(normal.y);
                if norm == 0.0 {
                    continue;
                }

                // Long enough to leave the sites' envelope wherever the ray starts inside it.
                let reach = (start.x - mid.x).hypot(start.y - mid.y) + diagonal;
                let end = Coord {
                    x: start.x + normal.x / norm * reach,
                    y: start.y + normal.y / norm * reach,
                };
                (start, end)
            },
            (VoronoiVertex::Outer(_), VoronoiVertex::Outer(_)) => continue,
        };
        if from != to {
            let back = |c: Coord<Real>| Coord {
                x: c.x + origin.x,
                y: c.y + origin.y,
            };
            edges.push(LineString::new(vec![back(from), back(to)]));
        }
    }

    Ok(MultiLineString::new(edges))
}
