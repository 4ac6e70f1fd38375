//! Raw skeleton: the voronoi edges that lie inside the polygon.

use crate::errors::KernelError;
use crate::float_types::{Real, SNAP_GRID_SIZE};
use crate::kernel::GeometryKernel;
use geo::{LineString, MultiLineString, MultiPolygon};
use log::{debug, warn};

/// Builds the voronoi edges of `densified` and keeps those inside `original`.
///
/// A degenerate point array is retried once after snapping the sites to a
/// [`SNAP_GRID_SIZE`] grid. When no edge lies strictly inside the polygon, the
/// unfiltered edges are clipped to it instead.
pub fn extract_skeleton<K: GeometryKernel>(
    kernel: &K,
    densified: &MultiPolygon<Real>,
    original: &MultiPolygon<Real>,
) -> Result<MultiLineString<Real>, KernelError> {
    let edges = match kernel.voronoi_edges(densified) {
        Ok(edges) => edges,
        Err(KernelError::DegeneratePointArray(reason)) => {
            warn!("skeleton: {reason}, retrying on a {SNAP_GRID_SIZE} grid");
            kernel.voronoi_edges(&kernel.snap_precision(densified, SNAP_GRID_SIZE))?
        },
        Err(err) => return Err(err),
    };

    let inside = kernel.contains(original, &edges.0);
    let mut kept: Vec<LineString<Real>> = edges
        .0
        .iter()
        .zip(inside)
        .filter_map(|(edge, inside)| inside.then(|| edge.clone()))
        .collect();
    debug!("skeleton: {} of {} voronoi edges inside the polygon", kept.len(), edges.0.len());

    Ok(match kept.len() {
        0 => {
            debug!("skeleton: no edge strictly inside, clipping the voronoi edges instead");
            kernel.line_merge(&kernel.clip(original, &edges))
        },
        1 => MultiLineString::new(vec![kept.remove(0)]),
        _ => kernel.line_merge(&MultiLineString::new(kept)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::GeoKernel;
    use geo::{Coord, polygon};
    use std::cell::Cell;

    fn rectangle() -> MultiPolygon<Real> {
        MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 2.0),
            (x: 10.0, y: 2.0),
            (x: 10.0, y: 0.0),
        ]])
    }

    #[test]
    fn rectangle_skeleton_runs_along_the_long_axis() {
        let polygon = rectangle();
        let densified = GeoKernel.segmentize(&polygon, 2.0);
        let skeleton = extract_skeleton(&GeoKernel, &densified, &polygon).unwrap();
        assert_eq!(skeleton.0.len(), 1);
        let line = &skeleton.0[0];
        assert!(line.0.iter().all(|c| (c.y - 1.0).abs() < 1e-9));
        let xs: Vec<Real> = line.0.iter().map(|c| c.x).collect();
        let min = xs.iter().copied().fold(Real::MAX, Real::min);
        let max = xs.iter().copied().fold(Real::MIN, Real::max);
        assert!((min - 1.0).abs() < 1e-9 && (max - 9.0).abs() < 1e-9);
    }

    #[test]
    fn square_falls_back_to_clipping() {
        let polygon = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 0.0, y: 10.0),
            (x: 10.0, y: 10.0),
            (x: 10.0, y: 0.0),
        ]]);
        let skeleton = extract_skeleton(&GeoKernel, &polygon, &polygon).unwrap();
        // four arms from the center to the middle of each side
        assert_eq!(skeleton.0.len(), 4);
        for arm in &skeleton.0 {
            assert!(arm.0.contains(&Coord { x: 5.0, y: 5.0 }));
        }
    }

    /// Reports a degenerate point array on the first call only.
    struct FlakyVoronoi {
        calls: Cell<usize>,
    }

    impl GeometryKernel for FlakyVoronoi {
        fn voronoi_edges(&self, polygon: &MultiPolygon<Real>) -> Result<MultiLineString<Real>, KernelError> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() == 1 {
                return Err(KernelError::DegeneratePointArray("test".to_string()));
            }
            GeoKernel.voronoi_edges(polygon)
        }
    }

    #[test]
    fn degenerate_voronoi_is_retried_once() {
        let polygon = rectangle();
        let kernel = FlakyVoronoi { calls: Cell::new(0) };
        let skeleton = extract_skeleton(&kernel, &polygon, &polygon).unwrap();
        assert_eq!(kernel.calls.get(), 2);
        assert!(!skeleton.0.is_empty());
    }

    #[test]
    fn second_failure_propagates() {
        struct BrokenVoronoi;
        impl GeometryKernel for BrokenVoronoi {
            fn voronoi_edges(&self, _: &MultiPolygon<Real>) -> Result<MultiLineString<Real>, KernelError> {
                Err(KernelError::DegeneratePointArray("test".to_string()))
            }
        }
        let polygon = rectangle();
        assert!(matches!(
            extract_skeleton(&BrokenVoronoi, &polygon, &polygon),
            Err(KernelError::DegeneratePointArray(_))
        ));
    }
}
