//! The operations the centerline engine needs from a planar geometry kernel.

use super::{clip, line_merge, precision, segmentize, validate, voronoi};
use crate::errors::{KernelError, ValidationError};
use crate::float_types::Real;
use geo::{CoordsIter, LineString, MultiLineString, MultiPolygon, PreparedGeometry, Relate, Simplify};

/// Trait for the geometry kernel behind the centerline pipeline.
///
/// Every operation has a default implementation on top of `geo`, `spade` and the
/// helpers in this module; [`GeoKernel`](super::GeoKernel) uses them all as is.
pub trait GeometryKernel {
    /// Removes ring coordinates closer than `tolerance` to their predecessor.
    fn remove_repeated_points(
        &self,
        polygon: &MultiPolygon<Real>,
        tolerance: Real,
    ) -> Result<MultiPolygon<Real>, KernelError> {
        precision::remove_repeated_points(polygon, tolerance)
    }

    /// Rounds coordinates to a grid of `grid_size`.
    fn snap_precision(&self, polygon: &MultiPolygon<Real>, grid_size: Real) -> MultiPolygon<Real> {
        precision::snap_precision(polygon, grid_size)
    }

    /// Checks that every ring is closed, finite, simple and large enough.
    fn is_valid(&self, polygon: &MultiPolygon<Real>) -> Result<(), ValidationError> {
        validate::validate(polygon)
    }

    /// Inserts vertices so that no segment exceeds `max_segment_length`.
    fn segmentize(&self, polygon: &MultiPolygon<Real>, max_segment_length: Real) -> MultiPolygon<Real> {
        segmentize::segmentize(polygon, max_segment_length)
    }

    /// Edges of the voronoi diagram of all coordinates of `polygon`.
    fn voronoi_edges(&self, polygon: &MultiPolygon<Real>) -> Result<MultiLineString<Real>, KernelError> {
        voronoi::voronoi_edges(polygon.coords_iter())
    }

    /// For each line, whether it lies in the interior of `polygon`.
    fn contains(&self, polygon: &MultiPolygon<Real>, lines: &[LineString<Real>]) -> Vec<bool> {
        let prepared = PreparedGeometry::from(polygon);
        lines
            .iter()
            .map(|line| prepared.relate(line).is_contains())
            .collect()
    }

    /// The parts of `lines` inside `polygon`.
    fn clip(&self, polygon: &MultiPolygon<Real>, lines: &MultiLineString<Real>) -> MultiLineString<Real> {
        clip::clip_lines(polygon, lines)
    }

    /// Sews lines into maximal runs through nodes where exactly two lines meet.
    fn line_merge(&self, lines: &MultiLineString<Real>) -> MultiLineString<Real> {
        line_merge::line_merge(lines)
    }

    /// Douglas–Peucker simplification, applied to each line on its own.
    fn simplify(&self, lines: &MultiLineString<Real>, tolerance: Real) -> MultiLineString<Real> {
        lines.simplify(&tolerance)
    }
}
