//! Adaptive densification of the polygon boundary before the voronoi step.

use super::options::Parameter;
use super::width::{AverageWidth, compactness};
use crate::errors::KernelError;
use crate::float_types::{DEDUP_TOLERANCE, MAX_DENSIFY_FACTOR, MIN_COMPACTNESS, Real, SNAP_GRID_SIZE};
use crate::kernel::GeometryKernel;
use crate::kernel::measure::{coord_count, perimeter};
use crate::kernel::segmentize::segmentized_coord_count;
use log::{debug, warn};
use geo::MultiPolygon;

/// Resolves `densify_distance` into the maximum boundary segment length; 0 means no densification.
///
/// A width relative distance is ignored for slivers, where the width estimate means
/// nothing, and is raised when it would multiply the coordinate count by more than
/// [`MAX_DENSIFY_FACTOR`].
pub fn max_segment_length(
    polygon: &MultiPolygon<Real>,
    densify_distance: Parameter,
    width: &AverageWidth<'_>,
) -> Real {
    match densify_distance {
        Parameter::Disabled => 0.0,
        Parameter::Absolute(length) => length,
        Parameter::WidthFactor(factor) => {
            if compactness(polygon) < MIN_COMPACTNESS {
                debug!("densify: compactness below {MIN_COMPACTNESS}, skipping densification");
                return 0.0;
            }
            let mut length = factor * width.get();
            if length <= 0.0 || !length.is_finite() {
                return 0.0;
            }

            let current = coord_count(polygon);
            let factor_increase = (perimeter(polygon) / length) / current as Real;
            if factor_increase > MAX_DENSIFY_FACTOR {
                debug!(
                    "densify: x{factor_increase:.1} coordinate increase, capping to x{MAX_DENSIFY_FACTOR}"
                );
                length *= factor_increase / MAX_DENSIFY_FACTOR;
            }

            // Every segment is rounded up to a whole number of pieces, so the estimate
            // above can still overshoot the cap by up to one coordinate per segment.
            let cap = (current as Real * MAX_DENSIFY_FACTOR) as usize;
            while segmentized_coord_count(polygon, length) > cap {
                length *= 1.05;
            }
            length
        },
    }
}

/// Densifies `polygon` and removes repeated points, ready to be handed to the voronoi step.
///
/// A malformed ring during repeated point removal is repaired once by snapping to a
/// [`SNAP_GRID_SIZE`] grid. When the repair is not valid either, the densified geometry
/// is used as is.
pub fn densify<K: GeometryKernel>(
    kernel: &K,
    polygon: &MultiPolygon<Real>,
    densify_distance: Parameter,
    width: &AverageWidth<'_>,
) -> Result<MultiPolygon<Real>, KernelError> {
    let length = max_segment_length(polygon, densify_distance, width);
    let densified = if length > 0.0 {
        let densified = kernel.segmentize(polygon, length);
        debug!(
            "densify: max segment length {length}, {} -> {} coordinates",
            coord_count(polygon),
            coord_count(&densified)
        );
        densified
    } else {
        polygon.clone()
    };

    match kernel.remove_repeated_points(&densified, DEDUP_TOLERANCE) {
        Ok(deduplicated) => Ok(deduplicated),
        Err(KernelError::MalformedRing { count }) => {
            warn!("densify: ring collapsed to {count} coordinates, snapping to a {SNAP_GRID_SIZE} grid");
            let repaired = kernel.snap_precision(&densified, SNAP_GRID_SIZE);
            match kernel.is_valid(&repaired) {
                Ok(()) => Ok(repaired),
                Err(err) => {
                    warn!("densify: discarding invalid repair ({err}), keeping the densified geometry");
                    Ok(densified)
                },
            }
        },
        Err(err) => Err(err),
    }
}
