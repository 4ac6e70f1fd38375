//! Traits for batch centerline operations.

use super::{Centerline, CenterlineOptions};
use crate::errors::CenterlineError;
use crate::float_types::Real;
use geo::Geometry;

/// Trait for computing the centerlines of many geometries at once.
pub trait CenterlineOps {
    /// Computes the centerline of every input.
    ///
    /// Output `i` always belongs to input `i`. A failing input only fails its own slot
    /// and `None` inputs yield `Ok(None)`.
    fn centerline_all(
        &self,
        geometries: &[Option<Geometry<Real>>],
        options: &CenterlineOptions,
    ) -> Vec<Result<Option<Centerline>, CenterlineError>>;
}
