//! Parallel implementation of batch centerline operations.

use super::traits::CenterlineOps;
use super::{Centerline, CenterlineOptions, centerline_with_kernel};
use crate::errors::CenterlineError;
use crate::float_types::Real;
use crate::kernel::{GeoKernel, GeometryKernel};
use geo::Geometry;
use rayon::prelude::*;

/// Parallel implementation of `CenterlineOps`, one rayon task per input.
#[derive(Debug, Clone, Default)]
pub struct ParallelCenterlineOps<K: GeometryKernel + Sync = GeoKernel> {
    kernel: K,
}

impl ParallelCenterlineOps {
    pub fn new() -> Self {
        Self { kernel: GeoKernel }
    }
}

impl<K: GeometryKernel + Sync> ParallelCenterlineOps<K> {
    pub const fn with_kernel(kernel: K) -> Self {
        Self { kernel }
    }
}

impl<K: GeometryKernel + Sync> CenterlineOps for ParallelCenterlineOps<K> {
    fn centerline_all(
        &self,
        geometries: &[Option<Geometry<Real>>],
        options: &CenterlineOptions,
    ) -> Vec<Result<Option<Centerline>, CenterlineError>> {
        // indexed collect keeps the input order
        geometries
            .par_iter()
            .map(|geometry| match geometry {
                Some(geometry) => centerline_with_kernel(&self.kernel, geometry, options),
                None => Ok(None),
            })
            .collect()
    }
}
