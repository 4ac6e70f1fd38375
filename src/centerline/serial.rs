//! Serial implementation of batch centerline operations.

use super::traits::CenterlineOps;
use super::{Centerline, CenterlineOptions, centerline_with_kernel};
use crate::errors::CenterlineError;
use crate::float_types::Real;
use crate::kernel::{GeoKernel, GeometryKernel};
use geo::Geometry;

/// Serial implementation of `CenterlineOps`.
#[derive(Debug, Clone, Default)]
pub struct SerialCenterlineOps<K: GeometryKernel = GeoKernel> {
    kernel: K,
}

impl SerialCenterlineOps {
    pub fn new() -> Self {
        Self { kernel: GeoKernel }
    }
}

impl<K: GeometryKernel> SerialCenterlineOps<K> {
    pub const fn with_kernel(kernel: K) -> Self {
        Self { kernel }
    }
}

impl<K: GeometryKernel> CenterlineOps for SerialCenterlineOps<K> {
    fn centerline_all(
        &self,
        geometries: &[Option<Geometry<Real>>],
        options: &CenterlineOptions,
    ) -> Vec<Result<Option<Centerline>, CenterlineError>> {
        geometries
            .iter()
            .map(|geometry| match geometry {
                Some(geometry) => centerline_with_kernel(&self.kernel, geometry, options),
                None => Ok(None),
            })
            .collect()
    }
}
