//! Planar geometry kernel used by the centerline engine.
//!
//! `geo` supplies the geometry model, containment, measures, densification and
//! simplification;
//! `spade` supplies the Delaunay triangulation the voronoi edges are read from
//! and `rstar` the spatial index. The remaining primitives (line clipping,
//! tolerance based repeated point removal, grid snapping, validity checks and
//! line merging) live here.

pub mod clip;
pub mod index;
pub mod line_merge;
pub mod measure;
pub mod precision;
pub mod segmentize;
pub mod traits;
pub mod validate;
pub mod voronoi;

pub use index::EdgeIndex;
pub use traits::GeometryKernel;

/// The default kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoKernel;

impl GeometryKernel for GeoKernel {}
