//! Non-standard spatial operations on [`geo`] polygons, built around an
//! approximate **centerline** (medial axis) with branch pruning.
//!
//! The centerline is read from the voronoi diagram of the densified polygon boundary:
//! the voronoi edges inside the polygon form a raw skeleton, whose short dangling
//! branches are pruned away until only the main axes remain.
//!
//! ```
//! use geo::{Geometry, polygon};
//! use geoops::{Centerline, CenterlineOptions, centerline};
//!
//! let rectangle = polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 2.0), (x: 10.0, y: 2.0), (x: 10.0, y: 0.0)];
//! let result = centerline(&Geometry::Polygon(rectangle), &CenterlineOptions::default()).unwrap();
//! assert!(matches!(result, Some(Centerline::Line(_))));
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for batches of geometries

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod centerline;
pub mod errors;
pub mod float_types;
pub mod kernel;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use centerline::{
    Centerline, CenterlineOps, CenterlineOptions, Parameter, centerline, centerline_all,
    centerline_multi_polygon, centerline_polygon, centerline_with_kernel,
};
pub use errors::CenterlineError;
pub use kernel::{GeoKernel, GeometryKernel};
