//! Centerline extraction of areal geometries.
//!
//! The pipeline runs per input polygon:
//!
//! 1. [`densify`](densify::densify) the boundary, adaptively to the average width
//! 2. [`extract_skeleton`](skeleton::extract_skeleton) from the voronoi edges inside the polygon
//! 3. [`prune`](prune::prune) the short dangling branches
//! 4. simplify, optionally [`extend`](extend::extend_lines_to_boundary) the dangling ends
//!    to the boundary and [`normalize`](normalize::normalize) the result
//!
//! Tunables given as negative numbers are relative to the average width of the input,
//! see [`Parameter`].

pub mod densify;
pub mod extend;
pub mod normalize;
pub mod options;
pub mod prune;
pub mod skeleton;
pub mod width;

pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use options::{CenterlineOptions, Parameter};
pub use traits::CenterlineOps;

#[cfg(not(feature = "parallel"))]
pub use serial::SerialCenterlineOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelCenterlineOps;

use crate::errors::CenterlineError;
use crate::float_types::Real;
use crate::kernel::{GeoKernel, GeometryKernel};
use geo::{CoordsIter, Geometry, HasDimensions, LineString, MultiLineString, MultiPolygon, Polygon};
use log::debug;
use width::AverageWidth;

/// The centerline of one input: a single line, or several parts.
#[derive(Debug, Clone, PartialEq)]
pub enum Centerline {
    Line(LineString<Real>),
    MultiLine(MultiLineString<Real>),
}

impl Centerline {
    /// Number of line parts.
    pub fn len(&self) -> usize {
        match self {
            Centerline::Line(_) => 1,
            Centerline::MultiLine(lines) => lines.0.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The parts as a multi line string.
    pub fn into_multi_line_string(self) -> MultiLineString<Real> {
        match self {
            Centerline::Line(line) => MultiLineString::new(vec![line]),
            Centerline::MultiLine(lines) => lines,
        }
    }
}

impl From<Centerline> for Geometry<Real> {
    fn from(centerline: Centerline) -> Self {
        match centerline {
            Centerline::Line(line) => Geometry::LineString(line),
            Centerline::MultiLine(lines) => Geometry::MultiLineString(lines),
        }
    }
}

/// Name of the geometry kind, as used in error messages.
pub const fn geometry_kind(geometry: &Geometry<Real>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Computes the centerline of an areal geometry with the default [`GeoKernel`].
///
/// Returns `Ok(None)` for an empty polygon. See [`centerline_with_kernel`].
pub fn centerline(
    geometry: &Geometry<Real>,
    options: &CenterlineOptions,
) -> Result<Option<Centerline>, CenterlineError> {
    centerline_with_kernel(&GeoKernel, geometry, options)
}

/// Computes the centerline of `geometry` on top of `kernel`.
///
/// `Polygon`, `MultiPolygon`, `Rect` and `Triangle` are accepted, a multipolygon yielding
/// one skeleton over all of its parts. Every other kind is rejected with
/// [`CenterlineError::UnsupportedGeometry`] and an input failing the kernel's validity
/// check with [`CenterlineError::InvalidGeometry`]. Failures inside the pipeline are
/// reported as [`CenterlineError::Geometry`], naming the kind and the first coordinate of
/// the input.
pub fn centerline_with_kernel<K: GeometryKernel>(
    kernel: &K,
    geometry: &Geometry<Real>,
    options: &CenterlineOptions,
) -> Result<Option<Centerline>, CenterlineError> {
    let kind = geometry_kind(geometry);
    let polygon = match geometry {
        Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon.clone()]),
        Geometry::MultiPolygon(polygon) => polygon.clone(),
        Geometry::Rect(rect) => MultiPolygon::new(vec![rect.to_polygon()]),
        Geometry::Triangle(triangle) => MultiPolygon::new(vec![triangle.to_polygon()]),
        _ => return Err(CenterlineError::UnsupportedGeometry { kind }),
    };
    run(kernel, &polygon, kind, options)
}

/// [`centerline`] for a polygon.
pub fn centerline_polygon(
    polygon: &Polygon<Real>,
    options: &CenterlineOptions,
) -> Result<Option<Centerline>, CenterlineError> {
    run(&GeoKernel, &MultiPolygon::new(vec![polygon.clone()]), "Polygon", options)
}

/// [`centerline`] for a multipolygon.
pub fn centerline_multi_polygon(
    polygon: &MultiPolygon<Real>,
    options: &CenterlineOptions,
) -> Result<Option<Centerline>, CenterlineError> {
    run(&GeoKernel, polygon, "MultiPolygon", options)
}

/// [`centerline`] over many inputs, in parallel when the `parallel` feature is enabled.
///
/// Output `i` belongs to input `i`; `None` inputs yield `Ok(None)`.
pub fn centerline_all(
    geometries: &[Option<Geometry<Real>>],
    options: &CenterlineOptions,
) -> Vec<Result<Option<Centerline>, CenterlineError>> {
    #[cfg(not(feature = "parallel"))]
    let ops = SerialCenterlineOps::new();
    #[cfg(feature = "parallel")]
    let ops = ParallelCenterlineOps::new();
    ops.centerline_all(geometries, options)
}

fn run<K: GeometryKernel>(
    kernel: &K,
    polygon: &MultiPolygon<Real>,
    kind: &'static str,
    options: &CenterlineOptions,
) -> Result<Option<Centerline>, CenterlineError> {
    if polygon.is_empty() {
        return Ok(None);
    }
    kernel.is_valid(polygon).map_err(CenterlineError::InvalidGeometry)?;
    pipeline(kernel, polygon, options).map(Some).map_err(|source| {
        let (x, y) = polygon
            .coords_iter()
            .next()
            .map_or((Real::NAN, Real::NAN), |coord| (coord.x, coord.y));
        CenterlineError::Geometry {
            kind,
            x,
            y,
            source: Box::new(source),
        }
    })
}

fn pipeline<K: GeometryKernel>(
    kernel: &K,
    polygon: &MultiPolygon<Real>,
    options: &CenterlineOptions,
) -> Result<Centerline, CenterlineError> {
    let width = AverageWidth::new(polygon);

    let densified = densify::densify(kernel, polygon, Parameter::from_signed(options.densify_distance), &width)?;
    let mut lines = skeleton::extract_skeleton(kernel, &densified, polygon)?;

    let min_branch_length = Parameter::from_signed(options.min_branch_length).resolve(&width);
    if min_branch_length > 0.0 {
        lines = prune::prune(kernel, &lines, min_branch_length);
    }

    let simplify_tolerance = options
        .simplify_tolerance
        .map(|tolerance| Parameter::from_signed(tolerance).resolve(&width));
    if let Some(tolerance) = simplify_tolerance {
        lines = kernel.simplify(&lines, tolerance);
    }

    if options.extend {
        lines = extend::extend_lines_to_boundary(&lines, polygon);
    }

    debug!(
        "centerline: min_branch_length {min_branch_length}, simplify_tolerance {simplify_tolerance:?}, \
         average width {}, {} parts",
        if width.is_computed() { width.get() } else { Real::NAN },
        lines.0.len()
    );
    Ok(normalize::normalize(lines))
}
