//! Validation, kernel and centerline errors

use crate::float_types::Real;
use geo::Coord;

/// All the possible validation issues we might encounter on a polygon ring
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// (HoleOutsideShell) A hole is *not* contained by its outer shell
    #[error("(HoleOutsideShell) A hole is *not* contained by its outer shell at: {0:?}")]
    HoleOutsideShell(Coord<Real>),
    /// (SelfIntersection) Two rings of a polygon cross or share an edge
    #[error("(SelfIntersection) Two rings of a polygon intersect at: {0:?}")]
    SelfIntersection(Coord<Real>),
    /// (RingSelfIntersection) A linear ring has a self‐intersection
    #[error("(RingSelfIntersection) A linear ring has a self-intersection at: {0:?}")]
    RingSelfIntersection(Coord<Real>),
    /// (TooFewPoints) A ring has fewer than the minimal #points
    #[error("(TooFewPoints) A ring has fewer than 4 coordinates at: {0:?}")]
    TooFewPoints(Option<Coord<Real>>),
    /// (InvalidCoordinate) The coordinate has a NaN or infinite
    #[error("(InvalidCoordinate) The coordinate {0:?} has a NaN or infinite")]
    InvalidCoordinate(Coord<Real>),
    /// (RingNotClosed) The ring’s first/last points differ
    #[error("(RingNotClosed) The ring's first({first:?}) and last({last:?}) points differ")]
    RingNotClosed { first: Coord<Real>, last: Coord<Real> },
}

/// Failures raised by a [`GeometryKernel`](crate::kernel::GeometryKernel)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    /// Removing repeated points left a ring with too few coordinates
    #[error("ring collapsed to {count} coordinates while removing repeated points")]
    MalformedRing { count: usize },
    /// The voronoi diagram cannot be built from the given sites
    #[error("degenerate point array: {0}")]
    DegeneratePointArray(String),
    /// A geometry failed its validity check
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Errors returned by the centerline operations
#[derive(Debug, thiserror::Error)]
pub enum CenterlineError {
    /// The input is not an areal geometry
    #[error("unsupported geometry type {kind}, expected an areal geometry")]
    UnsupportedGeometry { kind: &'static str },
    /// The input polygon is not valid, e.g. a self-intersecting ring
    #[error("invalid input geometry: {0}")]
    InvalidGeometry(ValidationError),
    /// A kernel failure that survived its retry
    #[error(transparent)]
    Kernel(#[from] KernelError),
    /// Any stage failure, annotated with the input it happened on
    #[error("Error for {kind} at ({x}, {y}): {source}")]
    Geometry {
        kind: &'static str,
        x: Real,
        y: Real,
        source: Box<CenterlineError>,
    },
}

impl CenterlineError {
    /// Returns the innermost error, looking through [`CenterlineError::Geometry`] annotations.
    pub fn root_cause(&self) -> &CenterlineError {
        match self {
            CenterlineError::Geometry { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
