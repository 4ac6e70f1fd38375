//! Tunables of the centerline operation.

use super::width::AverageWidth;
use crate::float_types::Real;

/// A tunable given as a signed number.
///
/// - `value == 0`: [`Parameter::Disabled`]
/// - `value > 0`: [`Parameter::Absolute`], used as is
/// - `value < 0`: [`Parameter::WidthFactor`], `|value|` times the average width of the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    Disabled,
    Absolute(Real),
    WidthFactor(Real),
}

impl Parameter {
    pub fn from_signed(value: Real) -> Self {
        if value > 0.0 {
            Parameter::Absolute(value)
        } else if value < 0.0 {
            Parameter::WidthFactor(-value)
        } else {
            Parameter::Disabled
        }
    }

    /// The literal value, computing the average width only if it is needed.
    pub fn resolve(self, width: &AverageWidth<'_>) -> Real {
        match self {
            Parameter::Disabled => 0.0,
            Parameter::Absolute(value) => value,
            Parameter::WidthFactor(factor) => factor * width.get(),
        }
    }
}

impl From<Real> for Parameter {
    fn from(value: Real) -> Self {
        Self::from_signed(value)
    }
}

/// Options of [`centerline`](super::centerline).
///
/// Negative values are multiplied by the average width of each input polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterlineOptions {
    /// Maximum boundary segment length before the voronoi diagram is built; 0 disables.
    pub densify_distance: Real,
    /// Dangling branches shorter than this are pruned; 0 disables.
    pub min_branch_length: Real,
    /// Douglas–Peucker tolerance for the result; `None` skips simplification.
    pub simplify_tolerance: Option<Real>,
    /// Extend the dangling ends of the result up to the polygon boundary.
    pub extend: bool,
}

impl Default for CenterlineOptions {
    fn default() -> Self {
        Self {
            densify_distance: -1.0,
            min_branch_length: -1.0,
            simplify_tolerance: Some(-0.25),
            extend: false,
        }
    }
}

impl CenterlineOptions {
    pub const fn with_densify_distance(mut self, densify_distance: Real) -> Self {
        self.densify_distance = densify_distance;
        self
    }

    pub const fn with_min_branch_length(mut self, min_branch_length: Real) -> Self {
        self.min_branch_length = min_branch_length;
        self
    }

    pub const fn with_simplify_tolerance(mut self, simplify_tolerance: Option<Real>) -> Self {
        self.simplify_tolerance = simplify_tolerance;
        self
    }

    pub const fn with_extend(mut self, extend: bool) -> Self {
        self.extend = extend;
        self
    }
}
