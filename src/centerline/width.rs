//! Width estimation of areal geometries.

use crate::float_types::{PI, Real};
use crate::kernel::measure::perimeter;
use geo::{Area, MultiPolygon};
use std::cell::OnceCell;

/// **Average width of a polygon**
///
/// The polygon is treated as a rectangle with the same perimeter `P` and area `A`.
/// Solving `w·l = A` and `2·(w + l) = P` for the smaller side gives:
/// ```text
/// w = P/4 - √max((P/4)² - A, 0)
/// ```
/// Exact for rectangles, a reasonable estimate for elongated shapes, and never
/// NaN thanks to the clamp on the radicand.
pub fn average_width(polygon: &MultiPolygon<Real>) -> Real {
    let quarter = perimeter(polygon) / 4.0;
    let area = polygon.unsigned_area();
    quarter - (quarter * quarter - area).max(0.0).sqrt()
}

/// Polsby–Popper index, `4π·A / P²`: 1 for a disc, close to 0 for slivers.
pub fn compactness(polygon: &MultiPolygon<Real>) -> Real {
    let length = perimeter(polygon);
    if length == 0.0 {
        return 0.0;
    }
    4.0 * PI * polygon.unsigned_area() / (length * length)
}

/// The average width of one input, computed on first use and reused afterwards.
pub struct AverageWidth<'a> {
    polygon: &'a MultiPolygon<Real>,
    cell: OnceCell<Real>,
}

impl<'a> AverageWidth<'a> {
    pub const fn new(polygon: &'a MultiPolygon<Real>) -> Self {
        Self {
            polygon,
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Real {
        *self.cell.get_or_init(|| average_width(self.polygon))
    }

    pub fn is_computed(&self) -> bool {
        self.cell.get().is_some()
    }
}
