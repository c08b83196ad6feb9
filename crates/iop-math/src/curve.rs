//! User-editable 1-D lookup curves.
//!
//! A [`LookupCurve`] is a piecewise cubic Hermite through sorted control
//! points, each carrying its own tangent slope. The gradient generator remaps
//! percent-distance through one of these; the default curve is the exact
//! identity (two points with unit slopes).
//!
//! # Usage
//!
//! ```rust
//! use iop_math::{CurvePoint, LookupCurve};
//!
//! let curve = LookupCurve::identity();
//! assert_eq!(curve.value(0.25), 0.25);
//!
//! // An ease-in-out: flat tangents at both ends
//! let ease = LookupCurve::new(vec![
//!     CurvePoint::new(0.0, 0.0, 0.0),
//!     CurvePoint::new(1.0, 1.0, 0.0),
//! ])
//! .unwrap();
//! assert_eq!(ease.value(0.5), 0.5);
//! assert!(ease.value(0.1) < 0.1);
//! ```

/// A control point with position and tangent slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Input coordinate.
    pub x: f32,
    /// Output coordinate.
    pub y: f32,
    /// Tangent slope (dy/dx) at this point.
    pub slope: f32,
}

impl CurvePoint {
    /// Creates a control point.
    #[inline]
    pub const fn new(x: f32, y: f32, slope: f32) -> Self {
        Self { x, y, slope }
    }
}

/// A piecewise cubic Hermite lookup curve.
///
/// Evaluation clamps to the endpoint values outside the control-point
/// domain. A curve carries at least two points: [`LookupCurve::new`] sorts
/// them by `x` and refuses anything shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupCurve {
    points: Vec<CurvePoint>,
}

impl LookupCurve {
    /// Creates a curve from control points, sorting them by `x`.
    ///
    /// Returns `None` for fewer than two points; a curve with no segments
    /// cannot be evaluated.
    pub fn new(mut points: Vec<CurvePoint>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        Some(Self { points })
    }

    /// The identity curve: (0,0) to (1,1) with unit slopes, exactly y = x
    /// over [0, 1].
    pub fn identity() -> Self {
        Self {
            points: vec![
                CurvePoint::new(0.0, 0.0, 1.0),
                CurvePoint::new(1.0, 1.0, 1.0),
            ],
        }
    }

    /// The control points, sorted by `x`.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Evaluates the curve at `x`.
    ///
    /// Outside the first/last control point the endpoint value is returned.
    pub fn value(&self, x: f32) -> f32 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // Find the segment containing x
        let mut i = 0;
        while i + 2 < self.points.len() && self.points[i + 1].x <= x {
            i += 1;
        }
        let p0 = self.points[i];
        let p1 = self.points[i + 1];

        let h = p1.x - p0.x;
        if h <= 0.0 {
            // Coincident points degenerate to a step
            return p1.y;
        }
        let t = (x - p0.x) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;

        h00 * p0.y + h10 * h * p0.slope + h01 * p1.y + h11 * h * p1.slope
    }
}

impl Default for LookupCurve {
    fn default() -> Self {
        Self::identity()
    }
}
