//! Radial gradient mask generator.

use crate::error::{NodeError, NodeResult};
use iop_core::{DrawEngine, check_row_buffer};
use iop_math::{LookupCurve, percent, saturate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Gradient`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientParams {
    /// Gradient center in pixel coordinates.
    pub position: (f32, f32),
    /// Distance at which the curve input reaches 1; must be positive.
    pub radius: f32,
    /// Output `1 - weight` instead of `weight`.
    pub invert: bool,
    /// Falloff remap curve; identity by default.
    #[cfg_attr(feature = "serde", serde(skip, default = "LookupCurve::identity"))]
    pub curve: LookupCurve,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            position: (1024.0, 768.0),
            radius: 1000.0,
            invert: false,
            curve: LookupCurve::identity(),
        }
    }
}

/// Radial gradient generator.
///
/// Each pixel's Euclidean distance from the center, as a fraction of the
/// radius, is remapped through the falloff curve; the weight is optionally
/// inverted and clamped to [0, 1].
///
/// # Example
///
/// ```rust
/// use iop_core::DrawEngine;
/// use iop_nodes::pattern::{Gradient, GradientParams};
///
/// let gradient = Gradient::new(GradientParams {
///     position: (0.0, 0.0),
///     radius: 10.0,
///     ..GradientParams::default()
/// })
/// .unwrap();
/// let mut row = vec![0.0f32; 3];
/// gradient.fill_row(0, 0, 3, &mut row).unwrap();
/// assert_eq!(row[0], 0.0); // at the center
/// ```
#[derive(Debug)]
pub struct Gradient {
    params: GradientParams,
}

impl Gradient {
    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive radius (it divides every distance).
    pub fn new(params: GradientParams) -> NodeResult<Self> {
        if params.radius <= 0.0 {
            return Err(NodeError::InvalidParameter(format!(
                "gradient radius {} must be > 0",
                params.radius
            )));
        }
        Ok(Self { params })
    }

    /// Current configuration.
    pub fn params(&self) -> &GradientParams {
        &self.params
    }
}

impl DrawEngine for Gradient {
    fn fill_row(&self, y: i32, x: i32, r: i32, buffer: &mut [f32]) -> iop_core::Result<()> {
        check_row_buffer(x, r, buffer.len())?;
        let (cx, cy) = self.params.position;
        let dy = y as f32 - cy;

        for (i, px) in (x..r).enumerate() {
            let dx = px as f32 - cx;
            let distance = (dx * dx + dy * dy).sqrt();
            let along = percent(0.0, self.params.radius, distance);
            let weight = self.params.curve.value(along);
            let value = if self.params.invert { 1.0 - weight } else { weight };
            buffer[i] = saturate(value);
        }
        Ok(())
    }
}
