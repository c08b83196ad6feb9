//! Checkerboard generator.

use crate::error::{NodeError, NodeResult};
use iop_core::{DrawEngine, check_row_buffer};
use iop_math::smooth_pulse;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Check`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckParams {
    /// Square width in pixels; must be positive.
    pub scale_x: f32,
    /// Square height in pixels; must be positive.
    pub scale_y: f32,
    /// Edge softness in percent of a square (0 = hard edges).
    pub fuzzy: f32,
    /// Board rotation in degrees.
    pub angle_deg: f32,
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            scale_x: 8.0,
            scale_y: 8.0,
            fuzzy: 0.0,
            angle_deg: 0.0,
        }
    }
}

/// Checkerboard generator.
///
/// Pixel coordinates are rotated, scaled into square units, and classified
/// by parity of their integer cell; a fuzz amount fades square edges with a
/// smooth pulse over each axis' fractional part.
///
/// # Example
///
/// ```rust
/// use iop_core::DrawEngine;
/// use iop_nodes::pattern::{Check, CheckParams};
///
/// let check = Check::new(CheckParams::default()).unwrap();
/// let mut row = vec![0.0f32; 16];
/// check.fill_row(0, 0, 16, &mut row).unwrap();
/// // Hard edges: strictly two-valued
/// assert!(row.iter().all(|&v| v == 0.0 || v == 1.0));
/// ```
#[derive(Debug)]
pub struct Check {
    params: CheckParams,
}

/// Shifts coordinates positive before integer truncation so the parity test
/// never sees the sign-of-modulo asymmetry at negative coordinates.
const PARITY_OFFSET: f32 = 100_000.0;

impl Check {
    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Rejects non-positive scales and negative fuzz.
    pub fn new(params: CheckParams) -> NodeResult<Self> {
        if params.scale_x <= 0.0 || params.scale_y <= 0.0 {
            return Err(NodeError::InvalidParameter(format!(
                "check scales ({}, {}) must be > 0",
                params.scale_x, params.scale_y
            )));
        }
        if params.fuzzy < 0.0 {
            return Err(NodeError::InvalidParameter(
                "fuzzy must be >= 0".into(),
            ));
        }
        Ok(Self { params })
    }

    /// Current configuration.
    pub fn params(&self) -> &CheckParams {
        &self.params
    }
}

impl DrawEngine for Check {
    fn fill_row(&self, y: i32, x: i32, r: i32, buffer: &mut [f32]) -> iop_core::Result<()> {
        check_row_buffer(x, r, buffer.len())?;
        let angle = self.params.angle_deg.to_radians();
        let (sin, cos) = angle.sin_cos();
        let fy = y as f32;

        for (i, px) in (x..r).enumerate() {
            let fx = px as f32;
            let nx = (cos * fx + sin * fy) / self.params.scale_x;
            let ny = (-sin * fx + cos * fy) / self.params.scale_y;

            let on = (nx + PARITY_OFFSET) as i32 % 2 != (ny + PARITY_OFFSET) as i32 % 2;
            let mut value = if on { 1.0 } else { 0.0 };

            if self.params.fuzzy != 0.0 {
                let fuzz = self.params.fuzzy / 100.0;
                let ax = smooth_pulse(0.0, fuzz, 1.0 - fuzz, 1.0, nx % 1.0);
                let ay = smooth_pulse(0.0, fuzz, 1.0 - fuzz, 1.0, ny % 1.0);
                value *= ax * ay;
            }

            buffer[i] = value;
        }
        Ok(())
    }
}
