//! Julia set generator.
//!
//! Same plane mapping and escape loop as the Mandelbrot engine, but the
//! complex constant `c` is user-supplied and fixed while `z` starts at the
//! mapped pixel coordinate.

use super::{Plane, Shading, check_iteration_cap, check_plane, escape_time};
use crate::error::NodeResult;
use iop_core::{DrawEngine, check_row_buffer};
use iop_math::Complex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Julia`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JuliaParams {
    /// Fractal plane width in pixels.
    pub width: f64,
    /// Fractal plane height in pixels.
    pub height: f64,
    /// Magnification; larger zooms out.
    pub zoom: f64,
    /// Bailout radius; escape is tested against its square.
    pub max_value_extent: f64,
    /// Pan of the view along the real axis.
    pub move_x: f64,
    /// Pan of the view along the imaginary axis.
    pub move_y: f64,
    /// Real part of the fixed constant.
    pub c_real: f64,
    /// Imaginary part of the fixed constant.
    pub c_imag: f64,
    /// Iteration cap; must be positive.
    pub max_iterations: u32,
    /// Output shading mode.
    pub shading: Shading,
    /// Threshold for [`Shading::Ranged`].
    pub range_limit: f64,
}

impl Default for JuliaParams {
    fn default() -> Self {
        Self {
            width: 2048.0,
            height: 1556.0,
            zoom: 1.0,
            max_value_extent: 2.0,
            move_x: 0.0,
            move_y: 0.0,
            c_real: -0.7,
            c_imag: 0.27015,
            max_iterations: 300,
            shading: Shading::Smooth,
            range_limit: 0.5,
        }
    }
}

/// Julia escape-time generator.
#[derive(Debug)]
pub struct Julia {
    params: JuliaParams,
    plane: Plane,
}

impl Julia {
    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Rejects non-positive dimensions, zoom, bailout extent, or a zero
    /// iteration cap.
    pub fn new(params: JuliaParams) -> NodeResult<Self> {
        check_plane(params.width, params.height, params.zoom, params.max_value_extent)?;
        check_iteration_cap(params.max_iterations)?;
        let plane = Plane::new(
            params.width,
            params.height,
            params.zoom,
            params.max_value_extent,
            params.move_x,
            params.move_y,
        );
        Ok(Self { params, plane })
    }

    /// Current configuration.
    pub fn params(&self) -> &JuliaParams {
        &self.params
    }

    fn value(&self, z0: Complex) -> f64 {
        let max_norm = self.params.max_value_extent * self.params.max_value_extent;
        let c = Complex::new(self.params.c_real, self.params.c_imag);
        let iteration = escape_time(z0, c, max_norm, self.params.max_iterations);
        self.params
            .shading
            .shade(iteration, self.params.max_iterations, self.params.range_limit)
    }
}

impl DrawEngine for Julia {
    fn fill_row(&self, y: i32, x: i32, r: i32, buffer: &mut [f32]) -> iop_core::Result<()> {
        check_row_buffer(x, r, buffer.len())?;
        let im = self.plane.im(y);
        for (i, px) in (x..r).enumerate() {
            let z0 = Complex::new(self.plane.re(px), im);
            buffer[i] = self.value(z0) as f32;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(shading: Shading) -> Julia {
        Julia::new(JuliaParams {
            width: 64.0,
            height: 64.0,
            max_iterations: 60,
            shading,
            ..JuliaParams::default()
        })
        .unwrap()
    }

    #[test]
    fn test_ranged_bimodal() {
        let j = square(Shading::Ranged);
        let mut row = vec![0.0f32; 64];
        for y in 0..64 {
            j.fill_row(y, 0, 64, &mut row).unwrap();
            for &v in &row {
                assert!(v == 0.0 || v == 1.0);
            }
        }
    }

    #[test]
    fn test_smooth_values_in_unit_range() {
        let j = square(Shading::Smooth);
        let mut row = vec![0.0f32; 64];
        for y in 0..64 {
            j.fill_row(y, 0, 64, &mut row).unwrap();
            for &v in &row {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_far_seed_escapes_immediately() {
        // Zoomed way out, corner pixels start far outside the bailout circle
        let j = Julia::new(JuliaParams {
            width: 10.0,
            height: 10.0,
            zoom: 100.0,
            max_iterations: 10,
            shading: Shading::Sharp,
            ..JuliaParams::default()
        })
        .unwrap();
        let mut row = vec![0.0f32; 10];
        j.fill_row(0, 0, 10, &mut row).unwrap();
        assert_eq!(row[0], 1.0);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(Julia::new(JuliaParams {
            max_iterations: 0,
            ..JuliaParams::default()
        })
        .is_err());
    }
}
