//! The Mandelbrot set generator.

use super::{Plane, Shading, check_iteration_cap, check_plane, escape_time};
use crate::error::NodeResult;
use iop_core::{DrawEngine, check_row_buffer};
use iop_math::Complex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Mandelbrot`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MandelbrotParams {
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
    /// Iteration cap; must be positive.
    pub max_iterations: u32,
    /// Output shading mode.
    pub shading: Shading,
    /// Threshold for [`Shading::Ranged`].
    pub range_limit: f64,
}

impl Default for MandelbrotParams {
    fn default() -> Self {
        Self {
            width: 2048.0,
            height: 1556.0,
            zoom: 1.0,
            max_value_extent: 2.0,
            move_x: -0.5,
            move_y: 0.0,
            max_iterations: 300,
            shading: Shading::Smooth,
            range_limit: 0.5,
        }
    }
}

/// Mandelbrot escape-time generator: `c` is the mapped pixel, `z` starts
/// at the origin.
#[derive(Debug)]
pub struct Mandelbrot {
    params: MandelbrotParams,
    plane: Plane,
}

impl Mandelbrot {
    /// Creates the generator.
    ///
    /// # Errors
    ///
    /// Rejects non-positive dimensions, zoom, bailout extent, or a zero
    /// iteration cap.
    pub fn new(params: MandelbrotParams) -> NodeResult<Self> {
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
    pub fn params(&self) -> &MandelbrotParams {
        &self.params
    }

    /// Shaded value at one complex coordinate.
    fn value(&self, c: Complex) -> f64 {
        let max_norm = self.params.max_value_extent * self.params.max_value_extent;
        let iteration = escape_time(Complex::ZERO, c, max_norm, self.params.max_iterations);
        self.params
            .shading
            .shade(iteration, self.params.max_iterations, self.params.range_limit)
    }
}

impl DrawEngine for Mandelbrot {
    fn fill_row(&self, y: i32, x: i32, r: i32, buffer: &mut [f32]) -> iop_core::Result<()> {
        check_row_buffer(x, r, buffer.len())?;
        let im = self.plane.im(y);
        for (i, px) in (x..r).enumerate() {
            let c = Complex::new(self.plane.re(px), im);
            buffer[i] = self.value(c) as f32;
        }
        Ok(())
    }
}
