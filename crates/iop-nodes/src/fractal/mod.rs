//! Escape-time fractal generators.
//!
//! Two engines share one iteration scheme: [`Mandelbrot`] varies `c` per
//! pixel and starts at `z = 0`; [`Julia`] fixes `c` and starts at the mapped
//! pixel coordinate. Both iterate `z = z² + c` in double precision until the
//! squared magnitude reaches the squared bailout extent or the iteration cap
//! is hit, then shade the exit count through a [`Shading`] mode.
//!
//! # Example
//!
//! ```rust
//! use iop_core::DrawEngine;
//! use iop_nodes::fractal::{Mandelbrot, MandelbrotParams};
//!
//! let params = MandelbrotParams { width: 100.0, height: 100.0, ..MandelbrotParams::default() };
//! let m = Mandelbrot::new(params).unwrap();
//! let mut row = vec![0.0f32; 100];
//! m.fill_row(50, 0, 100, &mut row).unwrap();
//! // The frame center maps near c = -0.5, inside the main cardioid
//! assert_eq!(row[50], 0.0);
//! ```

mod julia;
mod mandelbrot;

pub use julia::{Julia, JuliaParams};
pub use mandelbrot::{Mandelbrot, MandelbrotParams};

use crate::error::{NodeError, NodeResult};
use iop_core::DrawEngine;
use iop_math::Complex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the final iteration count is turned into a pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shading {
    /// 0 inside the set, ramping toward 1 near the boundary.
    #[default]
    Smooth,
    /// 0 inside the set, 1 everywhere else.
    Sharp,
    /// 1 where `iterations / max < range_limit`, else 0. Always bimodal.
    Ranged,
}

impl Shading {
    /// Maps a host enumeration index to a shading mode.
    ///
    /// # Errors
    ///
    /// Unknown indices are a configuration error; there is no render-time
    /// fallback because the enum leaves nothing unrepresented.
    pub fn from_index(index: i32) -> NodeResult<Self> {
        match index {
            0 => Ok(Self::Smooth),
            1 => Ok(Self::Sharp),
            2 => Ok(Self::Ranged),
            _ => Err(NodeError::UnknownIndex { what: "shading", index }),
        }
    }

    /// Shades an escape count against the iteration cap.
    pub(crate) fn shade(self, iteration: u32, max_iterations: u32, range_limit: f64) -> f64 {
        match self {
            Self::Smooth => {
                if iteration < max_iterations {
                    f64::from(iteration) / f64::from(max_iterations)
                } else {
                    0.0
                }
            }
            Self::Sharp => {
                if iteration == max_iterations {
                    0.0
                } else {
                    1.0
                }
            }
            Self::Ranged => {
                if f64::from(iteration) / f64::from(max_iterations) < range_limit {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Shared plane-mapping and iteration settings.
///
/// `scale` converts pixel offsets from the frame center into complex-plane
/// units; `(move_x, move_y)` then pans the view.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Plane {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub move_x: f64,
    pub move_y: f64,
}

impl Plane {
    pub(crate) fn new(
        width: f64,
        height: f64,
        zoom: f64,
        max_value_extent: f64,
        move_x: f64,
        move_y: f64,
    ) -> Self {
        let scale = zoom * max_value_extent / width.min(height);
        Self { width, height, scale, move_x, move_y }
    }

    /// Imaginary coordinate of row `y` (y grows downward in pixel space).
    #[inline]
    pub(crate) fn im(&self, y: i32) -> f64 {
        (self.height / 2.0 - f64::from(y)) * self.scale + self.move_y
    }

    /// Real coordinate of column `x`.
    #[inline]
    pub(crate) fn re(&self, x: i32) -> f64 {
        (f64::from(x) - self.width / 2.0) * self.scale + self.move_x
    }
}

/// Iterates `z = z² + c` until escape or the cap.
///
/// The loop body runs at least once (post-test, as in the reference
/// escape-time formulation); `max_iterations` is validated positive at
/// configuration time.
pub(crate) fn escape_time(
    mut z: Complex,
    c: Complex,
    max_norm: f64,
    max_iterations: u32,
) -> u32 {
    let mut iteration = 0u32;
    loop {
        z = z * z + c;
        iteration += 1;
        if z.norm_sqr() >= max_norm || iteration >= max_iterations {
            return iteration;
        }
    }
}

pub(crate) fn check_iteration_cap(max_iterations: u32) -> NodeResult<()> {
    if max_iterations == 0 {
        return Err(NodeError::InvalidParameter(
            "max_iterations must be > 0".into(),
        ));
    }
    Ok(())
}

pub(crate) fn check_plane(
    width: f64,
    height: f64,
    zoom: f64,
    max_value_extent: f64,
) -> NodeResult<()> {
    if width <= 0.0 || height <= 0.0 {
        return Err(NodeError::InvalidParameter(format!(
            "fractal plane {width}x{height} must be positive"
        )));
    }
    if zoom <= 0.0 {
        return Err(NodeError::InvalidParameter("zoom must be > 0".into()));
    }
    if max_value_extent <= 0.0 {
        return Err(NodeError::InvalidParameter(
            "max_value_extent must be > 0".into(),
        ));
    }
    Ok(())
}

/// A configured fractal generator of either kind.
///
/// The host's fractal node is one enumeration knob away from being a
/// Mandelbrot or a Julia; this tagged dispatcher mirrors that.
#[derive(Debug)]
pub enum Fractal {
    /// Per-pixel `c`, `z` starts at 0.
    Mandelbrot(Mandelbrot),
    /// Fixed `c`, `z` starts at the pixel coordinate.
    Julia(Julia),
}

impl DrawEngine for Fractal {
    fn fill_row(&self, y: i32, x: i32, r: i32, buffer: &mut [f32]) -> iop_core::Result<()> {
        match self {
            Self::Mandelbrot(m) => m.fill_row(y, x, r, buffer),
            Self::Julia(j) => j.fill_row(y, x, r, buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shading_indices() {
        assert_eq!(Shading::from_index(0).unwrap(), Shading::Smooth);
        assert_eq!(Shading::from_index(2).unwrap(), Shading::Ranged);
        assert!(matches!(
            Shading::from_index(3),
            Err(NodeError::UnknownIndex { what: "shading", index: 3 })
        ));
    }

    #[test]
    fn test_shade_smooth_saturates_inside() {
        assert_eq!(Shading::Smooth.shade(300, 300, 0.5), 0.0);
        assert_eq!(Shading::Smooth.shade(150, 300, 0.5), 0.5);
    }

    #[test]
    fn test_shade_sharp_bimodal() {
        assert_eq!(Shading::Sharp.shade(300, 300, 0.5), 0.0);
        assert_eq!(Shading::Sharp.shade(299, 300, 0.5), 1.0);
    }

    #[test]
    fn test_shade_ranged_bimodal() {
        for iteration in [0, 1, 149, 150, 299, 300] {
            let v = Shading::Ranged.shade(iteration, 300, 0.5);
            assert!(v == 0.0 || v == 1.0);
        }
        assert_eq!(Shading::Ranged.shade(100, 300, 0.5), 1.0);
        assert_eq!(Shading::Ranged.shade(200, 300, 0.5), 0.0);
    }

    #[test]
    fn test_dispatch_matches_inner_engine() {
        let params = MandelbrotParams {
            width: 32.0,
            height: 32.0,
            ..MandelbrotParams::default()
        };
        let direct = Mandelbrot::new(params.clone()).unwrap();
        let dispatched = Fractal::Mandelbrot(Mandelbrot::new(params).unwrap());

        let mut a = vec![0.0f32; 32];
        let mut b = vec![0.0f32; 32];
        direct.fill_row(16, 0, 32, &mut a).unwrap();
        dispatched.fill_row(16, 0, 32, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_escape_origin_never_escapes() {
        let n = escape_time(Complex::ZERO, Complex::ZERO, 4.0, 50);
        assert_eq!(n, 50);
    }

    #[test]
    fn test_escape_far_point_is_fast() {
        let n = escape_time(Complex::ZERO, Complex::new(10.0, 10.0), 4.0, 50);
        assert_eq!(n, 1);
    }
}
