//! Double-precision complex numbers for escape-time iteration.
//!
//! Fractal iteration is numerically sensitive; the iteration state stays in
//! `f64` and only the shaded result is narrowed to `f32`.
//!
//! # Usage
//!
//! ```rust
//! use iop_math::Complex;
//!
//! let c = Complex::new(-0.5, 0.0);
//! let z = Complex::ZERO;
//! let next = z * z + c;
//! assert_eq!(next, c);
//! ```

use std::ops::{Add, Mul};

/// A complex number with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// Zero (0 + 0i).
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a complex number.
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Squared magnitude `re² + im²` (no square root).
    ///
    /// Escape tests compare this against the squared bailout radius.
    #[inline]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}

impl Add for Complex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_add() {
        // (1 + 2i)² = -3 + 4i
        let z = Complex::new(1.0, 2.0);
        let sq = z * z;
        assert_relative_eq!(sq.re, -3.0);
        assert_relative_eq!(sq.im, 4.0);

        let shifted = sq + Complex::new(0.5, -0.5);
        assert_relative_eq!(shifted.re, -2.5);
        assert_relative_eq!(shifted.im, 3.5);
    }

    #[test]
    fn test_norm_sqr() {
        assert_relative_eq!(Complex::new(3.0, 4.0).norm_sqr(), 25.0);
        assert_eq!(Complex::ZERO.norm_sqr(), 0.0);
    }

    #[test]
    fn test_origin_is_fixed_point() {
        // z = z² + 0 stays at the origin forever
        let mut z = Complex::ZERO;
        for _ in 0..100 {
            z = z * z + Complex::ZERO;
        }
        assert_eq!(z, Complex::ZERO);
    }
}
