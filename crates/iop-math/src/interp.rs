//! Interpolation and remapping helpers.
//!
//! The small pieces every pixel filter leans on:
//!
//! - [`lerp`] - linear interpolation
//! - [`saturate`] - clamp to [0, 1]
//! - [`smoothstep`] - cubic Hermite ramp
//! - [`smooth_pulse`] - ramp up, plateau, ramp down
//! - [`percent`] - inverse linear interpolation
//!
//! # Usage
//!
//! ```rust
//! use iop_math::{lerp, smoothstep};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
//! ```

/// Linear interpolation between `a` and `b`.
///
/// # Formula
///
/// `a + (b - a) * t`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Cubic Hermite ramp between two edges.
///
/// Maps `x <= edge0` to 0 and `x >= edge1` to 1 with the smoothstep
/// polynomial `t²(3 - 2t)` in between. The edges may be given in reverse
/// order (`edge0 > edge1`) to produce a descending ramp; vignette falloff
/// relies on this.
///
/// # Example
///
/// ```rust
/// use iop_math::smoothstep;
///
/// assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
/// assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
/// // Reversed edges descend
/// assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
/// ```
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Fraction of the way `v` lies between `min` and `max`.
///
/// # Formula
///
/// `(v - min) / (max - min)`, unclamped.
#[inline]
pub fn percent(min: f32, max: f32, v: f32) -> f32 {
    (v - min) / (max - min)
}

/// Smooth pulse: 0 outside `[a1, b2)`, a smoothstep ramp up over `[a1, a2)`,
/// 1 over `[a2, b1)`, and a smoothstep ramp down over `[b1, b2)`.
///
/// Used to fuzz checkerboard edges: applied to the fractional part of each
/// rotated axis it fades squares in and out near their borders.
///
/// # Example
///
/// ```rust
/// use iop_math::smooth_pulse;
///
/// assert_eq!(smooth_pulse(0.0, 0.25, 0.75, 1.0, 0.5), 1.0);
/// assert_eq!(smooth_pulse(0.0, 0.25, 0.75, 1.0, -0.1), 0.0);
/// assert_eq!(
///     smooth_pulse(0.0, 0.25, 0.75, 1.0, 0.125),
///     smooth_pulse(0.0, 0.25, 0.75, 1.0, 0.875),
/// );
/// ```
pub fn smooth_pulse(a1: f32, a2: f32, b1: f32, b2: f32, x: f32) -> f32 {
    if x < a1 || x >= b2 {
        return 0.0;
    }
    if x >= a2 {
        if x < b1 {
            return 1.0;
        }
        let t = (x - b1) / (b2 - b1);
        return 1.0 - t * t * (3.0 - 2.0 * t);
    }
    let t = (x - a1) / (a2 - a1);
    t * t * (3.0 - 2.0 * t)
}
