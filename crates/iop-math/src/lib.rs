//! # iop-math
//!
//! Math utilities for pixel nodes: small value types and interpolation.
//!
//! - [`Vec3`] - 3-component `f32` vector (normal directions)
//! - [`Complex`] - double-precision complex number (escape-time iteration)
//! - [`lerp`], [`smoothstep`], [`smooth_pulse`], [`percent`], [`saturate`] -
//!   interpolation helpers
//! - [`LookupCurve`] - piecewise Hermite remap curve with per-point tangents
//!
//! # Example
//!
//! ```rust
//! use iop_math::{Complex, Vec3, smoothstep};
//!
//! let normal = Vec3::new(0.1, -0.2, 1.0).normalized();
//! let z = Complex::new(0.3, 0.4);
//! let falloff = smoothstep(0.75, 0.3, z.norm_sqr() as f32);
//! assert!(normal.length() > 0.99 && falloff >= 0.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod complex;
pub mod curve;
pub mod interp;
pub mod vec3;

pub use complex::Complex;
pub use curve::{CurvePoint, LookupCurve};
pub use interp::{lerp, percent, saturate, smooth_pulse, smoothstep};
pub use vec3::Vec3;
