//! Procedural mask generators.
//!
//! Both generators implement [`iop_core::DrawEngine`]: no input image, one
//! scalar value per pixel.
//!
//! - [`Check`] - rotated, scaled, optionally fuzzy checkerboard
//! - [`Gradient`] - radial falloff remapped through a lookup curve

mod check;
mod gradient;

pub use check::{Check, CheckParams};
pub use gradient::{Gradient, GradientParams};
