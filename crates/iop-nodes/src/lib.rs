//! # iop-nodes
//!
//! Image-processing components for a row-based compositing host.
//!
//! Every node is a plain parameter struct behind one of the two
//! [`iop_core`] capability traits: transforms implement
//! [`RowEngine`](iop_core::RowEngine), generators implement
//! [`DrawEngine`](iop_core::DrawEngine). The [`render`] module drives
//! either kind over an [`iop_core::Frame`].
//!
//! # Modules
//!
//! - [`bumpy`] - height-to-normal-map conversion with selectable edge kernels
//! - [`fractal`] - Mandelbrot and Julia escape-time generators
//! - [`pattern`] - checkerboard and radial gradient mask generators
//! - [`kirei`] - the eleven-mode colour filter pipeline
//! - [`render`] - full-frame drivers, parallel by default
//!
//! # Example
//!
//! ```rust
//! use iop_core::{AbortToken, Channel, ChannelSet, Frame};
//! use iop_nodes::kirei::{FilterMode, Kirei, KireiParams};
//! use iop_nodes::render::render_rows;
//!
//! let mut src = Frame::new(64, 64, ChannelSet::RGB).unwrap();
//! src.fill(Channel::RED, 1.0);
//!
//! let sepia = Kirei::new(KireiParams {
//!     mode: FilterMode::Sepia,
//!     ..KireiParams::default()
//! })
//! .unwrap();
//! let out = render_rows(&sepia, &src, &AbortToken::new()).unwrap();
//! assert!(out.get(Channel::GREEN, 0, 0) > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod bumpy;
pub mod fractal;
pub mod kirei;
pub mod pattern;
pub mod render;

pub use error::{NodeError, NodeResult};
