//! # iop-core
//!
//! Core types for compositor pixel operations.
//!
//! This crate provides the foundation the node crates build on:
//!
//! - [`Channel`], [`ChannelSet`], [`ColorTriple`] - the plane/channel model
//! - [`Region`], [`RowSpan`] - signed pixel windows and scanline spans
//! - [`Row`], [`Frame`], [`PixelSource`] - per-call and host-side buffers
//! - [`RowEngine`], [`DrawEngine`], [`Negotiation`] - the evaluation contract
//! - [`AbortToken`] - cooperative cancellation
//!
//! ## Design Philosophy
//!
//! The host owns scheduling and buffers; components are plain parameter
//! structs behind capability traits. Everything a component touches during a
//! call is either its own read-only configuration or an argument of that
//! call, which makes every engine trivially re-entrant across disjoint rows.
//!
//! ## Crate Structure
//!
//! ```text
//! iop-core (this crate)
//!    ^
//!    |
//!    +-- iop-math  (vectors, complex, interpolation, curves)
//!    +-- iop-nodes (bumpy, fractal, pattern, kirei, render driver)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for channel and region types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod abort;
pub mod channel;
pub mod engine;
pub mod error;
pub mod frame;
pub mod region;
pub mod row;

pub use abort::AbortToken;
pub use channel::{Channel, ChannelSet, ColorTriple};
pub use engine::{DrawEngine, EvalContext, Negotiation, RowEngine, check_row_buffer};
pub use error::{Error, Result};
pub use frame::{Frame, PixelSource};
pub use region::{Region, RowSpan};
pub use row::Row;
