//! Error types for iop-core operations.
//!
//! # Usage
//!
//! ```rust
//! use iop_core::{Error, Result};
//!
//! fn check_width(width: i32) -> Result<()> {
//!     if width <= 0 {
//!         return Err(Error::InvalidRegion(format!("width {width} must be > 0")));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core evaluation machinery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A region is empty, inverted, or otherwise unusable.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// A row buffer does not match the span it is supposed to cover.
    #[error("buffer size mismatch: {0}")]
    BufferSize(String),
}
