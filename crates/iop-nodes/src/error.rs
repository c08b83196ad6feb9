//! Error types for node configuration and evaluation.

use thiserror::Error;

/// Result type alias using [`NodeError`].
pub type NodeResult<T> = std::result::Result<T, NodeError>;

/// Errors raised by the pixel nodes.
///
/// Almost everything here is a configuration-time rejection: evaluation
/// itself is total once parameters have been validated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    /// A parameter value is degenerate (zero scale, zero iterations, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A host enumeration index has no matching variant.
    #[error("unknown {what} index {index}")]
    UnknownIndex {
        /// Which enumeration was indexed.
        what: &'static str,
        /// The offending index value.
        index: i32,
    },

    /// An error bubbled up from the core buffer machinery.
    #[error(transparent)]
    Core(#[from] iop_core::Error),
}
