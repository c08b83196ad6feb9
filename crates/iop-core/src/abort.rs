//! Cooperative cancellation.
//!
//! The host may abandon an evaluation mid-flight (a knob changed, the
//! viewer moved on). Components holding a tile open check the token once
//! before starting neighborhood reads and return early; pixels already
//! written stay as they are and the host discards the partial result.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A shared abort flag for one evaluation pass.
///
/// Cloning is cheap; all clones observe the same flag.
///
/// # Example
///
/// ```rust
/// use iop_core::AbortToken;
///
/// let token = AbortToken::new();
/// assert!(!token.is_aborted());
/// token.abort();
/// assert!(token.is_aborted());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AbortToken {
    flag: Arc<AtomicBool>,
}

impl AbortToken {
    /// Creates a token in the not-aborted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals every holder of this token to stop.
    pub fn abort(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// True once [`abort`](AbortToken::abort) has been called.
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = AbortToken::new();
        let seen_by_worker = token.clone();
        token.abort();
        assert!(seen_by_worker.is_aborted());
    }
}
