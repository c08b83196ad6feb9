//! The evaluation contract between host and components.
//!
//! The host drives three phases per component:
//!
//! 1. **validate**: the component declares the channels it needs, the
//!    channels it can produce, and its neighborhood padding, given the
//!    upstream channel set ([`Negotiation`]).
//! 2. **request**: given an output region the host wants filled, the
//!    component forwards the (possibly padded) input region to fetch
//!    upstream.
//! 3. **produce**: per-row evaluation. Row/tile transforms implement
//!    [`RowEngine`]; pure generators implement [`DrawEngine`].
//!
//! There is no shared base state: components are plain parameter structs
//! behind capability traits, chosen at configuration time. Engines must be
//! re-entrant: the host may evaluate disjoint rows concurrently, so
//! `pixel_engine`/`fill_row` take `&self` and read nothing but parameters
//! and the per-call inputs.

use crate::abort::AbortToken;
use crate::channel::ChannelSet;
use crate::error::Result;
use crate::frame::PixelSource;
use crate::region::{Region, RowSpan};
use crate::row::Row;

/// Outcome of the validation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiation {
    /// Channels the component reads from its input.
    pub in_channels: ChannelSet,
    /// Channels the component can produce this cycle.
    ///
    /// Empty means the component is disabled for the cycle (for example a
    /// missing source channel); the host skips evaluation instead of
    /// failing.
    pub out_channels: ChannelSet,
    /// Neighborhood padding in pixels.
    ///
    /// The host must supply input covering the output region grown by this
    /// amount on every side, and [`RowEngine::request`] expands upstream
    /// requests by the same amount.
    pub pad: i32,
}

impl Negotiation {
    /// A negotiation with no input needs, no outputs, no padding.
    pub const fn disabled() -> Self {
        Self {
            in_channels: ChannelSet::new(),
            out_channels: ChannelSet::new(),
            pad: 0,
        }
    }

    /// True if the component produces nothing this cycle.
    pub const fn is_disabled(&self) -> bool {
        self.out_channels.is_empty()
    }
}

/// Everything a row transform may consult during one call besides the row
/// itself.
pub struct EvalContext<'a> {
    /// Full output frame window (pattern normalization, vignette centers).
    pub frame: Region,
    /// Upstream pixels for neighborhood access.
    pub source: &'a dyn PixelSource,
    /// Cancellation flag for this pass.
    pub abort: &'a AbortToken,
}

/// A component that transforms input rows into output rows.
///
/// Implementations must be `Sync`: the host calls
/// [`pixel_engine`](RowEngine::pixel_engine) from worker threads for
/// disjoint rows concurrently.
pub trait RowEngine: Sync {
    /// Declares inputs, outputs and padding for the current configuration.
    fn validate(&self, src_channels: ChannelSet) -> Result<Negotiation>;

    /// Maps an output region to the input region to request upstream.
    ///
    /// The default is the identity; neighborhood filters pad.
    fn request(&self, output: Region) -> Region {
        output
    }

    /// Produces one output row.
    ///
    /// Must write every pixel of `span` for every requested channel exactly
    /// once, except when the abort token fires first. `in_row` covers at
    /// least `span`; neighborhood reads go through `ctx.source`.
    fn pixel_engine(
        &self,
        ctx: &EvalContext<'_>,
        in_row: &Row,
        span: RowSpan,
        channels: ChannelSet,
        out: &mut Row,
    ) -> Result<()>;
}

/// A generator that fills scalar rows from nothing but its parameters.
///
/// Pattern and fractal sources implement this: no input image, one output
/// value per pixel.
pub trait DrawEngine: Sync {
    /// Fills `buffer[i]` with the value for pixel `(x + i, y)`, for
    /// `x + i` in `[x, r)`.
    ///
    /// `buffer` must hold exactly `r - x` elements; implementations reject
    /// anything else with [`Error::BufferSize`](crate::error::Error).
    fn fill_row(&self, y: i32, x: i32, r: i32, buffer: &mut [f32]) -> Result<()>;
}

/// Checks that a row buffer covers the columns `[x, r)` exactly.
///
/// # Errors
///
/// Returns [`Error::BufferSize`](crate::error::Error) on any mismatch,
/// including an inverted range.
pub fn check_row_buffer(x: i32, r: i32, len: usize) -> Result<()> {
    if r < x || len != (r - x) as usize {
        return Err(crate::error::Error::BufferSize(format!(
            "buffer of {len} values cannot cover columns [{x}, {r})"
        )));
    }
    Ok(())
}
