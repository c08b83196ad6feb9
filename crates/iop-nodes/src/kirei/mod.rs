//! The multi-filter pixel pipeline.
//!
//! One row engine, eleven selectable filters ([`FilterMode`]), operating
//! strictly on the RGB triple: whenever any colour channel is requested all
//! three are produced together, and every non-colour channel passes through
//! byte-identical.
//!
//! Point filters (invert, sepia, temperature, ...) read only the current
//! pixel. Kernel filters (blur, sharpen, edge enhance, playground) read a
//! neighborhood through the upstream [`iop_core::PixelSource`] and therefore
//! declare padding in their negotiation: the host must inflate both the
//! supplied input and its own upstream request by [`Negotiation::pad`].
//!
//! # Example
//!
//! ```rust
//! use iop_core::{ChannelSet, Region, RowEngine};
//! use iop_nodes::kirei::{FilterMode, Kirei, KireiParams};
//!
//! let blur = Kirei::new(KireiParams {
//!     mode: FilterMode::Blur,
//!     blur_size: 4,
//!     ..KireiParams::default()
//! })
//! .unwrap();
//!
//! let negotiation = blur.validate(ChannelSet::RGBA).unwrap();
//! assert_eq!(negotiation.pad, 4);
//! assert_eq!(blur.request(Region::with_size(640, 480)), Region::new(-4, -4, 644, 484));
//! ```

mod blackbody;
mod kernel;
mod point;

use crate::error::{NodeError, NodeResult};
use iop_core::{
    ChannelSet, EvalContext, Negotiation, Region, Result, Row, RowEngine, RowSpan,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which filter the pipeline applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterMode {
    /// Copy input to output unchanged.
    #[default]
    Passthrough,
    /// Darken toward the frame corners.
    Vignette,
    /// `1 - value` per colour channel.
    Invert,
    /// Binary luminance cut.
    Threshold,
    /// Fixed sepia colour matrix.
    Sepia,
    /// Box average over a `(2*size+1)²` window.
    Blur,
    /// Laplacian high-boost sharpening.
    Sharpen,
    /// Directional edge kernel, raw output.
    EdgeEnhance,
    /// Blackbody colour temperature correction.
    Temperature,
    /// Per-channel linear remixing.
    ChannelMixer,
    /// Raw Laplacian convolution (experimental).
    Playground,
}

impl FilterMode {
    /// Maps a host enumeration index to a mode.
    ///
    /// # Errors
    ///
    /// Unknown indices are a configuration error.
    pub fn from_index(index: i32) -> NodeResult<Self> {
        Ok(match index {
            0 => Self::Passthrough,
            1 => Self::Vignette,
            2 => Self::Invert,
            3 => Self::Threshold,
            4 => Self::Sepia,
            5 => Self::Blur,
            6 => Self::Sharpen,
            7 => Self::EdgeEnhance,
            8 => Self::Temperature,
            9 => Self::ChannelMixer,
            10 => Self::Playground,
            _ => return Err(NodeError::UnknownIndex { what: "filter mode", index }),
        })
    }
}

/// Configuration for [`Kirei`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KireiParams {
    /// Selected filter.
    pub mode: FilterMode,
    /// Vignette: normalized distance at which falloff ends.
    pub vignette_radius: f32,
    /// Vignette: width of the falloff band.
    pub vignette_softness: f32,
    /// Threshold: luminance cut point.
    pub threshold_limit: f32,
    /// Blur: window half-size in pixels; must be >= 0.
    pub blur_size: i32,
    /// Sharpen: how much of the Laplacian to subtract.
    pub sharpen_strength: f32,
    /// Edge enhance: directional kernel gain.
    pub edge_enhance_strength: f32,
    /// Temperature in Kelvin; clamped to [1000, 10000] at construction.
    pub temperature: f32,
    /// Mixer: blend ratio between blue and green.
    pub mix_blue_green: f32,
    /// Mixer: how much of the B/G blend replaces red.
    pub mix_bg_into_red: f32,
    /// Mixer: blend ratio between red and blue.
    pub mix_red_blue: f32,
    /// Mixer: how much of the R/B blend replaces green.
    pub mix_rb_into_green: f32,
    /// Mixer: blend ratio between green and red.
    pub mix_green_red: f32,
    /// Mixer: how much of the G/R blend replaces blue.
    pub mix_gr_into_blue: f32,
}

impl Default for KireiParams {
    fn default() -> Self {
        Self {
            mode: FilterMode::Passthrough,
            vignette_radius: 0.75,
            vignette_softness: 0.45,
            threshold_limit: 0.5,
            blur_size: 4,
            sharpen_strength: 1.0,
            edge_enhance_strength: 1.0,
            temperature: 6650.0,
            mix_blue_green: 0.0,
            mix_bg_into_red: 0.0,
            mix_red_blue: 0.0,
            mix_rb_into_green: 0.0,
            mix_green_red: 0.0,
            mix_gr_into_blue: 0.0,
        }
    }
}

/// Luminance weights used by the threshold filter.
pub(crate) fn luminance(r: f32, g: f32, b: f32) -> f32 {
    r * 0.3 + g * 0.59 + b * 0.11
}

/// The multi-filter row engine.
#[derive(Debug)]
pub struct Kirei {
    params: KireiParams,
}

impl Kirei {
    /// Creates the engine.
    ///
    /// The temperature is clamped into its legal range here, once, so
    /// evaluation never mutates configuration.
    ///
    /// # Errors
    ///
    /// Rejects a negative blur window.
    pub fn new(mut params: KireiParams) -> NodeResult<Self> {
        if params.blur_size < 0 {
            return Err(NodeError::InvalidParameter(format!(
                "blur_size {} must be >= 0",
                params.blur_size
            )));
        }
        let (lo, hi) = blackbody::TEMPERATURE_RANGE;
        params.temperature = params.temperature.clamp(lo, hi);
        Ok(Self { params })
    }

    /// Current configuration.
    pub fn params(&self) -> &KireiParams {
        &self.params
    }

    /// Neighborhood padding for the current mode.
    fn pad(&self) -> i32 {
        match self.params.mode {
            FilterMode::Blur => self.params.blur_size,
            FilterMode::Sharpen | FilterMode::EdgeEnhance | FilterMode::Playground => 1,
            _ => 0,
        }
    }

    fn apply_rgb(
        &self,
        ctx: &EvalContext<'_>,
        in_row: &Row,
        span: RowSpan,
        out: &mut Row,
    ) -> Result<()> {
        match self.params.mode {
            FilterMode::Passthrough => point::passthrough(in_row, span, out),
            FilterMode::Vignette => point::vignette(&self.params, ctx.frame, in_row, span, out),
            FilterMode::Invert => point::invert(in_row, span, out),
            FilterMode::Threshold => point::threshold(&self.params, in_row, span, out),
            FilterMode::Sepia => point::sepia(in_row, span, out),
            FilterMode::Temperature => point::temperature(&self.params, in_row, span, out),
            FilterMode::ChannelMixer => point::mix_channels(&self.params, in_row, span, out),
            FilterMode::Blur => kernel::blur(&self.params, ctx, span, out),
            FilterMode::Sharpen => kernel::sharpen(&self.params, ctx, span, out),
            FilterMode::EdgeEnhance => kernel::edge_enhance(&self.params, ctx, span, out),
            FilterMode::Playground => kernel::playground(ctx, span, out),
        }
        Ok(())
    }
}

impl RowEngine for Kirei {
    fn validate(&self, src_channels: ChannelSet) -> Result<Negotiation> {
        // The pipeline always produces a full colour triple and forwards
        // whatever else the source carries.
        let out_channels = src_channels.union(ChannelSet::RGB);
        Ok(Negotiation {
            in_channels: src_channels.with_complete_triples().union(ChannelSet::RGB),
            out_channels,
            pad: self.pad(),
        })
    }

    fn request(&self, output: Region) -> Region {
        output.pad(self.pad())
    }

    fn pixel_engine(
        &self,
        ctx: &EvalContext<'_>,
        in_row: &Row,
        span: RowSpan,
        channels: ChannelSet,
        out: &mut Row,
    ) -> Result<()> {
        let mut done = ChannelSet::new();
        for z in channels.iter() {
            if done.contains(z) {
                continue;
            }
            let Some(triple) = z.triple() else {
                // Non-colour channels are never filtered.
                out.copy_channel(in_row, z);
                continue;
            };
            done = done.union(triple.set());
            self.apply_rgb(ctx, in_row, span, out)?;
        }
        Ok(())
    }
}
