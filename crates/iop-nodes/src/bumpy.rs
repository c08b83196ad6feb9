//! Normal-map generation from a scalar height channel.
//!
//! [`Bumpy`] reads one height plane and derives a per-pixel surface normal
//! with a 3x3 edge-detection kernel ([`EdgeKernel`]): the kernel's horizontal
//! and vertical responses become the normal's x and y, and `1/strength`
//! becomes z. The normal is unit-normalized, optionally axis-inverted, and
//! either written raw (signed) or remapped from [-1, 1] into [0, 1] for
//! display.
//!
//! Requires a one-pixel neighborhood: validation declares `pad = 1` and
//! requests expand accordingly.
//!
//! # Example
//!
//! ```rust
//! use iop_core::{ChannelSet, RowEngine};
//! use iop_nodes::bumpy::{Bumpy, BumpyParams};
//!
//! let bumpy = Bumpy::new(BumpyParams::default());
//! let negotiation = bumpy.validate(ChannelSet::RGBA).unwrap();
//! assert_eq!(negotiation.pad, 1);
//! assert_eq!(negotiation.out_channels, ChannelSet::RGB);
//! ```

use iop_core::{
    Channel, ChannelSet, EvalContext, Negotiation, PixelSource, Region, Result, Row, RowEngine,
    RowSpan,
};
use iop_math::Vec3;
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The 3x3 edge-detection kernels a normal can be derived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeKernel {
    /// Sobel operator (weights 1/2/1).
    Sobel,
    /// Scharr operator (weights 3/10/3).
    Scharr,
    /// Prewitt operator (uniform weights).
    Prewitt,
}

impl EdgeKernel {
    /// Maps a host enumeration index to a kernel.
    ///
    /// Returns `None` for indices outside the known set; the render path
    /// then paints the sentinel colour instead of failing.
    pub const fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Sobel),
            1 => Some(Self::Scharr),
            2 => Some(Self::Prewitt),
            _ => None,
        }
    }
}

/// Sentinel written for an unrecognized kernel index: loud magenta.
pub const SENTINEL: Vec3 = Vec3::new(1.0, 0.0, 1.0);

/// Configuration for [`Bumpy`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BumpyParams {
    /// The height plane to differentiate.
    pub source_channel: Channel,
    /// Where the normal's x, y, z go.
    pub output_channels: [Channel; 3],
    /// Filter intensity; `z = 1/strength`. Clamped to [0.1, 100.0].
    pub strength: f32,
    /// Negate the normal's x component.
    pub invert_x: bool,
    /// Negate the normal's y component.
    pub invert_y: bool,
    /// Negate the normal's z component.
    pub invert_z: bool,
    /// Remap components from [-1, 1] into [0, 1].
    pub normalize: bool,
    /// Host enumeration index selecting the [`EdgeKernel`].
    pub filter_index: i32,
}

impl Default for BumpyParams {
    fn default() -> Self {
        Self {
            source_channel: Channel::RED,
            output_channels: [Channel::RED, Channel::GREEN, Channel::BLUE],
            strength: 1.0,
            invert_x: false,
            invert_y: false,
            invert_z: false,
            normalize: false,
            filter_index: 0,
        }
    }
}

/// The normal-map row engine.
#[derive(Debug)]
pub struct Bumpy {
    params: BumpyParams,
}

/// 3x3 height samples around a pixel, named by compass position.
/// Top is `y + 1`; the center sample is not needed by any kernel.
struct Taps {
    tl: f32,
    tc: f32,
    tr: f32,
    cl: f32,
    cr: f32,
    bl: f32,
    bc: f32,
    br: f32,
}

impl Bumpy {
    /// Creates the engine, clamping `strength` into its legal range.
    pub fn new(mut params: BumpyParams) -> Self {
        params.strength = params.strength.clamp(0.1, 100.0);
        Self { params }
    }

    /// Current configuration.
    pub fn params(&self) -> &BumpyParams {
        &self.params
    }

    fn taps(&self, source: &dyn PixelSource, x: i32, y: i32) -> Taps {
        let ch = self.params.source_channel;
        Taps {
            tl: source.sample(ch, x - 1, y + 1),
            tc: source.sample(ch, x, y + 1),
            tr: source.sample(ch, x + 1, y + 1),
            cl: source.sample(ch, x - 1, y),
            cr: source.sample(ch, x + 1, y),
            bl: source.sample(ch, x - 1, y - 1),
            bc: source.sample(ch, x, y - 1),
            br: source.sample(ch, x + 1, y - 1),
        }
    }

    fn kernel_vector(&self, kernel: EdgeKernel, t: &Taps) -> Vec3 {
        let dz = 1.0 / self.params.strength;
        let (dx, dy) = match kernel {
            EdgeKernel::Sobel => (
                (t.tr + 2.0 * t.cr + t.br) - (t.tl + 2.0 * t.cl + t.bl),
                (t.bl + 2.0 * t.bc + t.br) - (t.tl + 2.0 * t.tc + t.tr),
            ),
            EdgeKernel::Scharr => (
                (3.0 * t.tl + 10.0 * t.cl + 3.0 * t.bl) - (3.0 * t.tr + 10.0 * t.cr + 3.0 * t.br),
                (3.0 * t.tl + 10.0 * t.tc + 3.0 * t.tr) - (3.0 * t.bl + 10.0 * t.bc + 3.0 * t.br),
            ),
            EdgeKernel::Prewitt => (
                (t.tr + t.cr + t.br) - (t.tl + t.cl + t.bl),
                (t.bl + t.bc + t.br) - (t.tl + t.tc + t.tr),
            ),
        };
        Vec3::new(dx, dy, dz)
    }

    fn shade(&self, source: &dyn PixelSource, x: i32, y: i32) -> Vec3 {
        let Some(kernel) = EdgeKernel::from_index(self.params.filter_index) else {
            return SENTINEL;
        };

        let taps = self.taps(source, x, y);
        let mut normal = self.kernel_vector(kernel, &taps).normalized();

        if self.params.invert_x {
            normal.x = -normal.x;
        }
        if self.params.invert_y {
            normal.y = -normal.y;
        }
        if self.params.invert_z {
            normal.z = -normal.z;
        }

        if self.params.normalize {
            normal * 0.5 + Vec3::splat(0.5)
        } else {
            normal
        }
    }
}

impl RowEngine for Bumpy {
    fn validate(&self, src_channels: ChannelSet) -> Result<Negotiation> {
        let source = self.params.source_channel;
        if !src_channels.contains(source) {
            // Not a hard failure: skip this cycle and tell someone.
            warn!(channel = %source, "input image does not carry the requested source channel; skipping");
            return Ok(Negotiation::disabled());
        }

        let out_channels: ChannelSet = self.params.output_channels.iter().copied().collect();
        Ok(Negotiation {
            in_channels: source.into(),
            out_channels,
            pad: 1,
        })
    }

    fn request(&self, output: Region) -> Region {
        output.pad(1)
    }

    fn pixel_engine(
        &self,
        ctx: &EvalContext<'_>,
        in_row: &Row,
        span: RowSpan,
        channels: ChannelSet,
        out: &mut Row,
    ) -> Result<()> {
        let [out_x, out_y, out_z] = self.params.output_channels;
        let normal_set: ChannelSet = self.params.output_channels.iter().copied().collect();

        // Requested channels we do not produce pass through unchanged.
        for ch in channels.iter() {
            if !normal_set.contains(ch) {
                out.copy_channel(in_row, ch);
            }
        }

        for x in span.x..span.r {
            let normal = self.shade(ctx.source, x, span.y);
            let i = out.offset(x);
            out.writable(out_x)[i] = normal.x;
            out.writable(out_y)[i] = normal.y;
            out.writable(out_z)[i] = normal.z;
        }
        Ok(())
    }
}
