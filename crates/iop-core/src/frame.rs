//! Owned frame buffers and the upstream read contract.
//!
//! [`Frame`] is the host-side image store used by the render driver and by
//! tests: a plane stack over a `width x height` window rooted at the origin.
//! [`PixelSource`] is what a component sees of its upstream input during one
//! evaluation call: scanline access plus clamp-to-edge sampling for
//! neighborhood reads.
//!
//! # Usage
//!
//! ```rust
//! use iop_core::{Channel, ChannelSet, Frame, PixelSource};
//!
//! let mut frame = Frame::new(4, 2, ChannelSet::RGB).unwrap();
//! frame.fill(Channel::RED, 0.25);
//! assert_eq!(frame.get(Channel::RED, 3, 1), 0.25);
//!
//! // Sampling clamps to the frame edge, it never wraps
//! assert_eq!(frame.sample(Channel::RED, -10, 99), 0.25);
//! ```

use crate::channel::{Channel, ChannelSet};
use crate::error::{Error, Result};
use crate::region::Region;
use crate::row::Row;

/// Read access to an upstream image for the duration of one evaluation call.
///
/// Implementations must be cheap to sample; the host may call
/// [`sample`](PixelSource::sample) once per kernel tap per pixel.
pub trait PixelSource: Sync {
    /// The pixel window this source covers.
    fn bounds(&self) -> Region;

    /// Channels this source carries.
    fn channels(&self) -> ChannelSet;

    /// One full scanline of a plane.
    ///
    /// `y` must lie inside [`bounds`](PixelSource::bounds); the slice covers
    /// columns `[bounds.x, bounds.r)`.
    fn scanline(&self, channel: Channel, y: i32) -> &[f32];

    /// Samples a pixel with clamp-to-edge semantics.
    ///
    /// Out-of-window coordinates are clamped to the nearest edge pixel,
    /// never wrapped. This is the neighborhood access used by tile filters.
    fn sample(&self, channel: Channel, x: i32, y: i32) -> f32 {
        let bounds = self.bounds();
        let row = self.scanline(channel, bounds.clamp_y(y));
        row[(bounds.clamp_x(x) - bounds.x) as usize]
    }
}

/// An owned plane stack over a `width x height` window at the origin.
#[derive(Debug, Clone)]
pub struct Frame {
    width: i32,
    height: i32,
    channels: ChannelSet,
    planes: Vec<Vec<f32>>,
}

impl Frame {
    /// Creates a zeroed frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRegion`] if either dimension is not positive.
    pub fn new(width: i32, height: i32, channels: ChannelSet) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidRegion(format!(
                "frame dimensions {width}x{height} must be positive"
            )));
        }
        let len = width as usize * height as usize;
        let mut planes = vec![Vec::new(); Channel::MAX];
        for ch in channels.iter() {
            planes[ch.index()] = vec![0.0; len];
        }
        Ok(Self { width, height, channels, planes })
    }

    /// Frame width in pixels.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Frame height in pixels.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// One scanline of a plane.
    ///
    /// # Panics
    ///
    /// Panics if the plane is missing or `y` is outside the frame.
    pub fn row(&self, channel: Channel, y: i32) -> &[f32] {
        if !self.channels.contains(channel) {
            panic!("frame has no {channel} plane");
        }
        assert!(y >= 0 && y < self.height, "row {y} outside frame");
        let width = self.width as usize;
        let start = y as usize * width;
        &self.planes[channel.index()][start..start + width]
    }

    /// Mutable access to one scanline, allocating the plane on first use.
    pub fn row_mut(&mut self, channel: Channel, y: i32) -> &mut [f32] {
        assert!(y >= 0 && y < self.height, "row {y} outside frame");
        self.ensure(channel);
        let width = self.width as usize;
        let start = y as usize * width;
        &mut self.planes[channel.index()][start..start + width]
    }

    /// Reads one pixel.
    #[inline]
    pub fn get(&self, channel: Channel, x: i32, y: i32) -> f32 {
        self.row(channel, y)[x as usize]
    }

    /// Writes one pixel.
    #[inline]
    pub fn set(&mut self, channel: Channel, x: i32, y: i32, value: f32) {
        self.row_mut(channel, y)[x as usize] = value;
    }

    /// Fills a whole plane with one value.
    pub fn fill(&mut self, channel: Channel, value: f32) {
        self.ensure(channel);
        self.planes[channel.index()].fill(value);
    }

    /// Fills a plane from a function of pixel coordinates.
    pub fn fill_with(&mut self, channel: Channel, f: impl Fn(i32, i32) -> f32) {
        self.ensure(channel);
        let width = self.width;
        let plane = &mut self.planes[channel.index()];
        for y in 0..self.height {
            for x in 0..width {
                plane[(y * width + x) as usize] = f(x, y);
            }
        }
    }

    /// Copies the given channels of a produced row into the frame.
    ///
    /// Columns outside the frame are ignored.
    pub fn store_row(&mut self, y: i32, row: &Row, channels: ChannelSet) {
        if y < 0 || y >= self.height {
            return;
        }
        let lo = row.x().max(0);
        let hi = row.r().min(self.width);
        if hi <= lo {
            return;
        }
        for ch in channels.iter() {
            let Some(src) = row.try_channel(ch) else {
                continue;
            };
            let src = &src[row.offset(lo)..row.offset(hi)];
            let dst = &mut self.row_mut(ch, y)[lo as usize..hi as usize];
            dst.copy_from_slice(src);
        }
    }

    /// Fills a row buffer from the frame, clamping the span to the frame edge.
    pub fn load_row(&self, y: i32, channels: ChannelSet, row: &mut Row) {
        let bounds = self.bounds();
        let cy = bounds.clamp_y(y);
        let row_x = row.x();
        for ch in channels.intersect(self.channels).iter() {
            let src = self.row(ch, cy);
            let dst = row.writable(ch);
            for (i, value) in dst.iter_mut().enumerate() {
                let x = bounds.clamp_x(row_x + i as i32);
                *value = src[x as usize];
            }
        }
    }

    fn ensure(&mut self, channel: Channel) {
        if !self.channels.contains(channel) {
            let len = self.width as usize * self.height as usize;
            self.planes[channel.index()] = vec![0.0; len];
            self.channels.insert(channel);
        }
    }
}

impl PixelSource for Frame {
    fn bounds(&self) -> Region {
        Region::with_size(self.width, self.height)
    }

    fn channels(&self) -> ChannelSet {
        self.channels
    }

    fn scanline(&self, channel: Channel, y: i32) -> &[f32] {
        self.row(channel, y)
    }
}
