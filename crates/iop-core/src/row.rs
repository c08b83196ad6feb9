//! Per-call scanline buffers.
//!
//! A [`Row`] is the unit of exchange between the host and a component for one
//! evaluation call: a horizontal pixel range plus one `f32` plane per
//! channel. The host allocates a row, a component fills the requested
//! channels, and the row is discarded (or copied into a frame) afterwards.
//! Components never retain a row beyond the call.
//!
//! Plane slices are indexed relative to the row origin: slice index `i`
//! holds the pixel at absolute column `x + i`.
//!
//! # Usage
//!
//! ```rust
//! use iop_core::{Channel, ChannelSet, Row};
//!
//! let mut row = Row::new(0, 4, ChannelSet::RGB);
//! row.writable(Channel::RED)[2] = 1.0;
//! assert_eq!(row.channel(Channel::RED), &[0.0, 0.0, 1.0, 0.0]);
//! ```

use crate::channel::{Channel, ChannelSet};

/// A host-allocated scanline buffer over columns `[x, r)`.
#[derive(Debug, Clone)]
pub struct Row {
    x: i32,
    r: i32,
    channels: ChannelSet,
    planes: Vec<Vec<f32>>,
}

impl Row {
    /// Creates a row over `[x, r)` with zeroed planes for `channels`.
    ///
    /// An inverted range yields an empty row.
    pub fn new(x: i32, r: i32, channels: ChannelSet) -> Self {
        let width = if r > x { (r - x) as usize } else { 0 };
        let mut planes = vec![Vec::new(); Channel::MAX];
        for ch in channels.iter() {
            planes[ch.index()] = vec![0.0; width];
        }
        Self { x, r, channels, planes }
    }

    /// First column (inclusive).
    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Last column (exclusive).
    #[inline]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Number of pixels per plane.
    #[inline]
    pub const fn width(&self) -> usize {
        if self.r > self.x { (self.r - self.x) as usize } else { 0 }
    }

    /// Channels with an allocated plane.
    #[inline]
    pub const fn channels(&self) -> ChannelSet {
        self.channels
    }

    /// Slice offset of absolute column `x`.
    #[inline]
    pub const fn offset(&self, x: i32) -> usize {
        (x - self.x) as usize
    }

    /// Read access to a plane.
    ///
    /// # Panics
    ///
    /// Panics if the channel was not allocated; callers are expected to stay
    /// within the channel set they negotiated.
    #[inline]
    pub fn channel(&self, channel: Channel) -> &[f32] {
        if !self.channels.contains(channel) {
            panic!("row has no {channel} plane");
        }
        &self.planes[channel.index()]
    }

    /// Read access to a plane, or `None` if it was never allocated.
    #[inline]
    pub fn try_channel(&self, channel: Channel) -> Option<&[f32]> {
        if self.channels.contains(channel) {
            Some(&self.planes[channel.index()])
        } else {
            None
        }
    }

    /// Write access to a plane, allocating it zeroed on first use.
    pub fn writable(&mut self, channel: Channel) -> &mut [f32] {
        self.ensure(channel);
        &mut self.planes[channel.index()]
    }

    /// Simultaneous write access to the R, G and B planes.
    ///
    /// Allocates any missing member first. The planes are disjoint, so the
    /// three borrows can coexist.
    pub fn writable_rgb(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        self.ensure(Channel::RED);
        self.ensure(Channel::GREEN);
        self.ensure(Channel::BLUE);
        let (red, rest) = self.planes.split_at_mut(1);
        let (green, rest) = rest.split_at_mut(1);
        (&mut red[0], &mut green[0], &mut rest[0])
    }

    /// Read access to the R, G and B planes.
    ///
    /// # Panics
    ///
    /// Panics if any member plane is missing.
    pub fn rgb(&self) -> (&[f32], &[f32], &[f32]) {
        (
            self.channel(Channel::RED),
            self.channel(Channel::GREEN),
            self.channel(Channel::BLUE),
        )
    }

    /// The R, G and B planes narrowed to columns `[x, r)`.
    ///
    /// # Panics
    ///
    /// Panics if any member plane is missing or the range leaves the row.
    pub fn rgb_span(&self, x: i32, r: i32) -> (&[f32], &[f32], &[f32]) {
        let lo = self.offset(x);
        let hi = self.offset(r);
        let (red, green, blue) = self.rgb();
        (&red[lo..hi], &green[lo..hi], &blue[lo..hi])
    }

    /// Writable R, G and B planes narrowed to columns `[x, r)`.
    pub fn writable_rgb_span(&mut self, x: i32, r: i32) -> (&mut [f32], &mut [f32], &mut [f32]) {
        let lo = self.offset(x);
        let hi = self.offset(r);
        let (red, green, blue) = self.writable_rgb();
        (&mut red[lo..hi], &mut green[lo..hi], &mut blue[lo..hi])
    }

    /// Copies one plane from `src` over the columns both rows share.
    ///
    /// Pixels outside the overlap keep their current value.
    pub fn copy_channel(&mut self, src: &Row, channel: Channel) {
        let lo = self.x.max(src.x);
        let hi = self.r.min(src.r);
        if hi <= lo {
            return;
        }
        let Some(from) = src.try_channel(channel) else {
            return;
        };
        let src_off = (lo - src.x) as usize;
        let count = (hi - lo) as usize;
        let from = &from[src_off..src_off + count];
        let dst_off = (lo - self.x) as usize;
        self.writable(channel)[dst_off..dst_off + count].copy_from_slice(from);
    }

    fn ensure(&mut self, channel: Channel) {
        if !self.channels.contains(channel) {
            self.planes[channel.index()] = vec![0.0; self.width()];
            self.channels.insert(channel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let row = Row::new(-3, 5, ChannelSet::RGB);
        assert_eq!(row.width(), 8);
        assert_eq!(row.offset(-3), 0);
        assert_eq!(row.offset(4), 7);
    }

    #[test]
    fn test_writable_allocates() {
        let mut row = Row::new(0, 4, ChannelSet::new());
        assert!(row.try_channel(Channel::ALPHA).is_none());
        row.writable(Channel::ALPHA)[0] = 0.5;
        assert_eq!(row.channel(Channel::ALPHA), &[0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_writable_rgb_disjoint() {
        let mut row = Row::new(0, 2, ChannelSet::RGB);
        let (r, g, b) = row.writable_rgb();
        r[0] = 1.0;
        g[1] = 2.0;
        b[0] = 3.0;
        assert_eq!(row.channel(Channel::RED), &[1.0, 0.0]);
        assert_eq!(row.channel(Channel::GREEN), &[0.0, 2.0]);
        assert_eq!(row.channel(Channel::BLUE), &[3.0, 0.0]);
    }

    #[test]
    fn test_copy_channel_overlap() {
        let mut src = Row::new(0, 6, Channel::ALPHA.into());
        src.writable(Channel::ALPHA).copy_from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let mut dst = Row::new(2, 8, Channel::ALPHA.into());
        dst.copy_channel(&src, Channel::ALPHA);
        assert_eq!(dst.channel(Channel::ALPHA), &[2.0, 3.0, 4.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "row has no alpha plane")]
    fn test_missing_plane_panics() {
        let row = Row::new(0, 4, ChannelSet::RGB);
        let _ = row.channel(Channel::ALPHA);
    }
}
