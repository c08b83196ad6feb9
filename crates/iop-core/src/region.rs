//! Signed pixel regions and row spans.
//!
//! Compositor windows are signed rectangles: negative coordinates are normal
//! once upstream nodes pad or reposition their output. A [`Region`] follows
//! the compositor convention of an inclusive left/bottom edge `(x, y)` and an
//! exclusive right/top edge `(r, t)`.
//!
//! The neighborhood contract of tile filters lives here: [`Region::pad`]
//! grows a requested region by the declared filter radius, and
//! [`Region::clamp_x`]/[`Region::clamp_y`] implement clamp-to-edge sampling
//! (no wraparound).
//!
//! # Usage
//!
//! ```rust
//! use iop_core::Region;
//!
//! let out = Region::new(0, 0, 640, 480);
//! let padded = out.pad(4); // what a blur of size 4 requests upstream
//! assert_eq!(padded, Region::new(-4, -4, 644, 484));
//! assert_eq!(padded.clamp_x(-100), -4);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangle `[x, r) x [y, t)` in signed pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Left edge (inclusive).
    pub x: i32,
    /// Bottom edge (inclusive).
    pub y: i32,
    /// Right edge (exclusive).
    pub r: i32,
    /// Top edge (exclusive).
    pub t: i32,
}

impl Region {
    /// Creates a region from its four edges.
    #[inline]
    pub const fn new(x: i32, y: i32, r: i32, t: i32) -> Self {
        Self { x, y, r, t }
    }

    /// A region with origin (0, 0) and the given dimensions.
    #[inline]
    pub const fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels (zero for inverted regions).
    #[inline]
    pub const fn width(&self) -> i32 {
        if self.r > self.x { self.r - self.x } else { 0 }
    }

    /// Height in pixels (zero for inverted regions).
    #[inline]
    pub const fn height(&self) -> i32 {
        if self.t > self.y { self.t - self.y } else { 0 }
    }

    /// True if the region covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Grows the region by `n` pixels on every side.
    ///
    /// This is the request-propagation step for neighborhood filters: a
    /// filter that reads `n` pixels around each output pixel must request
    /// `output.pad(n)` from its upstream source.
    #[inline]
    pub const fn pad(&self, n: i32) -> Self {
        Self::new(self.x - n, self.y - n, self.r + n, self.t + n)
    }

    /// True if the point lies inside the region.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.r && y >= self.y && y < self.t
    }

    /// Intersection with another region, or `None` if disjoint.
    pub fn intersect(&self, other: &Region) -> Option<Region> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = self.r.min(other.r);
        let t = self.t.min(other.t);
        if r > x && t > y {
            Some(Region::new(x, y, r, t))
        } else {
            None
        }
    }

    /// Clamps an x coordinate to the valid column range `[x, r)`.
    #[inline]
    pub const fn clamp_x(&self, x: i32) -> i32 {
        if x < self.x {
            self.x
        } else if x >= self.r {
            self.r - 1
        } else {
            x
        }
    }

    /// Clamps a y coordinate to the valid row range `[y, t)`.
    #[inline]
    pub const fn clamp_y(&self, y: i32) -> i32 {
        if y < self.y {
            self.y
        } else if y >= self.t {
            self.t - 1
        } else {
            y
        }
    }
}

/// One scanline evaluation range: row `y`, columns `[x, r)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    /// Row index.
    pub y: i32,
    /// First column (inclusive).
    pub x: i32,
    /// Last column (exclusive).
    pub r: i32,
}

impl RowSpan {
    /// Creates a span for row `y` over `[x, r)`.
    #[inline]
    pub const fn new(y: i32, x: i32, r: i32) -> Self {
        Self { y, x, r }
    }

    /// Number of pixels in the span.
    #[inline]
    pub const fn len(&self) -> usize {
        if self.r > self.x { (self.r - self.x) as usize } else { 0 }
    }

    /// True if the span covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let region = Region::new(-2, 3, 10, 8);
        assert_eq!(region.width(), 12);
        assert_eq!(region.height(), 5);
        assert!(!region.is_empty());
        assert!(Region::new(0, 0, 0, 10).is_empty());
    }

    #[test]
    fn test_pad_roundtrip() {
        let region = Region::with_size(100, 50);
        assert_eq!(region.pad(3).pad(-3), region);
    }

    #[test]
    fn test_clamp_to_edge() {
        let region = Region::new(0, 0, 10, 10);
        assert_eq!(region.clamp_x(-5), 0);
        assert_eq!(region.clamp_x(10), 9);
        assert_eq!(region.clamp_x(4), 4);
        assert_eq!(region.clamp_y(100), 9);
    }

    #[test]
    fn test_intersect() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, 5, 20, 20);
        assert_eq!(a.intersect(&b), Some(Region::new(5, 5, 10, 10)));
        assert_eq!(a.intersect(&Region::new(10, 0, 20, 10)), None);
    }

    #[test]
    fn test_span() {
        let span = RowSpan::new(7, 2, 9);
        assert_eq!(span.len(), 7);
        assert!(RowSpan::new(0, 5, 5).is_empty());
    }
}
