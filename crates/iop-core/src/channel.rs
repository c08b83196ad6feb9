//! Channel identifiers, channel sets, and the colour-triple grouping.
//!
//! A compositor image is a stack of named scalar planes. Components negotiate
//! which planes they read and write through [`ChannelSet`] masks. The first
//! three slots (R, G, B) form one coupled [`ColorTriple`]: a request for any
//! member implies producing all three, so colour math always sees a complete
//! pixel.
//!
//! # Usage
//!
//! ```rust
//! use iop_core::{Channel, ChannelSet};
//!
//! let mut set = ChannelSet::new();
//! set.insert(Channel::GREEN);
//! assert!(set.contains(Channel::GREEN));
//!
//! // Green is part of the RGB triple
//! let triple = Channel::GREEN.triple().unwrap();
//! assert_eq!(triple.channels(), [Channel::RED, Channel::GREEN, Channel::BLUE]);
//! ```
//!
//! # Used By
//!
//! - [`crate::row::Row`] - plane allocation
//! - [`crate::engine::Negotiation`] - input/output declaration

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a single scalar plane.
///
/// Slots 0..4 follow the RGBA convention; higher slots are free for custom
/// scalar data (height fields, masks, IDs). At most [`Channel::MAX`] planes
/// exist per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Channel(u8);

impl Channel {
    /// Red plane (slot 0).
    pub const RED: Channel = Channel(0);
    /// Green plane (slot 1).
    pub const GREEN: Channel = Channel(1);
    /// Blue plane (slot 2).
    pub const BLUE: Channel = Channel(2);
    /// Alpha plane (slot 3).
    pub const ALPHA: Channel = Channel(3);

    /// Maximum number of channel slots per image.
    pub const MAX: usize = 32;

    /// Creates a channel from a slot index.
    ///
    /// Returns `None` for indices at or beyond [`Channel::MAX`].
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::MAX {
            Some(Self(index))
        } else {
            None
        }
    }

    /// The slot index of this channel.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for the R, G and B slots.
    ///
    /// Alpha and custom planes are non-colour data and pass through colour
    /// filters untouched.
    #[inline]
    pub const fn is_rgb(self) -> bool {
        self.0 < 3
    }

    /// The colour triple this channel belongs to, if any.
    #[inline]
    pub const fn triple(self) -> Option<ColorTriple> {
        if self.is_rgb() {
            Some(ColorTriple)
        } else {
            None
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Channel::RED => write!(f, "red"),
            Channel::GREEN => write!(f, "green"),
            Channel::BLUE => write!(f, "blue"),
            Channel::ALPHA => write!(f, "alpha"),
            Channel(n) => write!(f, "chan{n}"),
        }
    }
}

/// The coupled (R, G, B) plane group.
///
/// Whenever any member is requested, all three are produced together.
/// Modeling the triple explicitly keeps that rule out of bit-set arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorTriple;

impl ColorTriple {
    /// The three member channels in (R, G, B) order.
    #[inline]
    pub const fn channels(self) -> [Channel; 3] {
        [Channel::RED, Channel::GREEN, Channel::BLUE]
    }

    /// The member channels as a [`ChannelSet`].
    #[inline]
    pub const fn set(self) -> ChannelSet {
        ChannelSet(0b111)
    }
}

/// A set of channels, stored as a bit mask over slot indices.
///
/// # Example
///
/// ```rust
/// use iop_core::{Channel, ChannelSet};
///
/// let set: ChannelSet = [Channel::RED, Channel::ALPHA].into_iter().collect();
/// assert_eq!(set.len(), 2);
///
/// let names: Vec<String> = set.iter().map(|c| c.to_string()).collect();
/// assert_eq!(names, ["red", "alpha"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelSet(u32);

impl ChannelSet {
    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// The full RGB triple.
    pub const RGB: ChannelSet = ChannelSet(0b111);

    /// RGB plus alpha.
    pub const RGBA: ChannelSet = ChannelSet(0b1111);

    /// True if no channel is present.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of channels in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if `channel` is a member.
    #[inline]
    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & (1 << channel.index()) != 0
    }

    /// Adds a channel.
    #[inline]
    pub fn insert(&mut self, channel: Channel) {
        self.0 |= 1 << channel.index();
    }

    /// Removes a channel.
    #[inline]
    pub fn remove(&mut self, channel: Channel) {
        self.0 &= !(1 << channel.index());
    }

    /// Set union.
    #[inline]
    pub const fn union(self, other: ChannelSet) -> ChannelSet {
        ChannelSet(self.0 | other.0)
    }

    /// Set intersection.
    #[inline]
    pub const fn intersect(self, other: ChannelSet) -> ChannelSet {
        ChannelSet(self.0 & other.0)
    }

    /// True if every channel of `other` is also in `self`.
    #[inline]
    pub const fn contains_all(self, other: ChannelSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Completes any partial colour triple.
    ///
    /// If the set holds one or two of R, G, B, all three are added. This is
    /// the input-channel expansion colour filters perform: asking for green
    /// means reading the whole pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use iop_core::{Channel, ChannelSet};
    ///
    /// let set: ChannelSet = Channel::GREEN.into();
    /// assert_eq!(set.with_complete_triples(), ChannelSet::RGB);
    /// ```
    #[inline]
    pub const fn with_complete_triples(self) -> ChannelSet {
        if self.0 & 0b111 != 0 {
            ChannelSet(self.0 | 0b111)
        } else {
            self
        }
    }

    /// Iterates members in slot-index order.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        (0..Channel::MAX as u8)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(Channel)
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut set = Self::new();
        for ch in iter {
            set.insert(ch);
        }
        set
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        let mut set = Self::new();
        set.insert(channel);
        set
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write!(f, "{{")?;
        for ch in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{ch}")?;
            first = false;
        }
        write!(f, "}}")
    }
}
