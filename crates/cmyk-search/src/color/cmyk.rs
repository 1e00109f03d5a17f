//! CMYK process color in percent units.

use std::fmt;

/// Largest valid channel value (percent).
pub const CHANNEL_MAX: f64 = 100.0;

/// Process ink channel names, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 4] = [
        Channel::Cyan,
        Channel::Magenta,
        Channel::Yellow,
        Channel::Black,
    ];

    /// Lowercase channel name, as used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Cyan => "cyan",
            Channel::Magenta => "magenta",
            Channel::Yellow => "yellow",
            Channel::Black => "black",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A CMYK color with each channel in percent (`0.0..=100.0`).
///
/// Channels are stored as `f64` and are not forced to be integral: search
/// candidates may sit on a fractional grid. Use [`Cmyk::rounded`] to get
/// the integer percentages written back to a document.
///
/// # Example
///
/// ```
/// use cmyk_search::Cmyk;
///
/// let color = Cmyk::new(30.0, 60.0, 0.0, 20.0);
/// assert_eq!(color.channels(), [30.0, 60.0, 0.0, 20.0]);
/// assert_eq!(color.zero_chromatic_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cmyk {
    /// Cyan coverage in percent
    pub c: f64,
    /// Magenta coverage in percent
    pub m: f64,
    /// Yellow coverage in percent
    pub y: f64,
    /// Black (key) coverage in percent
    pub k: f64,
}

impl Cmyk {
    /// Create a new CMYK color. Values are not validated here; converters
    /// reject out-of-range channels.
    #[inline]
    pub fn new(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    /// Channels as `[c, m, y, k]`.
    #[inline]
    pub fn channels(self) -> [f64; 4] {
        [self.c, self.m, self.y, self.k]
    }

    /// Value of a single channel.
    #[inline]
    pub fn channel(self, channel: Channel) -> f64 {
        match channel {
            Channel::Cyan => self.c,
            Channel::Magenta => self.m,
            Channel::Yellow => self.y,
            Channel::Black => self.k,
        }
    }

    /// Round every channel to the nearest integer, halfway cases away from
    /// zero (`2.5` becomes `3.0`).
    ///
    /// Rounding is idempotent: `c.rounded().rounded() == c.rounded()`.
    #[inline]
    pub fn rounded(self) -> Self {
        Self {
            c: self.c.round(),
            m: self.m.round(),
            y: self.y.round(),
            k: self.k.round(),
        }
    }

    /// Number of chromatic channels (C, M, Y) that are exactly zero.
    pub fn zero_chromatic_count(self) -> usize {
        [self.c, self.m, self.y].iter().filter(|&&v| v == 0.0).count()
    }

    /// First channel that is non-finite or outside `0.0..=100.0`, if any.
    pub fn out_of_range_channel(self) -> Option<(Channel, f64)> {
        Channel::ALL
            .into_iter()
            .map(|ch| (ch, self.channel(ch)))
            .find(|&(_, v)| !v.is_finite() || !(0.0..=CHANNEL_MAX).contains(&v))
    }
}

impl From<[f64; 4]> for Cmyk {
    fn from([c, m, y, k]: [f64; 4]) -> Self {
        Self { c, m, y, k }
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{} M{} Y{} K{}", self.c, self.m, self.y, self.k)
    }
}
