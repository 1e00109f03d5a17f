//! Three-channel search
//!
//! Finds the CMYK color with one of C/M/Y pinned to zero whose Lab value
//! is closest (ΔE76) to a target. The search is exhaustive over a fixed
//! grid: no pruning, no memoization, no early exit.
//!
//! # Enumeration order
//!
//! Candidates come in a fixed order, and the order decides ties: the
//! running best is replaced only by a *strictly* smaller difference, so
//! the first candidate reaching the minimum wins.
//!
//! 1. [`Family::CyanMagenta`]: C, then M, then K over the grid, Y = 0
//! 2. [`Family::CyanYellow`]: C, then Y, then K over the grid, M = 0
//! 3. [`Family::MagentaYellow`]: M, then Y, then K over the grid, C = 0
//!
//! The first channel named is the outermost loop, K the innermost.
//!
//! # Grid
//!
//! The grid is `0, step, 2·step, …` built by repeated addition and cut at
//! the last value not above 100. If the progression does not land exactly
//! on 100, full coverage is never tried (a step of 30 visits 0, 30, 60
//! and 90 only).

mod searcher;
mod step;

pub use searcher::{SearchResult, ThreeChannelSearcher};
pub use step::{SearchStep, StepError};

use crate::color::{Channel, Cmyk, CHANNEL_MAX};

/// One of the three candidate subspaces, named after its free chromatic
/// channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Cyan and magenta free, yellow pinned to 0
    CyanMagenta,
    /// Cyan and yellow free, magenta pinned to 0
    CyanYellow,
    /// Magenta and yellow free, cyan pinned to 0
    MagentaYellow,
}

impl Family {
    /// All families in enumeration order.
    pub const ALL: [Family; 3] = [
        Family::CyanMagenta,
        Family::CyanYellow,
        Family::MagentaYellow,
    ];

    /// The chromatic channel this family pins to zero.
    pub fn pinned(self) -> Channel {
        match self {
            Family::CyanMagenta => Channel::Yellow,
            Family::CyanYellow => Channel::Magenta,
            Family::MagentaYellow => Channel::Cyan,
        }
    }

    /// Build a candidate from the outer free channel, the inner free
    /// channel and K.
    #[inline]
    pub fn compose(self, outer: f64, inner: f64, k: f64) -> Cmyk {
        match self {
            Family::CyanMagenta => Cmyk::new(outer, inner, 0.0, k),
            Family::CyanYellow => Cmyk::new(outer, 0.0, inner, k),
            Family::MagentaYellow => Cmyk::new(0.0, outer, inner, k),
        }
    }

    /// All candidates of this family in enumeration order.
    pub fn candidates(self, step: SearchStep) -> impl Iterator<Item = Cmyk> {
        grid(step).flat_map(move |outer| self.slab(outer, step))
    }

    /// Candidates of this family sharing one outer channel value, in
    /// enumeration order. Slabs are the unit of parallel work.
    pub fn slab(self, outer: f64, step: SearchStep) -> impl Iterator<Item = Cmyk> {
        grid(step).flat_map(move |inner| grid(step).map(move |k| self.compose(outer, inner, k)))
    }
}

/// Channel values visited by the search, in ascending order.
///
/// # Example
///
/// ```
/// use cmyk_search::{search::grid, SearchStep};
///
/// let values: Vec<f64> = grid(SearchStep::new(30.0).unwrap()).collect();
/// assert_eq!(values, vec![0.0, 30.0, 60.0, 90.0]);
/// ```
pub fn grid(step: SearchStep) -> impl Iterator<Item = f64> + Clone {
    let step = step.get();
    std::iter::successors(Some(0.0), move |v| Some(v + step)).take_while(|&v| v <= CHANNEL_MAX)
}

/// Every candidate, tagged with its family, in enumeration order.
pub fn candidates(step: SearchStep) -> impl Iterator<Item = (Family, Cmyk)> {
    Family::ALL
        .into_iter()
        .flat_map(move |family| family.candidates(step).map(move |cmyk| (family, cmyk)))
}

/// Number of conversions a search with this step performs:
/// `3 * n³`, `n` being the number of grid values.
pub fn candidate_count(step: SearchStep) -> usize {
    let n = grid(step).count();
    Family::ALL.len() * n * n * n
}
