//! The exhaustive three-channel searcher.

use super::{Family, SearchStep};
use crate::color::{delta_e, Cmyk, Lab};
use crate::convert::{ColorSpaceConverter, ConversionError};

/// Best candidate found by a search.
///
/// A fresh result ([`SearchResult::empty`]) has every channel at 0 and an
/// infinite difference, so any real candidate replaces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// The chosen color (rounded to integers once the search returns)
    pub cmyk: Cmyk,
    /// ΔE76 between the target and the chosen color before rounding
    pub difference: f64,
}

impl SearchResult {
    /// The starting point of a search: worse than any real candidate.
    pub fn empty() -> Self {
        Self {
            cmyk: Cmyk::default(),
            difference: f64::INFINITY,
        }
    }

    /// Keep `self` unless `difference` is strictly smaller.
    #[inline]
    #[must_use]
    pub fn consider(self, cmyk: Cmyk, difference: f64) -> Self {
        if difference < self.difference {
            Self { cmyk, difference }
        } else {
            self
        }
    }

    /// Round the channels, leaving the difference untouched.
    #[inline]
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            cmyk: self.cmyk.rounded(),
            difference: self.difference,
        }
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Searches the three families for the closest match to a Lab target.
///
/// The converter is borrowed, so one converter can serve many searches.
///
/// # Example
///
/// ```
/// use cmyk_search::{Cmyk, ColorSpaceConverter, SearchStep, SubtractiveInkModel, ThreeChannelSearcher};
///
/// let model = SubtractiveInkModel::default();
/// let target = model.cmyk_to_lab(Cmyk::new(30.0, 60.0, 0.0, 20.0)).unwrap();
///
/// let searcher = ThreeChannelSearcher::new(&model);
/// let best = searcher
///     .find_best_three_color(target, SearchStep::new(10.0).unwrap())
///     .unwrap();
///
/// assert_eq!(best.cmyk, Cmyk::new(30.0, 60.0, 0.0, 20.0));
/// assert!(best.difference < 1e-9);
/// ```
pub struct ThreeChannelSearcher<'a, C: ColorSpaceConverter + ?Sized> {
    converter: &'a C,
}

impl<'a, C: ColorSpaceConverter + ?Sized> ThreeChannelSearcher<'a, C> {
    /// Create a searcher around a converter.
    pub fn new(converter: &'a C) -> Self {
        Self { converter }
    }

    /// Find the three-channel color closest to `target`.
    ///
    /// Evaluates every candidate of [`candidates`](super::candidates) and
    /// keeps the first one with the smallest ΔE76. The returned channels
    /// are rounded half away from zero; `difference` is the unrounded
    /// candidate's ΔE.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConversionError`] in enumeration order.
    pub fn find_best_three_color(
        &self,
        target: Lab,
        step: SearchStep,
    ) -> Result<SearchResult, ConversionError> {
        self.search(target, step).map(SearchResult::rounded)
    }

    /// Fold a run of candidates into its best, stopping at the first error.
    fn fold_best(
        &self,
        target: Lab,
        mut candidates: impl Iterator<Item = Cmyk>,
    ) -> Result<SearchResult, ConversionError> {
        candidates.try_fold(SearchResult::empty(), |best, cmyk| {
            let lab = self.converter.cmyk_to_lab(cmyk)?;
            Ok(best.consider(cmyk, delta_e(target, lab)))
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn search(&self, target: Lab, step: SearchStep) -> Result<SearchResult, ConversionError> {
        let all = Family::ALL
            .into_iter()
            .flat_map(move |family| family.candidates(step));
        self.fold_best(target, all)
    }

    /// Slabs are evaluated in parallel, then their bests are folded in
    /// enumeration order with the same strict comparison. The first slab
    /// best at the global minimum is the first candidate at that minimum,
    /// so the result matches the sequential fold exactly.
    #[cfg(feature = "parallel")]
    fn search(&self, target: Lab, step: SearchStep) -> Result<SearchResult, ConversionError> {
        use rayon::prelude::*;

        let slabs: Vec<(Family, f64)> = Family::ALL
            .into_iter()
            .flat_map(|family| super::grid(step).map(move |outer| (family, outer)))
            .collect();

        let slab_bests: Vec<Result<SearchResult, ConversionError>> = slabs
            .par_iter()
            .map(|&(family, outer)| self.fold_best(target, family.slab(outer, step)))
            .collect();

        slab_bests
            .into_iter()
            .try_fold(SearchResult::empty(), |best, slab| {
                let slab = slab?;
                Ok(best.consider(slab.cmyk, slab.difference))
            })
    }
}
