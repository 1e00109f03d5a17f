//! Grid step granularity.

use std::fmt;

use crate::color::CHANNEL_MAX;

/// Error type for step validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepError {
    /// Step is NaN or infinite
    NotFinite(f64),
    /// Step is zero or negative (the grid would never advance)
    NotPositive(f64),
    /// Step is larger than the channel range
    TooLarge(f64),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::NotFinite(v) => write!(f, "step {} is not a finite number", v),
            StepError::NotPositive(v) => write!(f, "step {} must be greater than 0", v),
            StepError::TooLarge(v) => write!(f, "step {} must not exceed 100", v),
        }
    }
}

impl std::error::Error for StepError {}

/// Distance between neighbouring grid values, in percent.
///
/// Always finite and in `(0, 100]`. Smaller steps give a finer search at
/// cubic cost: the searcher evaluates `3 * n³` candidates where `n` is the
/// number of grid values (`n = 21` for the default step of 5).
///
/// # Example
///
/// ```
/// use cmyk_search::SearchStep;
///
/// let step = SearchStep::new(10.0).unwrap();
/// assert_eq!(step.get(), 10.0);
/// assert!(SearchStep::new(0.0).is_err());
/// assert_eq!(SearchStep::default().get(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SearchStep(f64);

impl SearchStep {
    /// The step used when nothing else is configured.
    pub const DEFAULT: SearchStep = SearchStep(5.0);

    /// Validate a step value.
    ///
    /// # Errors
    ///
    /// Returns a [`StepError`] if `value` is not finite, not positive, or
    /// larger than 100.
    pub fn new(value: f64) -> Result<Self, StepError> {
        if !value.is_finite() {
            Err(StepError::NotFinite(value))
        } else if value <= 0.0 {
            Err(StepError::NotPositive(value))
        } else if value > CHANNEL_MAX {
            Err(StepError::TooLarge(value))
        } else {
            Ok(Self(value))
        }
    }

    /// The step in percent.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// True if the grid built from this step ends exactly on 100.
    ///
    /// When it does not, full coverage (100%) of a channel is never tried.
    pub fn reaches_full_coverage(self) -> bool {
        super::grid(self).last() == Some(CHANNEL_MAX)
    }
}

impl Default for SearchStep {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for SearchStep {
    type Error = StepError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SearchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
