//! CMYK to Lab conversion
//!
//! The search engine never converts colors itself. It is handed a
//! [`ColorSpaceConverter`], which in a production setting is bound to a
//! working CMYK profile the engine cannot inspect. Two implementations
//! come with the crate:
//!
//! - [`SubtractiveInkModel`]: paper white plus four solid inks, mixed
//!   multiplicatively in XYZ
//! - any `Fn(Cmyk) -> Result<Lab, ConversionError> + Sync` closure, which
//!   is what tests use for synthetic, fully predictable conversions
//!
//! # Example
//!
//! ```
//! use cmyk_search::{Cmyk, ColorSpaceConverter, ConversionError, Lab};
//!
//! // L follows black coverage, chroma is ignored
//! let gray_only = |c: Cmyk| -> Result<Lab, ConversionError> {
//!     Ok(Lab::new(100.0 - c.k, 0.0, 0.0))
//! };
//! let lab = gray_only.cmyk_to_lab(Cmyk::new(0.0, 0.0, 0.0, 40.0)).unwrap();
//! assert_eq!(lab.l, 60.0);
//! ```

mod error;
mod ink_model;

pub use error::{ConversionError, InkModelError};
pub use ink_model::SubtractiveInkModel;

use crate::color::{Cmyk, Lab};

/// Converts CMYK percentages to CIELAB.
///
/// Implementations must be pure with respect to their input: the searcher
/// relies on identical inputs producing identical outputs, and may call
/// the converter from several threads at once (hence `Sync`).
pub trait ColorSpaceConverter: Sync {
    /// Convert a CMYK color (each channel `0.0..=100.0`) to Lab.
    fn cmyk_to_lab(&self, cmyk: Cmyk) -> Result<Lab, ConversionError>;
}

impl<F> ColorSpaceConverter for F
where
    F: Fn(Cmyk) -> Result<Lab, ConversionError> + Sync,
{
    #[inline]
    fn cmyk_to_lab(&self, cmyk: Cmyk) -> Result<Lab, ConversionError> {
        self(cmyk)
    }
}
