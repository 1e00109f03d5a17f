//! cmyk-search: three-channel approximation of CMYK colors
//!
//! Given a target color in CIELAB, this crate finds the CMYK color whose
//! cyan, magenta or yellow channel is zero and whose Lab value is closest
//! to the target by ΔE76. Printing with one chromatic ink fewer is the
//! point: every result is a combination of at most two chromatic inks and
//! black.
//!
//! # Quick Start
//!
//! ```
//! use cmyk_search::{Cmyk, ColorSpaceConverter, SearchStep, SubtractiveInkModel, ThreeChannelSearcher};
//!
//! let model = SubtractiveInkModel::default();
//! let target = model.cmyk_to_lab(Cmyk::new(40.0, 40.0, 40.0, 0.0)).unwrap();
//!
//! let best = ThreeChannelSearcher::new(&model)
//!     .find_best_three_color(target, SearchStep::default())
//!     .unwrap();
//!
//! assert!(best.cmyk.zero_chromatic_count() >= 1);
//! assert!(best.difference > 0.0);
//! ```
//!
//! # Pieces
//!
//! - [`color`]: [`Cmyk`] and [`Lab`] values, the D50 Lab/XYZ transforms
//!   and [`delta_e`]
//! - [`convert`]: the [`ColorSpaceConverter`] seam and the
//!   [`SubtractiveInkModel`] implementation
//! - [`search`]: the candidate grid, its enumeration order and the
//!   [`ThreeChannelSearcher`]
//!
//! # Distance
//!
//! Distances are CIE76: plain Euclidean distance in L\*a\*b\*. It is
//! cheap and matches how the result is reported to users. It is not
//! perceptually uniform in saturated regions, so two results with close
//! differences are not necessarily equally good matches to the eye.
//!
//! # Features
//!
//! - `parallel` (default): evaluate the grid on the rayon thread pool.
//!   Results are identical to the sequential search, ties included.

pub mod color;
pub mod convert;
pub mod search;


pub use color::{delta_e, Channel, Cmyk, Lab, Xyz};
pub use convert::{ColorSpaceConverter, ConversionError, InkModelError, SubtractiveInkModel};
pub use search::{Family, SearchResult, SearchStep, StepError, ThreeChannelSearcher};
