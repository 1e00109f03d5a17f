//! Color types
//!
//! - [`Cmyk`]: process color in percent, the input and output of the search
//! - [`Lab`]: CIELAB (D50), where differences are measured
//! - [`Xyz`]: CIE XYZ (D50), used by the ink model to mix inks
//!
//! # Example
//!
//! ```
//! use cmyk_search::{Lab, Xyz};
//!
//! let white = Lab::from(cmyk_search::color::D50_WHITE);
//! assert!((white.l - 100.0).abs() < 1e-9);
//!
//! let back = Xyz::from(white);
//! assert!((back.y - 1.0).abs() < 1e-9);
//! ```

mod cmyk;
mod lab;

pub use cmyk::{Channel, Cmyk, CHANNEL_MAX};
pub use lab::{delta_e, Lab, Xyz, D50_WHITE};
