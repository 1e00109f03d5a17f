//! Error types for color conversion
//!
//! This module provides error types for CMYK to Lab conversion and for
//! building an ink model.

use std::fmt;

use crate::color::Channel;

/// Error type for CMYK to Lab conversion.
///
/// Returned by every [`ColorSpaceConverter`](super::ColorSpaceConverter).
/// The search engine never recovers from it; it is propagated unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// A channel is non-finite or outside `0.0..=100.0`
    ChannelOutOfRange {
        /// Offending channel
        channel: Channel,
        /// Value that was passed in
        value: f64,
    },
    /// The conversion service failed or is not available
    Unavailable(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::ChannelOutOfRange { channel, value } => {
                write!(f, "{} value {} is outside 0..=100", channel, value)
            }
            ConversionError::Unavailable(reason) => {
                write!(f, "color conversion unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

/// Error type for ink model construction.
#[derive(Debug, Clone, PartialEq)]
pub enum InkModelError {
    /// A configured Lab value has a NaN or infinite component
    NonFinite {
        /// Which entry is broken ("paper", "cyan", ...)
        entry: &'static str,
    },
    /// The paper white has a zero or negative XYZ component, so no ink
    /// transmittance can be derived from it
    PaperNotPositive,
}

impl fmt::Display for InkModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InkModelError::NonFinite { entry } => {
                write!(f, "ink model entry '{}' is not a finite Lab value", entry)
            }
            InkModelError::PaperNotPositive => {
                write!(f, "paper white must have positive XYZ components")
            }
        }
    }
}

impl std::error::Error for InkModelError {}
