//! Subtractive ink model: paper white and four solid inks.
//!
//! Each solid ink is measured (in D50 Lab) as a 100% patch on the paper.
//! Dividing its XYZ by the paper's XYZ gives a per-component transmittance.
//! A halftone with coverage `a` passes `(1 - a) + a * t` of the light, and
//! overprinted inks multiply:
//!
//! ```text
//! XYZ = XYZ(paper) ⊙ Π over inks of ((1 - a_ink) + a_ink · t_ink)
//! ```
//!
//! This is the multiplicative (Demichel-weighted, overprints as products)
//! form of the Neugebauer model. It is deliberately small: it stands in
//! for a profile-driven color engine, not for one of its accuracy.

use super::error::{ConversionError, InkModelError};
use super::ColorSpaceConverter;
use crate::color::{Cmyk, Lab, Xyz, CHANNEL_MAX};

/// A deterministic CMYK to Lab converter built from measured solids.
///
/// # Example
///
/// ```
/// use cmyk_search::{Cmyk, ColorSpaceConverter, SubtractiveInkModel};
///
/// let model = SubtractiveInkModel::default();
///
/// // Unprinted paper reproduces the paper white
/// let paper = model.cmyk_to_lab(Cmyk::new(0.0, 0.0, 0.0, 0.0)).unwrap();
/// assert!((paper.l - model.paper().l).abs() < 1e-9);
///
/// // Out-of-range input is rejected
/// assert!(model.cmyk_to_lab(Cmyk::new(0.0, 0.0, 0.0, 101.0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubtractiveInkModel {
    paper: Lab,
    solids: [Lab; 4],
    paper_xyz: Xyz,
    // Per-ink XYZ transmittance, in C, M, Y, K order
    transmittance: [Xyz; 4],
}

impl SubtractiveInkModel {
    /// Paper white of the default model (coated stock).
    pub const DEFAULT_PAPER: Lab = Lab {
        l: 95.0,
        a: 0.0,
        b: -2.0,
    };

    /// Solid inks of the default model, in C, M, Y, K order.
    pub const DEFAULT_SOLIDS: [Lab; 4] = [
        Lab {
            l: 55.0,
            a: -37.0,
            b: -50.0,
        },
        Lab {
            l: 48.0,
            a: 74.0,
            b: -3.0,
        },
        Lab {
            l: 89.0,
            a: -5.0,
            b: 93.0,
        },
        Lab {
            l: 16.0,
            a: 0.0,
            b: 0.0,
        },
    ];

    /// Build a model from the paper white and the solids in C, M, Y, K order.
    ///
    /// # Errors
    ///
    /// Returns [`InkModelError::NonFinite`] if any Lab value has a NaN or
    /// infinite component, and [`InkModelError::PaperNotPositive`] if the
    /// paper white is black or otherwise has a non-positive XYZ component.
    pub fn new(paper: Lab, solids: [Lab; 4]) -> Result<Self, InkModelError> {
        const NAMES: [&str; 4] = ["cyan", "magenta", "yellow", "black"];

        if !paper.is_finite() {
            return Err(InkModelError::NonFinite { entry: "paper" });
        }
        for (solid, entry) in solids.iter().zip(NAMES) {
            if !solid.is_finite() {
                return Err(InkModelError::NonFinite { entry });
            }
        }

        let paper_xyz = Xyz::from(paper);
        if !(paper_xyz.x > 0.0 && paper_xyz.y > 0.0 && paper_xyz.z > 0.0) {
            return Err(InkModelError::PaperNotPositive);
        }

        let transmittance = solids.map(|solid| Xyz::from(solid).ratio(paper_xyz));

        Ok(Self {
            paper,
            solids,
            paper_xyz,
            transmittance,
        })
    }

    /// Paper white.
    #[inline]
    pub fn paper(&self) -> Lab {
        self.paper
    }

    /// Solid inks in C, M, Y, K order.
    #[inline]
    pub fn solids(&self) -> [Lab; 4] {
        self.solids
    }
}

impl Default for SubtractiveInkModel {
    fn default() -> Self {
        let paper_xyz = Xyz::from(Self::DEFAULT_PAPER);
        Self {
            paper: Self::DEFAULT_PAPER,
            solids: Self::DEFAULT_SOLIDS,
            paper_xyz,
            transmittance: Self::DEFAULT_SOLIDS.map(|solid| Xyz::from(solid).ratio(paper_xyz)),
        }
    }
}

impl ColorSpaceConverter for SubtractiveInkModel {
    fn cmyk_to_lab(&self, cmyk: Cmyk) -> Result<Lab, ConversionError> {
        if let Some((channel, value)) = cmyk.out_of_range_channel() {
            return Err(ConversionError::ChannelOutOfRange { channel, value });
        }

        let mut xyz = self.paper_xyz;
        for (coverage, t) in cmyk.channels().into_iter().zip(self.transmittance) {
            let a = coverage / CHANNEL_MAX;
            let pass = Xyz::new(
                (1.0 - a) + a * t.x,
                (1.0 - a) + a * t.y,
                (1.0 - a) + a * t.z,
            );
            xyz = xyz.scale(pass);
        }

        let lab = Lab::from(xyz);
        if !lab.is_finite() {
            return Err(ConversionError::Unavailable(format!(
                "ink model produced a non-finite Lab value for {}",
                cmyk
            )));
        }
        Ok(lab)
    }
}
