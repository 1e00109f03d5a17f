//! cmyk3 - three-ink CMYK reduction
//!
//! Replaces the CMYK fills and strokes of selected artwork with the
//! closest color that uses at most two chromatic inks plus black.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
