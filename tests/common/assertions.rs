//! Assertion helpers for tests.

use cmyk3::models::{Artwork, Color};
use cmyk_search::Cmyk;

/// Assert a color uses at most two chromatic inks and integer percentages
pub fn assert_three_channel(cmyk: Cmyk) {
    assert!(
        cmyk.zero_chromatic_count() >= 1,
        "Expected a zero C, M or Y channel, got {}",
        cmyk
    );
    for value in cmyk.channels() {
        assert_eq!(value, value.round(), "Expected integer channels, got {}", cmyk);
    }
}

/// The fill of a path artwork, as CMYK
pub fn path_fill(artwork: &Artwork) -> Option<Cmyk> {
    match artwork {
        Artwork::Path(path) => path.fill.as_ref().and_then(Color::as_cmyk),
        other => panic!("Expected path, got {:?}", other),
    }
}
