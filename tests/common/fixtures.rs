//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use cmyk3::models::{Artwork, Color, Document, PathItem};
use cmyk_search::{Cmyk, ConversionError, Lab};

/// Source colors used across tests
pub mod colors {
    use cmyk_search::Cmyk;

    /// Already three-channel and on the step-10 grid
    pub const REACHABLE: Cmyk = Cmyk {
        c: 30.0,
        m: 60.0,
        y: 0.0,
        k: 20.0,
    };

    /// Three-ink gray, only approximable
    pub const CMY_GRAY: Cmyk = Cmyk {
        c: 40.0,
        m: 40.0,
        y: 40.0,
        k: 0.0,
    };
}

/// A document exercising every artwork type
pub const MIXED_DOCUMENT: &str = r#"{
  "name": "flyer.ai",
  "selection": [
    {
      "type": "path",
      "name": "background",
      "fill": { "model": "cmyk", "cyan": 30, "magenta": 60, "yellow": 0, "black": 20 },
      "stroke": { "model": "rgb", "red": 0, "green": 0, "blue": 0 }
    },
    {
      "type": "group",
      "name": "logo",
      "children": [
        {
          "type": "text_frame",
          "contents": "ACME",
          "fill": { "model": "cmyk", "cyan": 40, "magenta": 40, "yellow": 40, "black": 0 }
        },
        { "type": "other", "kind": "raster" }
      ]
    },
    {
      "type": "compound_path",
      "paths": [
        { "stroke": { "model": "cmyk", "cyan": 0, "magenta": 0, "yellow": 0, "black": 100 } },
        { "fill": { "model": "spot", "name": "Gold", "tint": 100 } }
      ]
    }
  ]
}"#;

/// Lab derived linearly from CMYK, for predictable searches
pub fn linear_lab(c: Cmyk) -> Result<Lab, ConversionError> {
    Ok(Lab::new(
        100.0 - c.k - 0.3 * (c.c + c.m + c.y),
        c.m - c.c,
        c.y - 0.5 * (c.c + c.m),
    ))
}

/// A document with one filled path per color
pub fn filled_paths(colors: &[Cmyk]) -> Document {
    Document {
        name: Some("fixture".to_string()),
        selection: colors
            .iter()
            .map(|&cmyk| {
                Artwork::Path(PathItem {
                    name: None,
                    fill: Some(Color::from(cmyk)),
                    stroke: None,
                })
            })
            .collect(),
    }
}

/// Write text into `dir` and return the file path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
