//! Artwork document model.
//!
//! A document is stored as JSON. The whole file may be `null`, which reads
//! as "no document is open".

use std::fmt;
use std::path::Path;

use cmyk_search::Cmyk;
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// An open document and its current selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Selected objects in selection order
    #[serde(default)]
    pub selection: Vec<Artwork>,
}

impl Document {
    /// Parse a document file. `Ok(None)` means the file holds `null`.
    pub fn from_json_str(json: &str) -> Result<Option<Self>, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::Parse)
    }

    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Option<Self>, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    /// Write the document to disk, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let mut json = self.to_json_string()?;
        json.push('\n');
        std::fs::write(path, json).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A selected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Artwork {
    Path(PathItem),
    CompoundPath(CompoundPath),
    Group(Group),
    /// Only the frame's own fill and stroke; per-character colors are not
    /// part of the model.
    TextFrame(TextFrame),
    /// Anything else (placed images, symbols, meshes, ...)
    Other {
        #[serde(default)]
        kind: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompoundPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub paths: Vec<PathItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<Artwork>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub contents: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
}

/// Which of an object's two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    Fill,
    Stroke,
}

impl ColorSlot {
    /// Slots in processing order.
    pub const ALL: [ColorSlot; 2] = [ColorSlot::Fill, ColorSlot::Stroke];
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSlot::Fill => write!(f, "fill"),
            ColorSlot::Stroke => write!(f, "stroke"),
        }
    }
}

/// Objects that carry their own fill and stroke.
pub trait Painted {
    fn color_mut(&mut self, slot: ColorSlot) -> &mut Option<Color>;
}

impl Painted for PathItem {
    fn color_mut(&mut self, slot: ColorSlot) -> &mut Option<Color> {
        match slot {
            ColorSlot::Fill => &mut self.fill,
            ColorSlot::Stroke => &mut self.stroke,
        }
    }
}

impl Painted for TextFrame {
    fn color_mut(&mut self, slot: ColorSlot) -> &mut Option<Color> {
        match slot {
            ColorSlot::Fill => &mut self.fill,
            ColorSlot::Stroke => &mut self.stroke,
        }
    }
}

/// A color tagged with its color model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Color {
    /// Percentages, `0..=100`
    Cmyk {
        cyan: f64,
        magenta: f64,
        yellow: f64,
        black: f64,
    },
    /// `0..=255`
    Rgb { red: f64, green: f64, blue: f64 },
    /// Percent black
    Gray { gray: f64 },
    Spot { name: String, tint: f64 },
}

impl Color {
    /// The CMYK channels, if this is a CMYK color.
    pub fn as_cmyk(&self) -> Option<Cmyk> {
        match *self {
            Color::Cmyk {
                cyan,
                magenta,
                yellow,
                black,
            } => Some(Cmyk::new(cyan, magenta, yellow, black)),
            _ => None,
        }
    }
}

impl From<Cmyk> for Color {
    fn from(cmyk: Cmyk) -> Self {
        Color::Cmyk {
            cyan: cmyk.c,
            magenta: cmyk.m,
            yellow: cmyk.y,
            black: cmyk.k,
        }
    }
}
