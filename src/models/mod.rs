pub mod config;
pub mod document;

pub use config::{AppConfig, InkModelConfig};
pub use document::{Artwork, Color, ColorSlot, CompoundPath, Document, Group, Painted, PathItem, TextFrame};
