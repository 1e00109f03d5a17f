use std::path::PathBuf;

use cmyk_search::{ConversionError, InkModelError, StepError};
use thiserror::Error;

use crate::models::ColorSlot;
use crate::services::BatchReport;

#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("No document is open")]
    NoDocument,

    #[error("No objects are selected")]
    EmptySelection,

    /// The batch stopped at `location`. Everything in `completed` was
    /// already written back to the document.
    #[error("Failed to convert {slot} color: {source}")]
    Conversion {
        location: String,
        slot: ColorSlot,
        completed: BatchReport,
        source: ConversionError,
    },
}

impl ReduceError {
    /// Where the batch stopped, if it stopped inside the selection.
    pub fn location(&self) -> Option<&str> {
        match self {
            ReduceError::Conversion { location, .. } => Some(location),
            ReduceError::NoDocument | ReduceError::EmptySelection => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid step: {0}")]
    InvalidStep(#[from] StepError),

    #[error("Invalid ink model: {0}")]
    InkModel(#[from] InkModelError),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to access document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Document parse error: {0}")]
    Parse(serde_json::Error),

    #[error("Document serialize error: {0}")]
    Serialize(serde_json::Error),
}
