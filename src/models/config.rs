use std::path::Path;

use cmyk_search::{Lab, SearchStep, SubtractiveInkModel};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Grid step in percent (smaller is finer and much slower)
    #[serde(default = "default_step")]
    pub step: f64,

    /// Paper and solid ink measurements used for CMYK to Lab conversion
    #[serde(default)]
    pub ink_model: InkModelConfig,
}

fn default_step() -> f64 {
    SearchStep::DEFAULT.get()
}

/// D50 Lab triples `[L, a, b]` for the paper and each solid ink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InkModelConfig {
    #[serde(default = "default_paper")]
    pub paper: [f64; 3],
    #[serde(default = "default_cyan")]
    pub cyan: [f64; 3],
    #[serde(default = "default_magenta")]
    pub magenta: [f64; 3],
    #[serde(default = "default_yellow")]
    pub yellow: [f64; 3],
    #[serde(default = "default_black")]
    pub black: [f64; 3],
}

fn triple(lab: Lab) -> [f64; 3] {
    [lab.l, lab.a, lab.b]
}

fn default_paper() -> [f64; 3] {
    triple(SubtractiveInkModel::DEFAULT_PAPER)
}

fn default_cyan() -> [f64; 3] {
    triple(SubtractiveInkModel::DEFAULT_SOLIDS[0])
}

fn default_magenta() -> [f64; 3] {
    triple(SubtractiveInkModel::DEFAULT_SOLIDS[1])
}

fn default_yellow() -> [f64; 3] {
    triple(SubtractiveInkModel::DEFAULT_SOLIDS[2])
}

fn default_black() -> [f64; 3] {
    triple(SubtractiveInkModel::DEFAULT_SOLIDS[3])
}

impl Default for InkModelConfig {
    fn default() -> Self {
        Self {
            paper: default_paper(),
            cyan: default_cyan(),
            magenta: default_magenta(),
            yellow: default_yellow(),
            black: default_black(),
        }
    }
}

impl InkModelConfig {
    /// Build the converter described by this config.
    pub fn build(&self) -> Result<SubtractiveInkModel, ConfigError> {
        let lab = |[l, a, b]: [f64; 3]| Lab::new(l, a, b);
        let model = SubtractiveInkModel::new(
            lab(self.paper),
            [
                lab(self.cyan),
                lab(self.magenta),
                lab(self.yellow),
                lab(self.black),
            ],
        )?;
        Ok(model)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            ink_model: InkModelConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text. An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration if a path is given, falling back to defaults on
    /// any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), step = config.step, "Loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// The configured step, validated.
    pub fn search_step(&self) -> Result<SearchStep, ConfigError> {
        Ok(SearchStep::new(self.step)?)
    }

    /// The configured ink model, validated.
    pub fn ink_model(&self) -> Result<SubtractiveInkModel, ConfigError> {
        self.ink_model.build()
    }

    /// The defaults as commented YAML, as written by `cmyk3 init`.
    pub fn default_yaml() -> String {
        let config = Self::default();
        let fmt = |[l, a, b]: [f64; 3]| format!("[{l}, {a}, {b}]");
        format!(
            "# cmyk3 configuration\n\
             \n\
             # Grid step in percent. Must be in (0, 100]. Steps that do not divide\n\
             # 100 evenly never try 100% coverage.\n\
             step: {}\n\
             \n\
             # D50 Lab values [L, a, b] of the unprinted paper and of each solid ink.\n\
             ink_model:\n\
             \x20 paper: {}\n\
             \x20 cyan: {}\n\
             \x20 magenta: {}\n\
             \x20 yellow: {}\n\
             \x20 black: {}\n",
            config.step,
            fmt(config.ink_model.paper),
            fmt(config.ink_model.cyan),
            fmt(config.ink_model.magenta),
            fmt(config.ink_model.yellow),
            fmt(config.ink_model.black),
        )
    }
}
