//! Pipeline configuration, loadable from TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::traits::LocateRequest;
use crate::types::*;
use crate::utils::validation::{threshold_from_slider, validate_column_boundaries};

/// Marketing and footer cells that mark a grid as decorative
pub const DEFAULT_NOISE_MARKERS: [&str; 3] = [
    "Fone Fácil Bradesco",
    "Se Preferir, fale com a BIA pelo",
    "Saldo Invest Fácil",
];

/// Column x-boundaries of the statement layout
pub const DEFAULT_COLUMN_BOUNDARIES: [u32; 5] = [90, 220, 320, 420, 520];

pub const DEFAULT_ROW_TOLERANCE: u32 = 15;

/// Default similarity slider position
pub const DEFAULT_SLIDER: f64 = 0.85;

/// Settings shared by every stage of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// A grid containing any of these cells is discarded
    pub noise_markers: Vec<String>,
    /// Cell text identifying the table header row
    pub header_token: String,
    /// Column boundaries passed to the table locator for every page
    pub column_boundaries: Vec<u32>,
    /// Row-merge tolerance passed to the table locator
    pub row_tolerance: u32,
    /// Initial similarity slider position, 0.50 to 1.00
    pub default_slider: f64,
    /// Fee glossary, one term per line
    pub glossary_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            noise_markers: DEFAULT_NOISE_MARKERS.iter().map(|s| s.to_string()).collect(),
            header_token: Column::Date.label().to_string(),
            column_boundaries: DEFAULT_COLUMN_BOUNDARIES.to_vec(),
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            default_slider: DEFAULT_SLIDER,
            glossary_path: None,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> PipelineResult<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PipelineError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.header_token.trim().is_empty() {
            return Err(PipelineError::Config(
                "header_token cannot be empty".to_string(),
            ));
        }
        validate_column_boundaries(&self.column_boundaries)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        threshold_from_slider(self.default_slider)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(())
    }

    /// Threshold matching the configured slider position
    pub fn default_threshold(&self) -> PipelineResult<u8> {
        threshold_from_slider(self.default_slider)
    }

    /// Locator request covering `pages` pages with the configured layout
    pub fn locate_request(&self, pages: usize) -> LocateRequest {
        LocateRequest::uniform(pages, &self.column_boundaries, self.row_tolerance)
    }
}
