//! Dashboard configuration.
//!
//! Settings are read from a `kira-verbalviz.toml` file when one is present
//! and then overridden by command line flags.

use crate::core::error::{DashResult, DashboardError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "kira-verbalviz.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub charts: ChartConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Input locations and dataset shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory both input files are resolved against.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Item table (CSV, optionally gzip-compressed).
    #[serde(default = "default_dataset_file")]
    pub dataset_file: String,

    /// JSON file carrying the `ability` array.
    #[serde(default = "default_ability_file")]
    pub ability_file: String,

    /// Number of participants; ids run over `0..participant_count`.
    #[serde(default = "default_participant_count")]
    pub participant_count: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            dataset_file: default_dataset_file(),
            ability_file: default_ability_file(),
            participant_count: default_participant_count(),
        }
    }
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_dataset_file() -> String {
    "art_generated_data.csv".to_string()
}

fn default_ability_file() -> String {
    "best_parameters.json".to_string()
}

fn default_participant_count() -> usize {
    120
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Points used to draw the regression line.
    #[serde(default = "default_regression_samples")]
    pub regression_samples: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            histogram_bins: default_histogram_bins(),
            regression_samples: default_regression_samples(),
        }
    }
}

fn default_histogram_bins() -> usize {
    20
}

fn default_regression_samples() -> usize {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page template with `{{ slot }}` placeholders. Built-in when unset.
    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template: None,
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    "Verbal Test Visualisation".to_string()
}

impl DashboardConfig {
    pub fn load(path: &Path) -> DashResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: DashboardConfig = toml::from_str(&content).map_err(|e| {
            DashboardError::Configuration(format!("failed to parse {}: {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Returns `Ok(None)` when the default file does not exist.
    pub fn load_default(dir: &Path) -> DashResult<Option<Self>> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.data.base_dir.join(&self.data.dataset_file)
    }

    pub fn ability_path(&self) -> PathBuf {
        self.data.base_dir.join(&self.data.ability_file)
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.data.participant_count == 0 {
            return Err(DashboardError::Configuration(
                "participant_count must be >= 1".to_string(),
            ));
        }
        if self.charts.histogram_bins == 0 {
            return Err(DashboardError::Configuration(
                "histogram_bins must be >= 1".to_string(),
            ));
        }
        if self.charts.regression_samples < 2 {
            return Err(DashboardError::Configuration(
                "regression_samples must be >= 2".to_string(),
            ));
        }
        Ok(())
    }

    pub fn default_toml() -> DashResult<String> {
        let body = toml::to_string_pretty(&DashboardConfig::default()).map_err(|e| {
            DashboardError::Configuration(format!("failed to serialize default config: {e}"))
        })?;
        Ok(format!("# kira-verbalviz configuration\n\n{body}"))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/config.rs"]
mod tests;
