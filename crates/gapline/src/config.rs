//! Input locations and pipeline settings, persisted as JSON.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GaplineError, Result};
use crate::pipeline::PipelineConfig;
use crate::reshape::Metric;

/// Directory the dashboard reads from when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Paths to the three wide input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPaths {
    pub gdp_per_cap: PathBuf,
    pub life_exp: PathBuf,
    pub population: PathBuf,
}

impl DatasetPaths {
    /// Default file names inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            gdp_per_cap: dir.join("gdp_pcap.csv"),
            life_exp: dir.join("life_expectancy.csv"),
            population: dir.join("population.csv"),
        }
    }

    /// Path for one metric.
    pub fn get(&self, metric: Metric) -> &Path {
        match metric {
            Metric::GdpPerCapita => &self.gdp_per_cap,
            Metric::LifeExpectancy => &self.life_exp,
            Metric::Population => &self.population,
        }
    }

    /// Replace the path for one metric.
    pub fn set(&mut self, metric: Metric, path: impl Into<PathBuf>) {
        let slot = match metric {
            Metric::GdpPerCapita => &mut self.gdp_per_cap,
            Metric::LifeExpectancy => &mut self.life_exp,
            Metric::Population => &mut self.population,
        };
        *slot = path.into();
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::from_dir(DEFAULT_DATA_DIR)
    }
}

/// Everything needed to build the dashboard tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GaplineConfig {
    pub data: DatasetPaths,
    pub pipeline: PipelineConfig,
}

impl GaplineConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            GaplineError::Config(format!("Failed to open config '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            GaplineError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    GaplineError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            GaplineError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::to_writer_pretty(BufWriter::new(file), self).map_err(|e| {
            GaplineError::Persistence(format!("Failed to serialize config: {}", e))
        })?;

        Ok(())
    }
}
