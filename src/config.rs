//! Run configuration for the gore pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::projection::RepairConfig;
use crate::split::{DEFAULT_DEGREE_STEP, FULL_TURN_DEG};

/// Subdirectory of the output directory holding projected gores.
pub const PROJECTED_DIR_NAME: &str = "projected_gores";

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Everything a single run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoreConfig {
    /// Source image.
    pub input: PathBuf,
    /// Directory receiving raw and projected gores.
    pub output_dir: PathBuf,
    /// Path of the merged image.
    pub output_image: PathBuf,
    /// Angular width of each gore, in degrees.
    pub degree_step: u32,
    /// Equator gap repair parameters.
    pub repair: RepairConfig,
    /// Project gores on the rayon pool.
    pub parallel: bool,
}

impl Default for GoreConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::new(),
            output_image: PathBuf::new(),
            degree_step: DEFAULT_DEGREE_STEP,
            repair: RepairConfig::default(),
            parallel: false,
        }
    }
}

impl GoreConfig {
    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that the required paths are set and the degree step is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input path is required".into()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output directory is required".into()));
        }
        if self.output_image.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output image path is required".into()));
        }
        if self.degree_step == 0 || self.degree_step > FULL_TURN_DEG {
            return Err(ConfigError::Invalid(format!(
                "degree step must be between 1 and {}, got {}",
                FULL_TURN_DEG, self.degree_step
            )));
        }
        Ok(())
    }

    /// Directory receiving projected gores: `{output_dir}/projected_gores`.
    pub fn projected_dir(&self) -> PathBuf {
        self.output_dir.join(PROJECTED_DIR_NAME)
    }
}
