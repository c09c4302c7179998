//! Stage configuration.
//!
//! A [`StageConfig`] carries everything that distinguishes one pipeline
//! stage from another: its name, the single input and output file names, and
//! the default directories used in platform mode. The runner takes it at
//! construction, so the same stage logic runs against arbitrary directories
//! in tests.
//!
//! The built-in definitions reproduce the stage chain of the hosted
//! pipeline: `preprocess` feeds `predict` feeds `postprocess`, coupled only
//! by matching file names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// IO error while reading a stage definition file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stage definition file could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for a single pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage name used in logs and reports.
    pub name: String,
    /// Name of the one file the stage reads.
    pub input_file_name: String,
    /// Name of the one file the stage writes.
    pub output_file_name: String,
    /// Input directory used in platform mode.
    pub default_input_dir: PathBuf,
    /// Output directory used in platform mode.
    pub default_output_dir: PathBuf,
}

impl StageConfig {
    /// Creates a stage configuration with the platform defaults of a
    /// processing-job mount.
    pub fn new(
        name: impl Into<String>,
        input_file_name: impl Into<String>,
        output_file_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_file_name: input_file_name.into(),
            output_file_name: output_file_name.into(),
            default_input_dir: PathBuf::from("/opt/ml/processing/input"),
            default_output_dir: PathBuf::from("/opt/ml/processing/output"),
        }
    }

    /// The built-in preprocessing stage (processing-job path convention).
    pub fn preprocess() -> Self {
        Self::new("preprocess", "pre_processing_input.csv", "predictions_input.csv")
    }

    /// The built-in preprocessing stage with the training-job path
    /// convention. Same files, different mounts.
    pub fn preprocess_training() -> Self {
        Self::preprocess()
            .with_default_input_dir("/opt/ml/input/data/source")
            .with_default_output_dir("/opt/ml/output/data")
    }

    /// The built-in inference stage.
    pub fn predict() -> Self {
        Self::new("predict", "predictions_input.csv", "predictions_output.csv")
    }

    /// The built-in postprocessing stage.
    pub fn postprocess() -> Self {
        Self::new("postprocess", "predictions_output.csv", "final_output.csv")
    }

    /// Loads a stage definition from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails
    /// validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "name cannot be empty".to_string(),
            ));
        }

        for (field, value) in [
            ("input_file_name", &self.input_file_name),
            ("output_file_name", &self.output_file_name),
        ] {
            if value.is_empty() {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} cannot be empty",
                    field
                )));
            }
            if value.contains(std::path::MAIN_SEPARATOR) || value.contains('/') {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be a bare file name, got '{}'",
                    field, value
                )));
            }
        }

        if self.default_input_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "default_input_dir cannot be empty".to_string(),
            ));
        }

        if self.default_output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "default_output_dir cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder method to set the platform-mode input directory.
    pub fn with_default_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_input_dir = dir.into();
        self
    }

    /// Builder method to set the platform-mode output directory.
    pub fn with_default_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_output_dir = dir.into();
        self
    }
}
