//! Error types for pipeline stage operations.
//!
//! Defines error types for the two subsystems of a stage run:
//! - The I/O boundary (reading, parsing and writing datasets)
//! - The stage transform
//!
//! All I/O boundary failures are fatal: the stage aborts on the first error
//! and produces no output file.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a stage.
#[derive(Debug, Error)]
pub enum StageError {
    /// The resolved input path does not contain the expected file.
    #[error("Input file not found: {0}")]
    MissingInputFile(PathBuf),

    /// The output directory cannot be created or the output file written.
    #[error("Output location '{path}' is not writable: {message}")]
    UnwritableOutputLocation { path: PathBuf, message: String },

    /// The input file exists but cannot be parsed as tabular CSV.
    #[error("Malformed CSV input in '{path}': {message}")]
    MalformedInput { path: PathBuf, message: String },

    /// Local mode was requested without a base path.
    #[error("'local' mode requires a non-empty base path argument")]
    MissingBasePath,

    /// The transform rejected the dataset.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// IO error outside the cases above.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a stage transform.
///
/// The runner defines no recovery semantics for these; a failing transform
/// aborts the stage before any output is written.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Transform '{name}' failed: {reason}")]
    Failed { name: String, reason: String },
}

impl TransformError {
    /// Convenience constructor for transform implementations.
    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TransformError::Failed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
