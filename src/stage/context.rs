//! Execution-context resolution.
//!
//! A stage runs either in local mode, where the caller supplies one shared
//! directory for input and output, or in platform mode, where the stage's
//! fixed mount-point directories apply. The mode is decided by the leading
//! positional invocation arguments: a first argument equal to the literal
//! `local` selects local mode and makes the second argument (the base path)
//! mandatory; anything else falls back to platform mode.
//!
//! Resolution is pure. The resolved directories are not checked for
//! existence here; a missing directory surfaces later as a read or write
//! failure in the runner.

use std::path::PathBuf;

use crate::error::StageError;
use crate::stage::config::StageConfig;

/// Token selecting local mode in the first invocation argument.
const LOCAL_MODE_TOKEN: &str = "local";

/// Where a stage reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Caller-supplied directory, used for both input and output.
    Local(PathBuf),
    /// Fixed per-stage mount paths from the hosting environment.
    Platform,
}

impl ExecutionMode {
    /// Parses the execution mode from positional invocation arguments.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::MissingBasePath`] when the first argument is
    /// `local` but no non-empty base path follows.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, StageError> {
        let mode: Option<&str> = args.first().map(|s| s.as_ref());
        match mode {
            Some(LOCAL_MODE_TOKEN) => {
                let base: Option<&str> = args.get(1).map(|s| s.as_ref());
                match base {
                    Some(b) if !b.is_empty() => Ok(ExecutionMode::Local(PathBuf::from(b))),
                    _ => Err(StageError::MissingBasePath),
                }
            }
            _ => Ok(ExecutionMode::Platform),
        }
    }
}

/// Input and output directories for one stage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

/// Maps an execution mode onto a stage's directories.
pub fn resolve_paths(config: &StageConfig, mode: &ExecutionMode) -> ResolvedPaths {
    match mode {
        ExecutionMode::Local(base) => ResolvedPaths {
            input_dir: base.clone(),
            output_dir: base.clone(),
        },
        ExecutionMode::Platform => ResolvedPaths {
            input_dir: config.default_input_dir.clone(),
            output_dir: config.default_output_dir.clone(),
        },
    }
}
