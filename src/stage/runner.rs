//! The stage runner: one read, one transform, one write.
//!
//! `StageRunner` is the generic realization of a pipeline stage. It owns a
//! [`StageConfig`] and a boxed [`Transform`] and executes the fixed linear
//! sequence: resolve context, read the input file, apply the transform once,
//! write the output file. There is no retry and no partial output: the run
//! either fully completes or aborts on the first failure, leaving no output
//! file behind.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::dataset::Dataset;
use crate::error::StageError;
use crate::stage::config::StageConfig;
use crate::stage::context::{resolve_paths, ExecutionMode};
use crate::transform::{Identity, Transform};

/// Marker printed to stdout when a run begins.
const START_MARKER: &str = "Started Run";
/// Marker printed to stdout when a run completes.
const COMPLETION_MARKER: &str = "Completed Run";

/// Result of one completed stage run.
#[derive(Debug)]
pub struct RunReport {
    /// Name of the stage that ran.
    pub stage: String,
    /// Full path of the file that was read.
    pub input_path: PathBuf,
    /// Full path of the file that was written.
    pub output_path: PathBuf,
    /// Data rows read from the input file.
    pub rows_read: usize,
    /// Data rows written to the output file.
    pub rows_written: usize,
    /// Wall-clock duration of the run.
    pub duration: Duration,
}

/// Executes one pipeline stage.
pub struct StageRunner {
    config: StageConfig,
    transform: Box<dyn Transform>,
}

impl StageRunner {
    /// Creates a runner with the identity transform.
    pub fn new(config: StageConfig) -> Self {
        Self::with_transform(config, Box::new(Identity))
    }

    /// Creates a runner with a caller-supplied transform.
    pub fn with_transform(config: StageConfig, transform: Box<dyn Transform>) -> Self {
        Self { config, transform }
    }

    /// The stage configuration this runner was built with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// Runs the stage under the given execution mode.
    ///
    /// # Errors
    ///
    /// Returns `StageError` if the input file is missing or malformed, the
    /// transform fails, or the output location is not writable. No output
    /// file is produced on error.
    pub fn run(&self, mode: &ExecutionMode) -> Result<RunReport, StageError> {
        let start = Instant::now();
        println!("{}", START_MARKER);

        let paths = resolve_paths(&self.config, mode);
        let input_path = paths.input_dir.join(&self.config.input_file_name);
        let output_path = paths.output_dir.join(&self.config.output_file_name);

        info!(
            stage = %self.config.name,
            input = %input_path.display(),
            "reading input file"
        );
        let input = Dataset::read_csv(&input_path)?;
        let rows_read = input.row_count();

        info!(
            stage = %self.config.name,
            transform = %self.transform.name(),
            rows = rows_read,
            "applying transform"
        );
        let output = self.transform.apply(input)?;
        let rows_written = output.row_count();

        info!(
            stage = %self.config.name,
            output = %output_path.display(),
            rows = rows_written,
            "writing output file"
        );
        output.write_csv(&output_path)?;

        println!("{}", COMPLETION_MARKER);
        Ok(RunReport {
            stage: self.config.name.clone(),
            input_path,
            output_path,
            rows_read,
            rows_written,
            duration: start.elapsed(),
        })
    }

    /// Parses positional invocation arguments and runs the stage.
    ///
    /// Convenience wrapper preserving the historical invocation contract:
    /// `args[0]` is the mode token, `args[1]` the local base path.
    pub fn run_with_args<S: AsRef<str>>(&self, args: &[S]) -> Result<RunReport, StageError> {
        let mode = ExecutionMode::from_args(args)?;
        self.run(&mode)
    }
}
