//! Sequential pipeline orchestration.
//!
//! A [`Pipeline`] chains stage runners in strict sequence over one shared
//! local directory. Stages are coupled only by matching file names, so the
//! shared directory makes one stage's output the next stage's input with no
//! further coordination. Stages never run concurrently; the first failure
//! aborts the remainder of the chain.
//!
//! In platform mode sequencing belongs to the external orchestrator, which
//! is why this type only runs locally.

use std::path::Path;
use std::time::Duration;

use tracing::{error, info};

use crate::stage::config::StageConfig;
use crate::stage::context::ExecutionMode;
use crate::stage::runner::StageRunner;

/// Status of one stage within a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Stage completed and wrote its output file.
    Completed,
    /// Stage aborted; no output file was produced.
    Failed,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::Completed => write!(f, "completed"),
            ExecutionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Record of one stage execution within a pipeline run.
#[derive(Debug)]
pub struct StageExecution {
    /// Name of the stage.
    pub stage: String,
    /// Final status.
    pub status: ExecutionStatus,
    /// Wall-clock duration of the stage.
    pub duration: Duration,
    /// Rows written, for completed stages.
    pub rows_written: Option<usize>,
    /// Error message, for failed stages.
    pub error: Option<String>,
}

/// An ordered chain of stage runners.
pub struct Pipeline {
    runners: Vec<StageRunner>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            runners: Vec::new(),
        }
    }

    /// The standard chain: preprocess, predict, postprocess, each with the
    /// identity transform.
    pub fn standard() -> Self {
        Self::new()
            .with_stage(StageRunner::new(StageConfig::preprocess()))
            .with_stage(StageRunner::new(StageConfig::predict()))
            .with_stage(StageRunner::new(StageConfig::postprocess()))
    }

    /// Appends a stage to the chain.
    pub fn with_stage(mut self, runner: StageRunner) -> Self {
        self.runners.push(runner);
        self
    }

    /// Number of stages in the chain.
    pub fn stage_count(&self) -> usize {
        self.runners.len()
    }

    /// Runs the chain in strict sequence over one shared directory.
    ///
    /// Returns one execution record per attempted stage. The chain stops at
    /// the first failure, so a failed record is always the last one.
    pub fn run_local(&self, base_path: &Path) -> Vec<StageExecution> {
        let mode = ExecutionMode::Local(base_path.to_path_buf());
        let mut executions = Vec::with_capacity(self.runners.len());

        for runner in &self.runners {
            let stage = runner.config().name.clone();
            match runner.run(&mode) {
                Ok(report) => {
                    info!(
                        stage = %stage,
                        rows = report.rows_written,
                        duration_ms = report.duration.as_millis() as u64,
                        "stage completed"
                    );
                    executions.push(StageExecution {
                        stage,
                        status: ExecutionStatus::Completed,
                        duration: report.duration,
                        rows_written: Some(report.rows_written),
                        error: None,
                    });
                }
                Err(e) => {
                    error!(stage = %stage, error = %e, "stage failed, aborting pipeline");
                    executions.push(StageExecution {
                        stage,
                        status: ExecutionStatus::Failed,
                        duration: Duration::ZERO,
                        rows_written: None,
                        error: Some(e.to_string()),
                    });
                    break;
                }
            }
        }

        executions
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use crate::transform::FnTransform;
    use std::fs;

    #[test]
    fn test_standard_pipeline_chains_three_stages() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("pre_processing_input.csv"),
            "id,val\n1,10\n2,20\n",
        )
        .expect("write fixture");

        let executions = Pipeline::standard().run_local(dir.path());

        assert_eq!(executions.len(), 3);
        assert!(executions
            .iter()
            .all(|e| e.status == ExecutionStatus::Completed));
        // Each stage left its output file behind.
        assert!(dir.path().join("predictions_input.csv").is_file());
        assert!(dir.path().join("predictions_output.csv").is_file());
        assert!(dir.path().join("final_output.csv").is_file());

        let final_output =
            fs::read_to_string(dir.path().join("final_output.csv")).expect("final output");
        assert_eq!(final_output, "id,val\n1,10\n2,20\n");
    }

    #[test]
    fn test_pipeline_stops_at_first_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        // No input file seeded: the first stage fails, the rest never run.
        let executions = Pipeline::standard().run_local(dir.path());

        assert_eq!(executions.len(), 1);
        assert_eq!(executions[0].stage, "preprocess");
        assert_eq!(executions[0].status, ExecutionStatus::Failed);
        assert!(executions[0].error.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn test_pipeline_failure_mid_chain() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("pre_processing_input.csv"),
            "id,val\n1,10\n",
        )
        .expect("write fixture");

        let pipeline = Pipeline::new()
            .with_stage(StageRunner::new(StageConfig::preprocess()))
            .with_stage(StageRunner::with_transform(
                StageConfig::predict(),
                Box::new(FnTransform::new("reject", |_| {
                    Err(TransformError::failed("reject", "no"))
                })),
            ))
            .with_stage(StageRunner::new(StageConfig::postprocess()));

        let executions = pipeline.run_local(dir.path());

        assert_eq!(executions.len(), 2);
        assert_eq!(executions[0].status, ExecutionStatus::Completed);
        assert_eq!(executions[1].status, ExecutionStatus::Failed);
        assert!(!dir.path().join("predictions_output.csv").exists());
    }

    #[test]
    fn test_execution_status_display() {
        assert_eq!(ExecutionStatus::Completed.to_string(), "completed");
        assert_eq!(ExecutionStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_empty_pipeline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let executions = Pipeline::new().run_local(dir.path());
        assert!(executions.is_empty());
    }
}
