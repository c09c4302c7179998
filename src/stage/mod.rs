//! The pipeline stage contract.
//!
//! One stage reads exactly one CSV file, applies its transform exactly once,
//! and writes exactly one CSV file. The module splits that contract into:
//!
//! - **Config**: the injected per-stage value (file names, platform mounts)
//! - **Context**: resolution of local vs. platform execution mode
//! - **Runner**: the I/O boundary executing resolve → read → transform → write
//! - **Orchestrator**: strict-sequence chaining of stages over one directory
//!
//! The four built-in stage definitions live on [`StageConfig`]; the runner
//! itself is stage-agnostic.

pub mod config;
pub mod context;
pub mod orchestrator;
pub mod runner;

// Re-export main types for convenience
pub use config::{ConfigError, StageConfig};
pub use context::{resolve_paths, ExecutionMode, ResolvedPaths};
pub use orchestrator::{ExecutionStatus, Pipeline, StageExecution};
pub use runner::{RunReport, StageRunner};
