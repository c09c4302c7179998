//! CLI command definitions for pipestage.
//!
//! Each built-in stage gets its own subcommand carrying the historical
//! positional invocation contract: a leading `local` token selects local
//! mode and makes the following base path mandatory; any other (or absent)
//! token selects the platform mount paths.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use crate::stage::{ExecutionStatus, Pipeline, StageConfig, StageRunner};

/// Run batch pipeline stages over CSV datasets.
#[derive(Parser)]
#[command(name = "pipestage")]
#[command(about = "Run batch pipeline stages over CSV datasets")]
#[command(version)]
#[command(
    long_about = "pipestage runs the stages of a batch CSV pipeline: each stage reads one input file, applies its transform, and writes one output file.\n\nWithout arguments a stage uses the platform mount paths of the hosting environment; pass 'local <dir>' to read and write under a single directory instead.\n\nExample usage:\n  pipestage predict local /tmp/work\n  pipestage run-all /tmp/work"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the preprocessing stage.
    #[command(alias = "pre")]
    Preprocess(PreprocessArgs),

    /// Run the inference stage.
    Predict(StageCommandArgs),

    /// Run the postprocessing stage.
    #[command(alias = "post")]
    Postprocess(StageCommandArgs),

    /// Run preprocess, predict and postprocess in sequence over one
    /// directory, chained by their file names.
    #[command(name = "run-all")]
    RunAll(RunAllArgs),
}

/// Positional invocation arguments shared by every stage subcommand.
#[derive(Parser, Debug)]
pub struct StageCommandArgs {
    /// Execution mode: "local" reads and writes under BASE_PATH; anything
    /// else (or nothing) uses the platform mount paths.
    pub mode: Option<String>,

    /// Shared input/output directory, required when MODE is "local".
    pub base_path: Option<String>,

    /// Stage definition file (JSON) overriding the built-in configuration.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `pipestage preprocess`.
#[derive(Parser, Debug)]
pub struct PreprocessArgs {
    #[command(flatten)]
    pub stage: StageCommandArgs,

    /// Use the training-job mount paths instead of the processing-job paths.
    #[arg(long)]
    pub training: bool,
}

/// Arguments for `pipestage run-all`.
#[derive(Parser, Debug)]
pub struct RunAllArgs {
    /// Shared directory seeded with the first stage's input file.
    pub base_path: PathBuf,
}

/// Parse CLI arguments without running a command.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
///
/// This is a convenience function that parses CLI args and runs the command.
/// For more control over logging initialization, use `parse_cli()` and
/// `run_with_cli()`.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli())
}

/// Run the CLI with the parsed arguments.
///
/// This is the main entry point for the pipestage CLI.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Preprocess(args) => {
            let builtin = if args.training {
                StageConfig::preprocess_training()
            } else {
                StageConfig::preprocess()
            };
            run_stage_command(builtin, &args.stage)
        }
        Commands::Predict(args) => run_stage_command(StageConfig::predict(), &args),
        Commands::Postprocess(args) => run_stage_command(StageConfig::postprocess(), &args),
        Commands::RunAll(args) => run_all_command(&args),
    }
}

fn run_stage_command(builtin: StageConfig, args: &StageCommandArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => StageConfig::from_file(path)?,
        None => builtin,
    };

    let runner = StageRunner::new(config);
    let report = runner.run_with_args(&invocation_args(args))?;

    info!(
        stage = %report.stage,
        rows = report.rows_written,
        output = %report.output_path.display(),
        duration_ms = report.duration.as_millis() as u64,
        "stage completed"
    );
    Ok(())
}

fn run_all_command(args: &RunAllArgs) -> anyhow::Result<()> {
    let executions = Pipeline::standard().run_local(&args.base_path);

    for execution in &executions {
        info!(
            stage = %execution.stage,
            status = %execution.status,
            "pipeline stage finished"
        );
    }

    if let Some(failed) = executions
        .iter()
        .find(|e| e.status == ExecutionStatus::Failed)
    {
        anyhow::bail!(
            "stage '{}' failed: {}",
            failed.stage,
            failed.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

/// Rebuilds the positional argument sequence of the invocation contract.
fn invocation_args(args: &StageCommandArgs) -> Vec<String> {
    args.mode
        .iter()
        .chain(args.base_path.iter())
        .cloned()
        .collect()
}
