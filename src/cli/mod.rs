//! Command-line interface for pipestage.
//!
//! Provides one subcommand per built-in pipeline stage plus sequential
//! execution of the whole chain.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli, Commands};
