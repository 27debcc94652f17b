// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `jobstep`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobstep",
    version,
    about = "Run one line of a job file as this array task and record its exit status.",
    long_about = "Wrapper to run job arrays from job files, where each line in the \
plain-text file is a self-contained job. Usually called from a generated batch \
submission script, once per array task."
)]
pub struct CliArgs {
    /// Job file, one job per line (not your job submission script).
    #[arg(long, value_name = "PATH")]
    pub job_file: String,

    /// Don't save job stats to the stats file.
    #[arg(long)]
    pub suppress_stats_file: bool,

    /// Directory to save the stats file to. Defaults to working directory.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub status_dir: String,

    /// Filename of the stats file; `%j` is replaced by the array job id.
    #[arg(long, value_name = "FILE", default_value = "job_%j_status.tsv")]
    pub stats_file: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBSTEP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
