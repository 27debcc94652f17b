// src/config.rs

//! Resolved invocation configuration: the task identity handed down by the
//! scheduler's environment, plus the stats-file path derived from CLI
//! arguments.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::CliArgs;

pub const JOB_ID_VAR: &str = "SLURM_ARRAY_JOB_ID";
pub const TASK_ID_VAR: &str = "SLURM_ARRAY_TASK_ID";

/// Which array task this invocation is responsible for.
///
/// `task_id` is a zero-based ordinal into the job file. Slurm calls
/// individual job array indices "tasks".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIdentity {
    pub job_id: u64,
    pub task_id: u64,
}

/// Read the task identity from the environment.
///
/// A missing or non-numeric value is a fatal configuration error; nothing is
/// recorded for the invocation in that case.
pub fn identity_from_env() -> Result<TaskIdentity> {
    Ok(TaskIdentity {
        job_id: numeric_env(JOB_ID_VAR)?,
        task_id: numeric_env(TASK_ID_VAR)?,
    })
}

fn numeric_env(var: &str) -> Result<u64> {
    let raw = std::env::var(var)
        .with_context(|| format!("reading required environment variable {var}"))?;
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("parsing {var}={raw:?} as a non-negative integer"))
}

/// Fully resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub job_file: PathBuf,
    pub identity: TaskIdentity,
    pub stats_path: PathBuf,
    pub suppress_stats: bool,
}

impl Config {
    /// Combine CLI arguments and the task identity into a usable configuration.
    pub fn resolve(args: &CliArgs, identity: TaskIdentity) -> Config {
        Config {
            job_file: PathBuf::from(&args.job_file),
            identity,
            stats_path: resolve_stats_path(&args.status_dir, &args.stats_file, identity.job_id),
            suppress_stats: args.suppress_stats_file,
        }
    }
}

/// Derive the stats-file path from its template.
///
/// The `.tsv` suffix is enforced first, then the `%j` token is substituted
/// with the array job id, then the name is joined onto the status directory.
pub fn resolve_stats_path(status_dir: &str, template: &str, job_id: u64) -> PathBuf {
    let mut name = template.to_string();
    if !name.ends_with(".tsv") {
        name.push_str(".tsv");
    }
    let name = name.replace("%j", &job_id.to_string());
    PathBuf::from(status_dir).join(name)
}
