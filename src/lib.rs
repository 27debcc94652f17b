// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod jobfile;
pub mod logging;
pub mod stats;

use chrono::Local;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::Config;
use crate::errors::Result;
use crate::stats::ExecutionRecord;

/// Exit code reported when the requested task index has no line in the job
/// file.
pub const LOOKUP_FAILURE_CODE: i32 = 1;

/// High-level entry point used by `main.rs`.
///
/// Resolves the task identity from the environment, then runs the invocation
/// state machine in [`run_task`]. Returns the exit code the overall process
/// should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let identity = config::identity_from_env()?;
    let cfg = Config::resolve(&args, identity);
    debug!(?cfg, "resolved configuration");
    run_task(&cfg).await
}

/// Run one array task to completion:
///
/// - look up the command for this task's index in the job file,
/// - execute it under the shell with signal relay, timing it,
/// - append one stats row (unless suppressed),
/// - return the exit code to propagate.
///
/// A missing line is recoverable: it still yields a stats row, with exit
/// code 1 and a diagnostic in the command column, and the diagnostic goes to
/// stderr. Everything else that goes wrong (unreadable job file, missing
/// identity, failed spawn) is fatal and produces no row.
pub async fn run_task(cfg: &Config) -> Result<i32> {
    let tid = cfg.identity.task_id;

    let lookup = jobfile::command_for_task(&cfg.job_file, tid)?;

    let started = Local::now();
    let (exit_code, command) = match lookup {
        Some(cmd) => {
            let code = exec::run_command(&cmd).await?;
            (code, cmd)
        }
        None => {
            let diagnostic = format!(
                "# could not find zero-indexed line {} in job file {}",
                tid,
                cfg.job_file.display()
            );
            eprintln!("{diagnostic}");
            (LOOKUP_FAILURE_CODE, diagnostic)
        }
    };
    let finished = Local::now();

    if !cfg.suppress_stats {
        let record = ExecutionRecord {
            task_id: tid,
            exit_code,
            hostname: stats::local_hostname(),
            started,
            finished,
            command,
        };
        stats::append_record(&cfg.stats_path, &record)?;
    }

    info!(tid, exit_code, "task finished");
    Ok(exit_code)
}
