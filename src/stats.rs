// src/stats.rs

//! Per-invocation execution record and the append-only TSV status file.
//!
//! Columns, in order: `Array_Task_ID`, `Exit_Code`, `Hostname`, `T_Start`,
//! `T_End`, `T_Elapsed`, `Task`. No header row. Each invocation appends
//! exactly one row; sibling tasks in the same array may share one file, which
//! is safe because every writer performs a single append-mode write of its
//! own line.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::debug;

const TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything recorded about one invocation.
#[derive(Debug, Clone)]
pub struct ExecutionRecord {
    pub task_id: u64,
    pub exit_code: i32,
    pub hostname: String,
    pub started: DateTime<Local>,
    pub finished: DateTime<Local>,
    pub command: String,
}

impl ExecutionRecord {
    /// Format the record as its single tab-separated row (no trailing newline).
    pub fn tsv_row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{:.2}\t{}",
            self.task_id,
            self.exit_code,
            self.hostname,
            self.started.format(TIME_FMT),
            self.finished.format(TIME_FMT),
            self.elapsed_seconds(),
            self.command,
        )
    }

    /// Wall-clock duration of the child in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        (self.finished - self.started).num_milliseconds() as f64 / 1000.0
    }
}

/// Name of the host this task ran on, best effort.
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Append one record to the stats file, creating the file if absent.
///
/// The file is opened in append mode and the row is written with a single
/// `writeln!`, so concurrent appends from sibling tasks don't require any
/// locking.
pub fn append_record(path: impl AsRef<Path>, record: &ExecutionRecord) -> Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening stats file at {:?}", path))?;

    writeln!(file, "{}", record.tsv_row())
        .with_context(|| format!("appending stats row to {:?}", path))?;

    debug!(path = ?path, "stats row appended");
    Ok(())
}
