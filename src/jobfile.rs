// src/jobfile.rs

//! Sequential line extraction from the job file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Return the trimmed content of the zero-indexed line `tid` of the file at
/// `path`, or `None` if the file has fewer than `tid + 1` lines.
///
/// The file is scanned sequentially and never materialized whole, so job
/// files with very large line counts are fine. A missing or unreadable file
/// is an error, distinct from the recoverable "line not found" case.
pub fn command_for_task(path: impl AsRef<Path>, tid: u64) -> Result<Option<String>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("opening job file at {:?}", path))?;
    let reader = BufReader::new(file);

    for (i, line_res) in reader.lines().enumerate() {
        let line = line_res
            .with_context(|| format!("reading line {} of job file {:?}", i, path))?;
        if i as u64 == tid {
            debug!(tid, "found job line");
            return Ok(Some(line.trim().to_string()));
        }
    }

    Ok(None)
}
