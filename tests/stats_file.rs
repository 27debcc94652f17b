use std::error::Error;
use std::path::PathBuf;

use chrono::{Duration, Local};
use jobstep::config::resolve_stats_path;
use jobstep::stats::{ExecutionRecord, append_record};

type TestResult = Result<(), Box<dyn Error>>;

fn sample_record() -> ExecutionRecord {
    let started = Local::now();
    ExecutionRecord {
        task_id: 1,
        exit_code: 3,
        hostname: "node042".to_string(),
        started,
        finished: started + Duration::milliseconds(1234),
        command: "exit 3".to_string(),
    }
}

#[test]
fn row_has_fixed_column_order() -> TestResult {
    let record = sample_record();
    let row = record.tsv_row();
    let cols: Vec<&str> = row.split('\t').collect();

    assert_eq!(cols.len(), 7);
    assert_eq!(cols[0], "1");
    assert_eq!(cols[1], "3");
    assert_eq!(cols[2], "node042");
    assert_eq!(cols[5], "1.23");
    assert_eq!(cols[6], "exit 3");

    Ok(())
}

#[test]
fn timestamps_use_human_readable_format() -> TestResult {
    let record = sample_record();
    let row = record.tsv_row();
    let cols: Vec<&str> = row.split('\t').collect();

    // YYYY-MM-DD HH:MM:SS, no sub-second part.
    for col in [cols[3], cols[4]] {
        assert_eq!(col.len(), 19);
        assert_eq!(&col[4..5], "-");
        assert_eq!(&col[10..11], " ");
        assert_eq!(&col[13..14], ":");
    }

    Ok(())
}

#[test]
fn elapsed_is_rendered_with_two_decimals() -> TestResult {
    let started = Local::now();
    let mut record = sample_record();
    record.started = started;
    record.finished = started;
    let row = record.tsv_row();
    assert_eq!(row.split('\t').nth(5), Some("0.00"));

    record.finished = started + Duration::milliseconds(90_500);
    let row = record.tsv_row();
    assert_eq!(row.split('\t').nth(5), Some("90.50"));

    Ok(())
}

#[test]
fn append_creates_file_and_writes_one_line_per_call() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("job_7_status.tsv");

    let record = sample_record();
    append_record(&path, &record)?;

    let contents = std::fs::read_to_string(&path)?;
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.ends_with('\n'));

    // A second invocation appends; it never truncates or rewrites.
    append_record(&path, &record)?;
    let contents = std::fs::read_to_string(&path)?;
    assert_eq!(contents.lines().count(), 2);

    Ok(())
}

#[test]
fn stats_template_substitutes_job_id() {
    let path = resolve_stats_path(".", "job_%j_status.tsv", 12345);
    assert_eq!(path, PathBuf::from("./job_12345_status.tsv"));
}

#[test]
fn stats_template_enforces_tsv_suffix() {
    let path = resolve_stats_path("out", "status_%j", 9);
    assert_eq!(path, PathBuf::from("out/status_9.tsv"));

    // Already-suffixed names are left alone.
    let path = resolve_stats_path("out", "status.tsv", 9);
    assert_eq!(path, PathBuf::from("out/status.tsv"));
}
