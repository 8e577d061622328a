//! Date-filtered extraction from the shared source log
//!
//! This is the leaf operation of the crate: read `application.log` from the
//! configured directory and write every line prefixed by the requested date
//! string to a per-date output file. It has no concurrency of its own; the
//! task service runs it on a blocking worker.

use crate::config::COMMON_LOG_NAME;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File name of the output file for a given date
///
/// The convention is `application.log.<date>.log`, e.g.
/// `application.log.2023-12-01.log`.
pub fn filtered_file_name(date: &str) -> String {
    format!("{COMMON_LOG_NAME}.{date}.log")
}

/// Produce a date-filtered copy of the shared source log
///
/// Scans `<log_dir>/application.log` line by line and writes every line that
/// starts with the literal `date` string, in original order, to
/// `<log_dir>/application.log.<date>.log`. Any existing output file for the
/// same date is overwritten.
///
/// The match is a plain prefix comparison, not a calendar check; a malformed
/// date simply matches nothing. An empty match set is not an error and
/// yields a zero-length output file. For an unchanged source the operation
/// is idempotent: re-running it produces byte-identical output.
///
/// # Errors
///
/// Returns [`Error::SourceLogMissing`] if the source log does not exist and
/// [`Error::Io`] for any other filesystem failure.
pub fn extract(log_dir: &Path, date: &str) -> Result<PathBuf> {
    let source_path = log_dir.join(COMMON_LOG_NAME);
    if !source_path.exists() {
        return Err(Error::SourceLogMissing { path: source_path });
    }

    let reader = BufReader::new(File::open(&source_path)?);

    // Accumulate matches and write them in one go so that concurrent
    // extractions for the same date never interleave partial lines.
    let mut matched = String::new();
    for line in reader.lines() {
        let line = line?;
        if line.starts_with(date) {
            matched.push_str(&line);
            matched.push('\n');
        }
    }

    let output_path = log_dir.join(filtered_file_name(date));
    fs::write(&output_path, matched)?;

    tracing::debug!(
        date = %date,
        output = %output_path.display(),
        "Extraction finished"
    );

    Ok(output_path)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_source_log(dir: &Path, contents: &str) {
        fs::write(dir.join(COMMON_LOG_NAME), contents).unwrap();
    }

    #[test]
    fn test_filtered_file_name_convention() {
        assert_eq!(
            filtered_file_name("2023-12-01"),
            "application.log.2023-12-01.log"
        );
    }

    #[test]
    fn test_extract_keeps_only_matching_lines_in_order() {
        let dir = tempdir().unwrap();
        write_source_log(
            dir.path(),
            "2023-12-01 A\n2023-12-02 B\n2023-12-01 C\n",
        );

        let path = extract(dir.path(), "2023-12-01").unwrap();

        assert_eq!(path, dir.path().join("application.log.2023-12-01.log"));
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "2023-12-01 A\n2023-12-01 C\n");
    }

    #[test]
    fn test_extract_single_matching_line() {
        let dir = tempdir().unwrap();
        write_source_log(dir.path(), "2023-12-01 A\n2023-12-02 B\n");

        let path = extract(dir.path(), "2023-12-01").unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "2023-12-01 A\n");
    }

    #[test]
    fn test_extract_missing_source_log() {
        let dir = tempdir().unwrap();

        let err = extract(dir.path(), "2023-12-01").unwrap_err();

        match err {
            Error::SourceLogMissing { path } => {
                assert!(path.ends_with(COMMON_LOG_NAME));
            }
            other => panic!("expected SourceLogMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_no_matches_produces_empty_file() {
        let dir = tempdir().unwrap();
        write_source_log(dir.path(), "2023-12-01 A\n2023-12-02 B\n");

        // Dates far in the future match no lines but still succeed. The
        // zero-length output is deliberate: it records that the extraction
        // ran and found nothing.
        let path = extract(dir.path(), "2099-01-01").unwrap();

        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let dir = tempdir().unwrap();
        write_source_log(dir.path(), "2023-12-01 A\n2023-12-01 B\n2023-12-02 C\n");

        let first = extract(dir.path(), "2023-12-01").unwrap();
        let first_bytes = fs::read(&first).unwrap();

        let second = extract(dir.path(), "2023-12-01").unwrap();
        let second_bytes = fs::read(&second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_extract_overwrites_previous_output() {
        let dir = tempdir().unwrap();
        write_source_log(dir.path(), "2023-12-01 A\n");

        extract(dir.path(), "2023-12-01").unwrap();

        // Source changes; a fresh run must fully replace the old output.
        write_source_log(dir.path(), "2023-12-01 B\n");
        let path = extract(dir.path(), "2023-12-01").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "2023-12-01 B\n");
    }

    #[test]
    fn test_extract_prefix_match_is_literal() {
        let dir = tempdir().unwrap();
        // A line merely containing the date mid-string must not match.
        write_source_log(
            dir.path(),
            "2023-12-01 A\nnoise 2023-12-01 B\n2023-12-010 C\n",
        );

        let path = extract(dir.path(), "2023-12-01").unwrap();

        // "2023-12-010 C" matches too: prefix comparison is byte-literal,
        // not date-aware.
        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(contents, "2023-12-01 A\n2023-12-010 C\n");
    }
}
