#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Combines per-day hotspot CSV files into the single table the record
//! store loads.
//!
//! Upstream publishes one CSV per day, sometimes with `", "` between header
//! names. [`combine_csv`] concatenates every `.csv` in a directory in
//! filename order, writes the (normalised) header once, and skips any file
//! whose header disagrees with the first one.

pub mod progress;

use std::fs::{self, File};
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use progress::ProgressCallback;

/// Errors that can occur while combining CSV files.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error (directory listing, file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input directory contains no `.csv` files.
    #[error("No CSV files found in {}", dir.display())]
    NoInputFiles {
        /// The directory that was searched.
        dir: PathBuf,
    },
}

/// Outcome of a [`combine_csv`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    /// Files whose rows were written, in order.
    pub combined: Vec<PathBuf>,
    /// Files skipped because their header did not match.
    pub skipped: Vec<PathBuf>,
    /// Number of data rows written.
    pub rows: u64,
}

/// Normalises a header line: strips a trailing `\r` and the space after
/// each separator.
#[must_use]
pub fn normalize_header(line: &str) -> String {
    line.trim_end_matches('\r').replace(", ", ",")
}

/// Lists `.csv` files in `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the directory cannot be read.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Concatenates every `.csv` file in `input_dir` into `output_file`.
///
/// # Errors
///
/// * [`IngestError::NoInputFiles`] if `input_dir` has no `.csv` files.
/// * [`IngestError::Io`] on any read or write failure.
pub fn combine_csv(
    input_dir: &Path,
    output_file: &Path,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<CombineSummary, IngestError> {
    let files = list_csv_files(input_dir)?;
    if files.is_empty() {
        return Err(IngestError::NoInputFiles {
            dir: input_dir.to_path_buf(),
        });
    }

    log::info!(
        "Combining {} CSV file(s) from {} into {}",
        files.len(),
        input_dir.display(),
        output_file.display()
    );
    progress.set_total(files.len() as u64);

    let mut out = BufWriter::new(File::create(output_file)?);
    let mut header: Option<String> = None;
    let mut summary = CombineSummary {
        combined: Vec::new(),
        skipped: Vec::new(),
        rows: 0,
    };

    for path in files {
        let name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        progress.set_message(name.clone());

        let content = fs::read_to_string(&path)?;
        let (first_line, rows) = content.split_once('\n').unwrap_or((content.as_str(), ""));
        let file_header = normalize_header(first_line);

        match &header {
            None => {
                writeln!(out, "{file_header}")?;
                header = Some(file_header);
            }
            Some(expected) if *expected != file_header => {
                log::warn!("Header mismatch in '{name}', skipping");
                summary.skipped.push(path);
                progress.inc(1);
                continue;
            }
            Some(_) => {}
        }

        if !rows.is_empty() {
            out.write_all(rows.as_bytes())?;
            if !rows.ends_with('\n') {
                out.write_all(b"\n")?;
            }
        }

        summary.rows += rows.lines().filter(|l| !l.trim().is_empty()).count() as u64;
        summary.combined.push(path);
        progress.inc(1);
    }

    out.flush()?;

    log::info!(
        "Combined {} file(s), {} row(s); skipped {}",
        summary.combined.len(),
        summary.rows,
        summary.skipped.len()
    );
    progress.finish(format!(
        "combined {} file(s), {} row(s)",
        summary.combined.len(),
        summary.rows
    ));

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::null_progress;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("hotspot_map_ingest_{}", uuid::Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, content: &str) {
            fs::write(self.0.join(name), content).unwrap();
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            fs::remove_dir_all(&self.0).ok();
        }
    }

    #[test]
    fn normalizes_padded_header() {
        assert_eq!(normalize_header("lat, lon, rep_date\r"), "lat,lon,rep_date");
    }

    #[test]
    fn combines_in_filename_order_and_skips_mismatched_headers() {
        let input = TempDir::new();
        input.write("20240102.csv", "lat,lon\n2,2\n");
        input.write("20240101.csv", "lat, lon\n1,1\n1.5,1.5");
        input.write("20240103.csv", "lat,lon,extra\n3,3,3\n");
        input.write("notes.txt", "ignored");

        let output = TempDir::new();
        let out_file = output.0.join("hotspots.csv");
        let summary = combine_csv(&input.0, &out_file, &null_progress()).unwrap();

        assert_eq!(
            fs::read_to_string(&out_file).unwrap(),
            "lat,lon\n1,1\n1.5,1.5\n2,2\n"
        );
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.combined.len(), 2);
        assert_eq!(summary.skipped, [input.0.join("20240103.csv")]);
    }

    #[test]
    fn header_only_files_contribute_no_rows() {
        let input = TempDir::new();
        input.write("20240101.csv", "lat,lon\n");
        input.write("20240102.csv", "lat,lon\n5,5\n");

        let out_file = input.0.join("combined.out");
        let summary = combine_csv(&input.0, &out_file, &null_progress()).unwrap();

        assert_eq!(fs::read_to_string(&out_file).unwrap(), "lat,lon\n5,5\n");
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn empty_directory_is_an_error() {
        let input = TempDir::new();
        let err = combine_csv(&input.0, &input.0.join("out.csv"), &null_progress()).unwrap_err();
        assert!(matches!(err, IngestError::NoInputFiles { .. }));
    }
}
