//! Append-only diagram log on disk.

use super::record::{format_record, parse_record, Record};
use crate::error::{Result, WireError};
use crate::synthetic::{Diagram, Label};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What to do with a malformed line while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Stop at the first malformed line and return its error.
    #[default]
    Abort,
    /// Log a warning, count the line, and keep going.
    Skip,
}

/// Outcome of reading a log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records parsed successfully
    pub loaded: usize,
    /// Malformed lines skipped under [`LoadPolicy::Skip`]
    pub skipped: usize,
}

/// Reads records from any buffered reader. Blank lines are ignored.
///
/// # Errors
///
/// Returns the first I/O error, or under [`LoadPolicy::Abort`] the first
/// parse error annotated with its 1-based line number.
pub fn read_records<R: BufRead>(reader: R, policy: LoadPolicy) -> Result<(Vec<Record>, LoadReport)> {
    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(&line) {
            Ok(record) => records.push(record),
            Err(err) => {
                let err = err.at_line(idx + 1);
                match policy {
                    LoadPolicy::Abort => return Err(err),
                    LoadPolicy::Skip => {
                        warn!(line = idx + 1, error = %err, "skipping malformed diagram record");
                        report.skipped += 1;
                    }
                }
            }
        }
    }

    report.loaded = records.len();
    Ok((records, report))
}

/// Diagram log file. Writes only ever append.
#[derive(Debug, Clone)]
pub struct DiagramLog {
    path: PathBuf,
}

impl DiagramLog {
    /// Refers to the log at `path`; nothing is touched until the first write or read.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_append(&self) -> Result<File> {
        Ok(OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?)
    }

    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened or written.
    pub fn append(&self, diagram: &Diagram, label: Label) -> Result<()> {
        let mut file = self.open_append()?;
        writeln!(file, "{}", format_record(diagram, label))?;
        Ok(())
    }

    /// Appends many records through one buffered handle; returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be opened, written or flushed.
    pub fn append_all<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a (Diagram, Label)>,
    {
        let mut writer = BufWriter::new(self.open_append()?);
        let mut written = 0;
        for (diagram, label) in records {
            writeln!(writer, "{}", format_record(diagram, *label))?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }

    /// Reads every record.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or a `Parse` error per
    /// [`read_records`].
    pub fn read(&self, policy: LoadPolicy) -> Result<(Vec<Record>, LoadReport)> {
        let file = File::open(&self.path).map_err(WireError::from)?;
        let (records, report) = read_records(BufReader::new(file), policy)?;
        info!(
            path = %self.path.display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "read diagram log"
        );
        Ok((records, report))
    }
}
