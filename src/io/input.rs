use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::Reader;

use super::{STATEMENTS_FILE, SUMMARY_COLUMNS, SUMMARY_FILE};
use crate::error::MergeError;
use crate::models::{Finding, ReportSummary};

/// Read a plain-text transcript from disk
pub fn read_transcript_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Resolve a report path to its summary sheet
///
/// A bundle directory resolves to its `summary.csv`; any other path is taken
/// to be a summary-shaped CSV file (such as a previous merge output).
pub fn summary_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(SUMMARY_FILE)
    } else {
        path.to_path_buf()
    }
}

/// Read every row of a report's summary sheet, numbered from 1
///
/// Every summary column must be present in the header, even when the sheet
/// has no rows.
pub fn read_summary_rows(path: &Path) -> Result<Vec<(usize, ReportSummary)>, MergeError> {
    let path = summary_path(path);
    let mut reader = Reader::from_path(&path).map_err(|source| MergeError::Read {
        path: path.clone(),
        source,
    })?;

    let headers = reader.headers().map_err(|source| MergeError::Read {
        path: path.clone(),
        source,
    })?;
    if let Some(column) = SUMMARY_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h.trim() == **column))
    {
        return Err(MergeError::MissingColumn {
            path,
            column: column.to_string(),
        });
    }

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<ReportSummary>().enumerate() {
        let row = i + 1;
        let summary = record.map_err(|source| MergeError::InvalidRecord {
            path: path.clone(),
            row,
            source,
        })?;
        rows.push((row, summary));
    }

    Ok(rows)
}

/// Read the findings sheet of a report bundle
pub fn read_findings(bundle: &Path) -> Result<Vec<Finding>> {
    let path = bundle.join(STATEMENTS_FILE);
    let mut reader =
        Reader::from_path(&path).with_context(|| format!("Failed to open file: {:?}", path))?;

    reader
        .deserialize()
        .collect::<Result<Vec<Finding>, _>>()
        .with_context(|| format!("Failed to parse findings in {:?}", path))
}
