use std::path::PathBuf;

/// Errors that stop a single analysis run
///
/// Per-batch classification failures and price lookup misses are recovered
/// where they happen and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No company name was supplied
    #[error("company name is required")]
    MissingCompanyName,

    /// The ticker resolver returned nothing usable
    #[error("could not resolve a ticker for '{company}'")]
    EmptyTicker { company: String },

    /// The transcript source has no transcript for the requested period
    #[error("transcript not found for {ticker} Q{quarter} {year}")]
    TranscriptNotFound {
        ticker: String,
        year: i32,
        quarter: u8,
    },

    /// Year outside the configured plausible range
    #[error("year {year} is outside the supported range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    /// Quarter not in 1..=4
    #[error("quarter must be between 1 and 4, got {0}")]
    InvalidQuarter(u8),
}

/// Errors that fail a whole merge operation
///
/// No partial merge is ever produced: the first bad record aborts.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// Nothing to merge
    #[error("no reports supplied to merge")]
    NoInputs,

    /// The summary sheet could not be opened or read
    #[error("failed to read summary from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The summary sheet header lacks a required column
    #[error("summary in {path:?} is missing the '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    /// A row has a missing or invalid value
    #[error("invalid summary record in {path:?} at row {row}: {source}")]
    InvalidRecord {
        path: PathBuf,
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// The transcript date of a row could not be parsed
    #[error("unparseable transcript date '{value}' in {path:?} at row {row}")]
    UnparseableDate {
        path: PathBuf,
        row: usize,
        value: String,
    },
}
