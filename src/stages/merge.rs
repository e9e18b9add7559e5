use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::info;

use crate::error::MergeError;
use crate::io::read_summary_rows;
use crate::models::ReportSummary;

/// Date-time layouts accepted for the "Transcript Date" column
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One report summary placed on the timeline
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDateTime,
    pub summary: ReportSummary,
}

/// Report summaries sorted by transcript date ascending
///
/// Equal dates keep their input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

/// Two aligned series for an external plotting tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub dates: Vec<String>,
    pub scores: Vec<f64>,
    pub prices: Vec<Option<f64>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Summaries in timeline order
    pub fn summaries(&self) -> impl Iterator<Item = &ReportSummary> {
        self.points.iter().map(|p| &p.summary)
    }

    /// date -> score and date -> price, index aligned
    pub fn chart_data(&self) -> ChartData {
        ChartData {
            dates: self
                .points
                .iter()
                .map(|p| p.date.format("%Y-%m-%d").to_string())
                .collect(),
            scores: self.points.iter().map(|p| p.summary.score).collect(),
            prices: self.points.iter().map(|p| p.summary.share_price).collect(),
        }
    }
}

/// Parse a transcript date in any of the accepted layouts
pub fn parse_transcript_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.naive_utc()))
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Build a series from summaries already read into memory
///
/// `sources` pairs every summary with the file it came from and its row number
/// for error reporting. Any unparseable date fails the whole merge.
pub fn merge_summaries(
    sources: Vec<(PathBuf, usize, ReportSummary)>,
) -> Result<Series, MergeError> {
    if sources.is_empty() {
        return Err(MergeError::NoInputs);
    }

    let mut points = Vec::with_capacity(sources.len());
    for (path, row, summary) in sources {
        let date = parse_transcript_date(&summary.transcript_date).ok_or_else(|| {
            MergeError::UnparseableDate {
                path,
                row,
                value: summary.transcript_date.clone(),
            }
        })?;
        points.push(SeriesPoint { date, summary });
    }

    // stable
    points.sort_by_key(|p| p.date);

    Ok(Series { points })
}

/// Read the summary sheet of every report and merge them into one series
pub fn merge_reports<P: AsRef<Path>>(paths: &[P]) -> Result<Series, MergeError> {
    if paths.is_empty() {
        return Err(MergeError::NoInputs);
    }

    let mut sources = Vec::new();
    for path in paths {
        let rows = read_summary_rows(path.as_ref())?;
        info!("Read {} summary rows from {:?}", rows.len(), path.as_ref());
        sources.extend(
            rows.into_iter()
                .map(|(row, summary)| (path.as_ref().to_path_buf(), row, summary)),
        );
    }

    let series = merge_summaries(sources)?;
    info!("Merged {} report summaries", series.len());
    Ok(series)
}
