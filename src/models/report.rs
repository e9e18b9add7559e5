use serde::{Deserialize, Serialize};

use super::Finding;

/// One row of the "Summary" sheet
///
/// Field names follow the persisted column headers so the same struct is used
/// for writing a report and for reading it back during a merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Quarter")]
    pub quarter: u8,
    /// Date string as returned by the transcript source
    #[serde(rename = "Transcript Date")]
    pub transcript_date: String,
    #[serde(rename = "Evasiveness Score")]
    pub score: f64,
    /// Closing price near the transcript date; `None` when no trading data was found
    #[serde(rename = "Share Price")]
    pub share_price: Option<f64>,
}

/// Result of one company/year/quarter analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub findings: Vec<Finding>,
}

impl Report {
    /// Stem used for the persisted bundle, e.g. `BA_Q2_2024`
    pub fn file_stem(&self) -> String {
        format!(
            "{}_Q{}_{}",
            self.summary.ticker, self.summary.quarter, self.summary.year
        )
    }
}
