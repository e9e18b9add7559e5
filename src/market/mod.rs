pub mod fmp;
pub mod ticker;

use std::future::Future;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use fmp::*;
pub use ticker::*;

/// An earnings call transcript as returned by the transcript source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Raw transcript text, one speaker turn per line
    pub content: String,
    /// Call date as reported by the source (e.g. "2024-07-31 10:30:00")
    pub date: String,
}

/// Source of earnings call transcripts
pub trait TranscriptSource {
    /// Fetch the transcript for a period; `Ok(None)` when none exists
    fn fetch_transcript(
        &self,
        ticker: &str,
        year: i32,
        quarter: u8,
    ) -> impl Future<Output = Result<Option<Transcript>>> + Send;
}

/// Source of historical closing prices
pub trait PriceSource {
    /// Most recent close on or before `date`, looking back `lookback_days`
    fn fetch_price(
        &self,
        ticker: &str,
        date: NaiveDate,
        lookback_days: i64,
    ) -> impl Future<Output = Result<Option<f64>>> + Send;
}
