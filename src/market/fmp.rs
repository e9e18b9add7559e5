use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::{PriceSource, Transcript, TranscriptSource};
use crate::config::{env_or, http_timeout_from_env, require_env};

const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// Configuration for the Financial Modeling Prep client
#[derive(Debug, Clone)]
pub struct FmpConfig {
    /// API key (from FMP_API_KEY env var)
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl FmpConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require_env("FMP_API_KEY")?,
            base_url: env_or("FMP_BASE_URL", DEFAULT_BASE_URL),
            timeout: http_timeout_from_env()?,
        })
    }

    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Financial Modeling Prep API client for transcripts and prices
pub struct FmpClient {
    client: Client,
    config: FmpConfig,
}

impl FmpClient {
    pub fn new(config: FmpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    async fn get_transcript(&self, ticker: &str, year: i32, quarter: u8) -> Result<Option<Transcript>> {
        let response = self
            .client
            .get(self.config.url(&format!("earning_call_transcript/{}", ticker)))
            .query(&[
                ("year", year.to_string()),
                ("quarter", quarter.to_string()),
                ("apikey", self.config.api_key.clone()),
            ])
            .send()
            .await
            .context("Failed to send transcript request")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Transcript API error: {} - {}", status, body);
        }

        let entries: Vec<TranscriptEntry> = response
            .json()
            .await
            .context("Failed to parse transcript response")?;

        Ok(entries.into_iter().next().map(|e| Transcript {
            content: e.content,
            date: e.date,
        }))
    }

    async fn get_price(&self, ticker: &str, date: NaiveDate, lookback_days: i64) -> Result<Option<f64>> {
        let from = date - chrono::Duration::days(lookback_days);

        let response = self
            .client
            .get(self.config.url(&format!("historical-price-full/{}", ticker)))
            .query(&[
                ("from", from.format("%Y-%m-%d").to_string()),
                ("to", date.format("%Y-%m-%d").to_string()),
                ("apikey", self.config.api_key.clone()),
            ])
            .send()
            .await
            .context("Failed to send price request")?;

        if !response.status().is_success() {
            anyhow::bail!("Price API error: {}", response.status());
        }

        let history: PriceHistory = response
            .json()
            .await
            .context("Failed to parse price response")?;

        debug!("{} price rows for {} up to {}", history.historical.len(), ticker, date);
        Ok(latest_close_on_or_before(&history.historical, date))
    }
}

impl TranscriptSource for FmpClient {
    async fn fetch_transcript(&self, ticker: &str, year: i32, quarter: u8) -> Result<Option<Transcript>> {
        self.get_transcript(ticker, year, quarter).await
    }
}

impl PriceSource for FmpClient {
    async fn fetch_price(&self, ticker: &str, date: NaiveDate, lookback_days: i64) -> Result<Option<f64>> {
        self.get_price(ticker, date, lookback_days).await
    }
}

/// Pick the close of the latest row dated on or before `end`
///
/// Rows whose date does not parse are ignored.
pub fn latest_close_on_or_before(rows: &[PriceRow], end: NaiveDate) -> Option<f64> {
    rows.iter()
        .filter_map(|row| {
            let day = NaiveDate::parse_from_str(row.date.get(..10)?, "%Y-%m-%d").ok()?;
            (day <= end).then_some((day, row.close))
        })
        .max_by_key(|(day, _)| *day)
        .map(|(_, close)| close)
}

#[derive(Debug, Deserialize)]
struct TranscriptEntry {
    content: String,
    date: String,
}

#[derive(Debug, Deserialize)]
struct PriceHistory {
    #[serde(default)]
    historical: Vec<PriceRow>,
}

/// One daily row of the historical price response
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRow {
    pub date: String,
    pub close: f64,
}
