use std::time::Duration;

use anyhow::{Context, Result};

/// Environment variable holding the per-request HTTP timeout in seconds
pub const HTTP_TIMEOUT_ENV: &str = "EVASIVENESS_HTTP_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Tunables for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Number of management turns sent to the classifier per request
    pub batch_size: usize,
    /// Extra attempts per batch after the first failure
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt
    pub retry_backoff: Duration,
    /// Upper bound on a single classification attempt
    pub batch_timeout: Duration,
    /// Earliest accepted year
    pub min_year: i32,
    /// Latest accepted year
    pub max_year: i32,
    /// How far back the price lookup searches for a trading day
    pub price_lookback_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_retries: 1,
            retry_backoff: Duration::from_millis(500),
            batch_timeout: Duration::from_secs(90),
            min_year: 2005,
            max_year: 2050,
            price_lookback_days: 7,
        }
    }
}

/// Load a `.env` file from the working directory if one exists
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!("Failed to load .env file: {}", e);
        }
    }
}

/// Read a required environment variable
pub fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("{} environment variable not set", name))
}

/// Read an optional environment variable, falling back to `default`
pub fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Per-request HTTP timeout shared by all outbound clients
pub fn http_timeout_from_env() -> Result<Duration> {
    match std::env::var(HTTP_TIMEOUT_ENV) {
        Ok(value) => {
            let secs: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", HTTP_TIMEOUT_ENV))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.min_year, 2005);
        assert_eq!(config.max_year, 2050);
        assert_eq!(config.price_lookback_days, 7);
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(
            env_or("EVASIVENESS_TEST_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }
}
