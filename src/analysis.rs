use anyhow::Result;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::llm::ChatCompletion;
use crate::market::{PriceSource, TranscriptSource, resolve_ticker};
use crate::models::Report;
use crate::stages::{
    ClassifyConfig, ReportInput, assemble_report, classify_turns, evasiveness_score,
    parse_transcript_date, segment_transcript, validate_period,
};

/// What the operator asked to analyze
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub company: String,
    pub year: i32,
    pub quarter: u8,
}

/// A finished report plus run statistics
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    /// Management turns considered
    pub total_statements: usize,
    /// Batches sent to the classifier
    pub batches: usize,
    /// Batches skipped after failing
    pub failed_batches: Vec<usize>,
}

impl From<&AnalysisConfig> for ClassifyConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            batch_size: config.batch_size,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
            batch_timeout: config.batch_timeout,
        }
    }
}

/// Analyze one company/year/quarter end to end
///
/// Ticker resolution and transcript fetch are single-shot and fail the run.
/// Classification batches and the price lookup recover locally.
pub async fn run_analysis<C, T, P>(
    chat: &C,
    transcripts: &T,
    prices: &P,
    request: &AnalysisRequest,
    config: &AnalysisConfig,
) -> Result<AnalysisOutcome>
where
    C: ChatCompletion,
    T: TranscriptSource,
    P: PriceSource,
{
    let company = request.company.trim();
    if company.is_empty() {
        return Err(AnalysisError::MissingCompanyName.into());
    }
    validate_period(request.year, request.quarter, config)?;

    let ticker = resolve_ticker(chat, company).await?;

    info!(
        "Fetching transcript for {} Q{} {}",
        ticker, request.quarter, request.year
    );
    let transcript = transcripts
        .fetch_transcript(&ticker, request.year, request.quarter)
        .await?
        .ok_or_else(|| AnalysisError::TranscriptNotFound {
            ticker: ticker.clone(),
            year: request.year,
            quarter: request.quarter,
        })?;

    let turns = segment_transcript(&transcript.content);
    info!(
        "Transcript dated {}: {} management turns",
        transcript.date,
        turns.len()
    );

    let classification = classify_turns(chat, &turns, &ClassifyConfig::from(config)).await;
    if !classification.failed_batches.is_empty() {
        warn!(
            "{} of {} batches failed; score uses the remaining findings",
            classification.failed_batches.len(),
            classification.batches
        );
    }

    let score = evasiveness_score(&classification.findings, classification.total_statements);
    info!(
        "Score {:.2} from {} findings over {} statements",
        score,
        classification.findings.len(),
        classification.total_statements
    );

    let share_price = lookup_price(prices, &ticker, &transcript.date, config).await;

    let report = assemble_report(
        ReportInput {
            company: company.to_string(),
            ticker,
            year: request.year,
            quarter: request.quarter,
            transcript_date: transcript.date,
            score,
            share_price,
            findings: classification.findings,
        },
        config,
    )?;

    Ok(AnalysisOutcome {
        report,
        total_statements: classification.total_statements,
        batches: classification.batches,
        failed_batches: classification.failed_batches,
    })
}

/// Closing price near the transcript date; any failure is a miss
async fn lookup_price<P: PriceSource>(
    prices: &P,
    ticker: &str,
    transcript_date: &str,
    config: &AnalysisConfig,
) -> Option<f64> {
    let Some(date) = parse_transcript_date(transcript_date) else {
        warn!("Cannot look up price: unparseable transcript date '{}'", transcript_date);
        return None;
    };

    match prices
        .fetch_price(ticker, date.date(), config.price_lookback_days)
        .await
    {
        Ok(Some(price)) => Some(price),
        Ok(None) => {
            warn!(
                "No trading data for {} within {} days before {}",
                ticker,
                config.price_lookback_days,
                date.date()
            );
            None
        }
        Err(e) => {
            warn!("Price lookup for {} failed: {}", ticker, e);
            None
        }
    }
}
