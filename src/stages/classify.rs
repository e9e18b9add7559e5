use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::llm::{ChatCompletion, SYSTEM_PROMPT, build_batch_prompt, parse_reply};
use crate::models::{Finding, SpeakerTurn, TurnBatch, batch_turns};

/// Configuration for batch classification
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Turns per request
    pub batch_size: usize,
    /// Extra attempts per batch after the first failure
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further attempt
    pub retry_backoff: Duration,
    /// Upper bound on one attempt
    pub batch_timeout: Duration,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_retries: 1,
            retry_backoff: Duration::from_millis(500),
            batch_timeout: Duration::from_secs(90),
        }
    }
}

/// Result of classifying every batch of a transcript
#[derive(Debug, Clone, Default)]
pub struct ClassificationResult {
    /// Findings from all successful batches, in batch then reply order
    pub findings: Vec<Finding>,
    /// Number of turns considered, including those judged non-evasive
    pub total_statements: usize,
    /// Number of batches sent
    pub batches: usize,
    /// Indices of batches skipped after their final failed attempt
    pub failed_batches: Vec<usize>,
}

/// Classify management turns in fixed-size batches
///
/// Batches run strictly in sequence. A batch whose call fails on every
/// attempt contributes no findings and is recorded in `failed_batches`;
/// the run always continues with the next batch.
pub async fn classify_turns<C: ChatCompletion>(
    client: &C,
    turns: &[SpeakerTurn],
    config: &ClassifyConfig,
) -> ClassificationResult {
    let batches = batch_turns(turns, config.batch_size);
    let mut result = ClassificationResult {
        total_statements: turns.len(),
        batches: batches.len(),
        ..Default::default()
    };

    info!(
        "Classifying {} turns in {} batches of up to {}",
        turns.len(),
        batches.len(),
        config.batch_size
    );

    for batch in &batches {
        match classify_batch(client, batch, config).await {
            Ok(findings) => {
                info!(
                    "Batch {}: {} evasive of {} statements",
                    batch.batch_id(),
                    findings.len(),
                    batch.len()
                );
                result.findings.extend(findings);
            }
            Err(e) => {
                warn!("Batch {} skipped: {}", batch.batch_id(), e);
                result.failed_batches.push(batch.index);
            }
        }
    }

    result
}

/// Classify a single batch, retrying with backoff on failure
async fn classify_batch<C: ChatCompletion>(
    client: &C,
    batch: &TurnBatch<'_>,
    config: &ClassifyConfig,
) -> Result<Vec<Finding>> {
    let prompt = build_batch_prompt(batch.turns);
    let mut backoff = config.retry_backoff;
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            info!(
                "Batch {}: retry {} of {}",
                batch.batch_id(),
                attempt,
                config.max_retries
            );
            tokio::time::sleep(backoff).await;
            backoff = backoff.saturating_mul(2);
        }

        let call = client.complete(Some(SYSTEM_PROMPT), &prompt);
        match tokio::time::timeout(config.batch_timeout, call).await {
            Ok(Ok(reply)) => {
                let findings = parse_reply(&reply);
                debug!(
                    "Batch {}: parsed {} findings from {} reply chars",
                    batch.batch_id(),
                    findings.len(),
                    reply.len()
                );
                return Ok(findings);
            }
            Ok(Err(e)) => {
                warn!("Batch {} attempt {} failed: {}", batch.batch_id(), attempt + 1, e);
                last_error = Some(e);
            }
            Err(_) => {
                warn!(
                    "Batch {} attempt {} timed out after {:?}",
                    batch.batch_id(),
                    attempt + 1,
                    config.batch_timeout
                );
                last_error = Some(anyhow::anyhow!(
                    "timed out after {:?}",
                    config.batch_timeout
                ));
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown error")))
}
