use anyhow::Result;
use tracing::info;

use crate::error::AnalysisError;
use crate::llm::{ChatCompletion, build_ticker_prompt};

/// Ask the text-generation service for a company's ticker
///
/// The answer is a best-effort guess; nothing here checks that it is a real
/// listing. A missing transcript for the guessed ticker is reported downstream.
pub async fn resolve_ticker<C: ChatCompletion>(client: &C, company_name: &str) -> Result<String> {
    let prompt = build_ticker_prompt(company_name);
    let reply = client.complete(None, &prompt).await?;

    let ticker = normalize_ticker(&reply).ok_or_else(|| AnalysisError::EmptyTicker {
        company: company_name.to_string(),
    })?;

    info!("Resolved '{}' to ticker {}", company_name, ticker);
    Ok(ticker)
}

/// Clean up a model reply into a bare upper-case symbol
pub fn normalize_ticker(reply: &str) -> Option<String> {
    let first_line = reply.lines().map(str::trim).find(|l| !l.is_empty())?;
    let cleaned = first_line
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.' || c == '*')
        .trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedReply(&'static str);

    impl ChatCompletion for CannedReply {
        async fn complete(&self, system: Option<&str>, _user: &str) -> Result<String> {
            assert!(system.is_none());
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_normalize_ticker() {
        assert_eq!(normalize_ticker(" ba \n"), Some("BA".to_string()));
        assert_eq!(normalize_ticker("`MSFT`."), Some("MSFT".to_string()));
        assert_eq!(normalize_ticker("\"brk-b\""), Some("BRK-B".to_string()));
        assert_eq!(normalize_ticker("\n\n  "), None);
        assert_eq!(normalize_ticker("``"), None);
    }

    #[tokio::test]
    async fn test_resolve_ticker() {
        let ticker = resolve_ticker(&CannedReply("aapl"), "Apple").await.unwrap();
        assert_eq!(ticker, "AAPL");
    }

    #[tokio::test]
    async fn test_resolve_ticker_empty_reply() {
        for reply in ["''", ""] {
            let err = resolve_ticker(&CannedReply(reply), "Nobody Inc").await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<AnalysisError>(),
                Some(AnalysisError::EmptyTicker { .. })
            ));
        }
    }
}
