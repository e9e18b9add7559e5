use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::models::{Finding, Report, ReportSummary};

/// Inputs for one report
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub company: String,
    pub ticker: String,
    pub year: i32,
    pub quarter: u8,
    pub transcript_date: String,
    pub score: f64,
    pub share_price: Option<f64>,
    pub findings: Vec<Finding>,
}

/// Check the requested period before any external call is made
pub fn validate_period(year: i32, quarter: u8, config: &AnalysisConfig) -> Result<(), AnalysisError> {
    if year < config.min_year || year > config.max_year {
        return Err(AnalysisError::YearOutOfRange {
            year,
            min: config.min_year,
            max: config.max_year,
        });
    }
    if !(1..=4).contains(&quarter) {
        return Err(AnalysisError::InvalidQuarter(quarter));
    }
    Ok(())
}

/// Join score, price and metadata into one report
pub fn assemble_report(input: ReportInput, config: &AnalysisConfig) -> Result<Report, AnalysisError> {
    validate_period(input.year, input.quarter, config)?;

    Ok(Report {
        summary: ReportSummary {
            company: input.company,
            ticker: input.ticker,
            year: input.year,
            quarter: input.quarter,
            transcript_date: input.transcript_date,
            score: input.score,
            share_price: input.share_price,
        },
        findings: input.findings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn input(year: i32, quarter: u8) -> ReportInput {
        ReportInput {
            company: "Boeing".to_string(),
            ticker: "BA".to_string(),
            year,
            quarter,
            transcript_date: "2024-07-31 10:30:00".to_string(),
            score: 2.5,
            share_price: None,
            findings: vec![Finding::new("We'll see.", Category::Clearly, "Avoids guidance")],
        }
    }

    #[test]
    fn test_assemble_report() {
        let report = assemble_report(input(2024, 2), &AnalysisConfig::default()).unwrap();

        assert_eq!(report.summary.ticker, "BA");
        assert_eq!(report.summary.share_price, None);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.file_stem(), "BA_Q2_2024");
    }

    #[test]
    fn test_rejects_quarter_out_of_range() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            assemble_report(input(2024, 0), &config),
            Err(AnalysisError::InvalidQuarter(0))
        ));
        assert!(matches!(
            assemble_report(input(2024, 5), &config),
            Err(AnalysisError::InvalidQuarter(5))
        ));
    }

    #[test]
    fn test_rejects_year_out_of_range() {
        let config = AnalysisConfig::default();
        assert!(matches!(
            assemble_report(input(2004, 1), &config),
            Err(AnalysisError::YearOutOfRange { year: 2004, .. })
        ));
        assert!(validate_period(2050, 4, &config).is_ok());
        assert!(validate_period(2051, 4, &config).is_err());
    }
}
