use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::Writer;

use super::{STATEMENTS_FILE, SUMMARY_COLUMNS, SUMMARY_FILE};
use crate::models::{Report, ReportSummary};
use crate::stages::ChartData;

/// Write a report as a bundle directory with one CSV file per sheet
///
/// The bundle is `<output_dir>/<TICKER>_Q<quarter>_<year>/` and holds
/// `summary.csv` and `evasive_statements.csv`. Returns the bundle path.
pub fn write_report(report: &Report, output_dir: &Path) -> Result<PathBuf> {
    let bundle = output_dir.join(report.file_stem());
    std::fs::create_dir_all(&bundle)
        .with_context(|| format!("Failed to create report directory: {:?}", bundle))?;

    write_summaries(&bundle.join(SUMMARY_FILE), std::iter::once(&report.summary))?;

    let path = bundle.join(STATEMENTS_FILE);
    let mut writer = Writer::from_path(&path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    if report.findings.is_empty() {
        writer.write_record(["Statement", "Category", "Reason"])?;
    }
    for finding in &report.findings {
        writer.serialize(finding).context("Failed to write finding")?;
    }
    writer.flush()?;

    Ok(bundle)
}

/// Write summary rows with the "Summary" sheet columns
pub fn write_summaries<'a, I>(path: &Path, summaries: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ReportSummary>,
{
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;

    let mut wrote_any = false;
    for summary in summaries {
        writer.serialize(summary).context("Failed to write summary row")?;
        wrote_any = true;
    }
    if !wrote_any {
        writer.write_record(SUMMARY_COLUMNS)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the aligned chart series as JSON
pub fn write_chart_json(chart: &ChartData, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, chart).context("Failed to write JSON")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{read_findings, read_summary_rows};
    use crate::models::{Category, Finding};

    fn report(share_price: Option<f64>, findings: Vec<Finding>) -> Report {
        Report {
            summary: ReportSummary {
                company: "Boeing".to_string(),
                ticker: "BA".to_string(),
                year: 2024,
                quarter: 2,
                transcript_date: "2024-07-31 10:30:00".to_string(),
                score: 2.35,
                share_price,
            },
            findings,
        }
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let findings = vec![
            Finding::new("We don't break that out, \"as you know\".", Category::Clearly, "Refuses, twice"),
            Finding::new("We feel good.", Category::Somewhat, "Generic"),
        ];
        let report = report(Some(182.5), findings.clone());

        let bundle = write_report(&report, dir.path()).unwrap();
        assert_eq!(bundle, dir.path().join("BA_Q2_2024"));

        let rows = read_summary_rows(&bundle).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1, report.summary);

        assert_eq!(read_findings(&bundle).unwrap(), findings);
    }

    #[test]
    fn test_null_price_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let report = report(None, vec![]);

        let bundle = write_report(&report, dir.path()).unwrap();

        let rows = read_summary_rows(&bundle.join(SUMMARY_FILE)).unwrap();
        assert_eq!(rows[0].1.share_price, None);
        assert!(read_findings(&bundle).unwrap().is_empty());
    }

    #[test]
    fn test_write_chart_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        let chart = ChartData {
            dates: vec!["2024-07-31".to_string()],
            scores: vec![2.35],
            prices: vec![None],
        };

        write_chart_json(&chart, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["dates"][0], "2024-07-31");
        assert!(value["prices"][0].is_null());
    }
}
