use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use evasiveness::config::load_dotenv;
use evasiveness::models::batch_turns;
use evasiveness::{
    AnalysisConfig, AnalysisRequest, ChatClient, ChatConfig, FmpClient, FmpConfig, Report,
    merge_reports, read_transcript_file, run_analysis, segment_transcript, write_chart_json,
    write_report, write_summaries,
};

#[derive(Parser)]
#[command(name = "evasiveness")]
#[command(author, version, about = "Management evasiveness scoring for earnings calls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one quarter's earnings call and write a report bundle
    Analyze {
        /// Company name (e.g., Boeing)
        #[arg(short, long)]
        company: String,

        /// Fiscal year of the call
        #[arg(short, long)]
        year: i32,

        /// Fiscal quarter (1-4)
        #[arg(short, long)]
        quarter: u8,

        /// Directory the report bundle is written under
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Management turns per classification request
        #[arg(long, default_value = "20")]
        batch_size: usize,

        /// Retries per failed classification batch
        #[arg(long, default_value = "1")]
        max_retries: u32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Merge report summaries into one date-sorted series
    Merge {
        /// Report bundle directories or summary CSV files
        #[arg(required = true)]
        reports: Vec<PathBuf>,

        /// Output file for the merged summary table (CSV)
        #[arg(short, long, default_value = "merged_evasiveness.csv")]
        output: PathBuf,

        /// Output file for the score and price chart series (JSON)
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Segment a local transcript without calling any service
    Inspect {
        /// Plain-text transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Management turns per classification request
        #[arg(long, default_value = "20")]
        batch_size: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            company,
            year,
            quarter,
            output_dir,
            batch_size,
            max_retries,
            verbose,
        } => {
            setup_logging(verbose);
            let config = AnalysisConfig {
                batch_size,
                max_retries,
                ..Default::default()
            };
            analyze(
                AnalysisRequest {
                    company,
                    year,
                    quarter,
                },
                output_dir,
                config,
            )
            .await
        }
        Commands::Merge {
            reports,
            output,
            chart,
            verbose,
        } => {
            setup_logging(verbose);
            merge(reports, output, chart)
        }
        Commands::Inspect {
            input,
            batch_size,
            verbose,
        } => {
            setup_logging(verbose);
            inspect(input, batch_size)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

async fn analyze(request: AnalysisRequest, output_dir: PathBuf, config: AnalysisConfig) -> Result<()> {
    load_dotenv();

    let chat = ChatClient::new(ChatConfig::from_env()?)?;
    let fmp = FmpClient::new(FmpConfig::from_env()?)?;

    let outcome = run_analysis(&chat, &fmp, &fmp, &request, &config).await?;

    let bundle = write_report(&outcome.report, &output_dir).context("Failed to write report")?;
    info!("Report written to {:?}", bundle);

    print_report(&outcome.report);
    if !outcome.failed_batches.is_empty() {
        println!();
        println!(
            "Warning: {} of {} batches could not be classified and were skipped",
            outcome.failed_batches.len(),
            outcome.batches
        );
    }

    Ok(())
}

fn print_report(report: &Report) {
    let summary = &report.summary;

    println!("Summary");
    println!("=======");
    println!("Company: {}", summary.company);
    println!("Ticker: {}", summary.ticker);
    println!("Period: Q{} {}", summary.quarter, summary.year);
    println!("Transcript date: {}", summary.transcript_date);
    println!("Evasiveness score: {:.2}", summary.score);
    match summary.share_price {
        Some(price) => println!("Share price: {:.2}", price),
        None => println!("Share price: n/a"),
    }

    if !report.findings.is_empty() {
        println!();
        println!("Evasive Statements");
        println!("------------------");
        for (i, finding) in report.findings.iter().enumerate() {
            println!("{}. [{}] \"{}\"", i + 1, finding.category, finding.excerpt);
            println!("   {}", finding.reason);
        }
    }
}

fn merge(reports: Vec<PathBuf>, output: PathBuf, chart: Option<PathBuf>) -> Result<()> {
    let series = merge_reports(&reports).context("Failed to merge reports")?;

    write_summaries(&output, series.summaries())?;
    info!("Merged table written to {:?}", output);

    if let Some(chart_path) = chart {
        write_chart_json(&series.chart_data(), &chart_path)?;
        info!("Chart series written to {:?}", chart_path);
    }

    println!("{:<12} {:<8} {:>8} {:>10}", "Date", "Ticker", "Score", "Price");
    for point in &series.points {
        let price = point
            .summary
            .share_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:<12} {:<8} {:>8.2} {:>10}",
            point.date.format("%Y-%m-%d"),
            point.summary.ticker,
            point.summary.score,
            price
        );
    }

    Ok(())
}

fn inspect(input: PathBuf, batch_size: usize) -> Result<()> {
    info!("Inspecting transcript from {:?}", input);
    let content = read_transcript_file(&input)?;
    let turns = segment_transcript(&content);
    let batches = batch_turns(&turns, batch_size);

    println!("Transcript Inspection");
    println!("=====================");
    println!("Lines: {}", content.lines().count());
    println!("Management turns: {}", turns.len());
    println!("Batches of {}: {}", batch_size.max(1), batches.len());

    let mut speakers: Vec<(&str, usize)> = Vec::new();
    for turn in &turns {
        match speakers.iter_mut().find(|(label, _)| *label == turn.speaker_label) {
            Some((_, count)) => *count += 1,
            None => speakers.push((turn.speaker_label.as_str(), 1)),
        }
    }

    println!();
    println!("Speakers");
    println!("--------");
    for (label, count) in speakers {
        println!("{}: {} turns", label, count);
    }

    Ok(())
}
