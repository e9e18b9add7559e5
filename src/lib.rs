pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod llm;
pub mod market;
pub mod models;
pub mod stages;

pub use analysis::{AnalysisOutcome, AnalysisRequest, run_analysis};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, MergeError};
pub use io::{read_summary_rows, read_transcript_file, write_chart_json, write_report, write_summaries};
pub use llm::{ChatClient, ChatCompletion, ChatConfig};
pub use market::{FmpClient, FmpConfig, PriceSource, Transcript, TranscriptSource};
pub use models::{Category, Finding, Report, ReportSummary, SpeakerTurn};
pub use stages::{
    ChartData, ClassificationResult, ClassifyConfig, Series, classify_turns, evasiveness_score,
    merge_reports, segment_transcript,
};
