pub mod input;
pub mod output;

pub use input::*;
pub use output::*;

/// "Summary" sheet of a report bundle
pub const SUMMARY_FILE: &str = "summary.csv";

/// "Evasive Statements" sheet of a report bundle
pub const STATEMENTS_FILE: &str = "evasive_statements.csv";

/// Column headers of the "Summary" sheet, in order
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "Company",
    "Ticker",
    "Year",
    "Quarter",
    "Transcript Date",
    "Evasiveness Score",
    "Share Price",
];
