//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! # Using OutputFormat in Libraries
//!
//! ```rust
//! use chatlens::cli::OutputFormat;
//!
//! let format: OutputFormat = "summary".parse().unwrap();
//! assert_eq!(format.extension(), "json");
//! println!("Format: {}", format); // "Summary"
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;

/// Default output path; the extension follows the chosen format.
pub const DEFAULT_OUTPUT: &str = "chatlens_report.json";

/// Repair Instagram/Messenger chat exports and compute conversation
/// statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens message_1.json
    chatlens message_1.json message_2.json -o stats.json
    chatlens inbox/*.json --format csv -o messages.csv
    chatlens message_1.json -f summary --top 20
    chatlens message_1.json --cache .chatlens-cache.json -v")]
pub struct Args {
    /// Export files (message_1.json, message_2.json, ...)
    #[arg(required = true, value_name = "FILES")]
    pub inputs: Vec<PathBuf>,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Number of entries in the ranked word and emoji lists
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Sort messages by timestamp before analysis
    #[arg(long)]
    pub sort: bool,

    /// Reuse or store the snapshot in this cache file
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Report analysis progress on stderr
    #[arg(long)]
    pub progress: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Builds the analysis configuration from the flags.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::new().with_sort_input(self.sort);
        if let Some(top) = self.top {
            config = config.with_top_words(top).with_top_emojis(top);
        }
        config
    }

    /// Default log filter directive for the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Output path with the extension adjusted when the default was kept.
    pub fn output_path(&self) -> PathBuf {
        if self.output.as_os_str() != DEFAULT_OUTPUT {
            return self.output.clone();
        }
        let stem = match self.format {
            OutputFormat::Summary => "chatlens_summary",
            OutputFormat::Json | OutputFormat::Csv => "chatlens_report",
        };
        PathBuf::from(format!("{stem}.{}", self.format.extension()))
    }
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - the full statistics snapshot
/// - [`Csv`](OutputFormat::Csv) - one row per message, for spreadsheets
/// - [`Summary`](OutputFormat::Summary) - compact insight summary (JSON)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Statistics snapshot as pretty JSON (default)
    #[default]
    Json,

    /// Messages as CSV
    Csv,

    /// Insight summary as JSON
    Summary,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json | OutputFormat::Summary => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "csv", "summary"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Summary => write!(f, "Summary"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "summary" | "insights" => Ok(OutputFormat::Summary),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}
