//! CLI argument parsing for the assurance harness

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
    /// HTML report with styled tables
    Html,
}

impl OutputFormat {
    /// File name used when the report is saved to `--out-dir`
    pub fn report_file_name(self) -> &'static str {
        match self {
            OutputFormat::Text => "report.txt",
            OutputFormat::Json => "report.json",
            OutputFormat::Csv => "report.csv",
            OutputFormat::Html => "report.html",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "assurance-harness")]
#[command(version)]
#[command(
    about = "Aggregate benchmark sweep results and detect latency tipping points",
    long_about = None
)]
pub struct Cli {
    /// Path to results directory or to a single .json file
    #[arg(default_value = "results")]
    pub path: PathBuf,

    /// Directory to save the report and chart data (default: print only)
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// p99 latency threshold in microseconds (default: 100000 = 100 ms)
    #[arg(long = "threshold", value_name = "US")]
    pub threshold: Option<f64>,

    /// TOML analysis configuration file
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print this machine's architecture metadata as JSON and exit
    #[arg(long = "discover")]
    pub discover: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
