//! Command-line parsing for the RFM segmentation tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the metric/classification code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "rfm",
    version,
    about = "RFM customer segmentation for retail transactions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full analysis: summary, insights, optional chart, exports.
    Analyze(AnalyzeArgs),
    /// Print the insights report only (useful for scripting).
    Insights(AnalyzeArgs),
    /// Generate a seeded synthetic transactions CSV.
    Sample(SampleArgs),
}

/// Common options for analysis and insight runs.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Transactions CSV with columns InvoiceNo, Quantity, InvoiceDate,
    /// UnitPrice, CustomerID (extra columns are ignored).
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Render an ASCII distribution chart (enabled by default).
    #[arg(long, default_value_t = true)]
    pub chart: bool,

    /// Disable the distribution chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 50)]
    pub width: usize,

    /// Export per-customer results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the insights report to JSON.
    #[arg(long = "export-insights")]
    pub export_insights: Option<PathBuf>,
}

/// Options for synthetic sample generation.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(value_name = "CSV")]
    pub out: PathBuf,

    /// Number of synthetic customers.
    #[arg(short = 'n', long, default_value_t = 250)]
    pub customers: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// History window in days, ending at --end-date.
    #[arg(long, default_value_t = 365)]
    pub days: i64,

    /// Last day of the generated history (YYYY-MM-DD).
    #[arg(long, default_value = "2011-12-09")]
    pub end_date: NaiveDate,
}
