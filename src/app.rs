//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints reports/charts
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::AnalysisConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rfm` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, OutputMode::Full),
        Command::Insights(args) => handle_analyze(args, OutputMode::InsightsOnly),
        Command::Sample(args) => handle_sample(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    InsightsOnly,
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    // Print terminal output.
    if mode == OutputMode::Full {
        print!("{}", crate::report::format_run_summary(&run.ingest, &config));
    }

    print!("{}", crate::report::format_insights(&run.report));

    if mode == OutputMode::Full && config.chart {
        let chart = crate::plot::render_distribution_chart(&run.report, config.chart_width);
        print!("\n{chart}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.customers)?;
    }
    if let Some(path) = &config.export_insights {
        crate::io::insights::write_insights_json(path, &run.report)?;
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        customers: args.customers,
        seed: args.seed,
        days: args.days,
        end_date: args.end_date,
    };
    let rows = crate::data::write_sample_csv(&args.out, &config)?;
    println!(
        "Wrote {rows} transaction rows for {} customers to '{}'.",
        config.customers,
        args.out.display()
    );
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        csv_path: args.csv.clone(),
        chart: args.chart && !args.no_chart,
        chart_width: args.width,
        export_results: args.export.clone(),
        export_insights: args.export_insights.clone(),
    }
}
