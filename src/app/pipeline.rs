//! Shared analysis pipeline used by the `analyze` and `insights` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest/clean -> RFM metrics -> scoring -> classification -> insights
//!
//! The command handlers can then focus on presentation (printing vs exports).

use rayon::prelude::*;

use crate::domain::{AnalysisConfig, InsightsReport, SegmentedCustomer};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::rfm;

/// All computed outputs of a single analysis run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub customers: Vec<SegmentedCustomer>,
    pub report: InsightsReport,
}

/// Execute the full analysis pipeline and return the computed outputs.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    // 1) Load and clean the transactions CSV.
    let ingest = crate::io::ingest::load_transactions(config)?;

    run_analysis_with_ingest(config, ingest)
}

/// Execute the pipeline with pre-ingested data.
///
/// This is useful for tests and embedders that already hold cleaned
/// transactions in memory.
pub fn run_analysis_with_ingest(
    _config: &AnalysisConfig,
    ingest: IngestedData,
) -> Result<RunOutput, AppError> {
    // 2) Refuse to classify against a malformed rule table.
    rfm::segment::validate_rule_table()?;

    // 3) Per-customer metrics, then population-wide percentile ranks.
    //    Percentiles need the whole population, so this stage is a barrier:
    //    nothing below may start before it completes.
    let metrics = rfm::metrics::compute_rfm(&ingest.transactions)?;

    // 4) Scoring and classification are independent per customer; the
    //    order-preserving parallel map keeps output deterministic.
    let customers: Vec<SegmentedCustomer> = metrics
        .into_par_iter()
        .map(|m| rfm::segment::classify(rfm::score::score_customer(m)))
        .collect();

    // 5) Aggregate segment-level insights.
    let report = rfm::insights::generate_insights(&customers);

    Ok(RunOutput {
        ingest,
        customers,
        report,
    })
}
