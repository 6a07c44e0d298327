//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the analysis pass
//! - exported to CSV/JSON
//! - reloaded later for reporting or comparisons

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A raw row of CSV input, after type parsing but before cleaning.
///
/// This mirrors the common online-retail export schema and allows us to:
/// - perform row-level validation with good error messages
/// - count exactly why rows were dropped during cleaning
#[derive(Debug, Clone)]
pub struct TransactionRow {
    pub invoice_id: String,
    /// Missing in roughly a quarter of real retail exports; such rows are
    /// dropped (and counted) rather than treated as errors.
    pub customer_id: Option<String>,
    pub quantity: i64,
    pub unit_price: f64,
    pub invoice_ts: NaiveDateTime,
}

/// A cleaned transaction record, safe to aggregate.
///
/// Invariants (enforced during ingest): `total_sales` is finite and positive,
/// identifiers are non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub customer_id: String,
    pub invoice_id: String,
    pub invoice_ts: NaiveDateTime,
    pub total_sales: f64,
}

/// Per-customer Recency/Frequency/Monetary metrics plus percentile ranks.
///
/// One record per distinct customer; immutable once produced. Percentiles are
/// average-rank based and always lie in `(0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRfm {
    pub customer_id: String,
    /// Whole days between the analysis date and the customer's most recent
    /// invoice. The analysis date anchor guarantees this is >= 1.
    pub recency: i64,
    /// Count of distinct invoices (>= 1 by construction).
    pub frequency: usize,
    /// Sum of `total_sales` across the customer's transactions.
    pub monetary: f64,
    pub recency_percentile: f64,
    pub frequency_percentile: f64,
    pub monetary_percentile: f64,
}

/// A customer with discrete 1-5 scores and the 3-digit lookup code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCustomer {
    #[serde(flatten)]
    pub rfm: CustomerRfm,
    pub r_score: u8,
    pub f_score: u8,
    pub m_score: u8,
    /// Decimal-digit concatenation `r_score || f_score || m_score`, always
    /// exactly 3 characters, each in `'1'..='5'`.
    pub rfm_code: String,
}

/// Final per-customer record: scores plus the assigned segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentedCustomer {
    #[serde(flatten)]
    pub scored: ScoredCustomer,
    pub segment: Segment,
}

/// The fixed segment label set.
///
/// `Other` is the documented fallback for codes not present in any rule-table
/// group; it is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "Champions")]
    Champions,
    #[serde(rename = "Loyal Customers")]
    LoyalCustomers,
    #[serde(rename = "Potential Loyalists")]
    PotentialLoyalists,
    #[serde(rename = "New Customers")]
    NewCustomers,
    #[serde(rename = "Promising")]
    Promising,
    #[serde(rename = "Customers Needing Attention")]
    NeedingAttention,
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "About to Sleep")]
    AboutToSleep,
    #[serde(rename = "Cannot Lose Them")]
    CannotLoseThem,
    #[serde(rename = "Lost Customers")]
    LostCustomers,
    #[serde(rename = "Other")]
    Other,
}

impl Segment {
    /// Human-readable label for terminal output and exports.
    pub fn display_name(self) -> &'static str {
        match self {
            Segment::Champions => "Champions",
            Segment::LoyalCustomers => "Loyal Customers",
            Segment::PotentialLoyalists => "Potential Loyalists",
            Segment::NewCustomers => "New Customers",
            Segment::Promising => "Promising",
            Segment::NeedingAttention => "Customers Needing Attention",
            Segment::AtRisk => "At Risk",
            Segment::AboutToSleep => "About to Sleep",
            Segment::CannotLoseThem => "Cannot Lose Them",
            Segment::LostCustomers => "Lost Customers",
            Segment::Other => "Other",
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Count of customers in one segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentCount {
    pub segment: Segment,
    pub count: usize,
}

/// A per-segment monetary statistic (mean or sum, depending on context).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentValue {
    pub segment: Segment,
    pub value: f64,
}

/// Aggregated segment-level insights. Derived, read-only, regenerated each run.
///
/// Invariant: counts in `segment_distribution` sum to `total_customers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    pub total_customers: usize,
    /// Count per segment present, ordered by count descending (label ascending
    /// on ties, for reproducible output).
    pub segment_distribution: Vec<SegmentCount>,
    /// Mean monetary per segment, ordered by value descending.
    pub avg_monetary_by_segment: Vec<SegmentValue>,
    /// Top 5 segments by summed monetary, ordered by value descending.
    pub top_segments_by_value: Vec<SegmentValue>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub csv_path: PathBuf,

    pub chart: bool,
    pub chart_width: usize,

    pub export_results: Option<PathBuf>,
    pub export_insights: Option<PathBuf>,
}
