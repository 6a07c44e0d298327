//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw CSV rows and cleaned transaction records (`TransactionRow`, `Transaction`)
//! - per-stage customer records (`CustomerRfm`, `ScoredCustomer`, `SegmentedCustomer`)
//! - the segment label set (`Segment`)
//! - the aggregated insights report (`InsightsReport`)

pub mod types;

pub use types::*;
