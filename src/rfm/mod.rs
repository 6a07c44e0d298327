//! RFM computation and classification.
//!
//! Responsibilities:
//!
//! - derive per-customer Recency/Frequency/Monetary and percentile ranks (`metrics`)
//! - map percentiles to discrete 1-5 scores (`score`)
//! - classify score codes into named segments (`segment`)
//! - aggregate segment-level insights (`insights`)

pub mod insights;
pub mod metrics;
pub mod score;
pub mod segment;

pub use insights::*;
pub use metrics::*;
pub use score::*;
pub use segment::*;
