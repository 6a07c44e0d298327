//! Export per-customer results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per customer, metrics + percentiles + scores + segment.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::SegmentedCustomer;
use crate::error::AppError;

/// Write per-customer results to a CSV file.
pub fn write_results_csv(path: &Path, customers: &[SegmentedCustomer]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    // Header
    writeln!(
        file,
        "customer_id,recency,frequency,monetary,recency_percentile,frequency_percentile,monetary_percentile,r_score,f_score,m_score,rfm_code,segment"
    )
    .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for c in customers {
        let rfm = &c.scored.rfm;
        writeln!(
            file,
            "{},{},{},{:.2},{:.6},{:.6},{:.6},{},{},{},{},{}",
            rfm.customer_id,
            rfm.recency,
            rfm.frequency,
            rfm.monetary,
            rfm.recency_percentile,
            rfm.frequency_percentile,
            rfm.monetary_percentile,
            c.scored.r_score,
            c.scored.f_score,
            c.scored.m_score,
            c.scored.rfm_code,
            c.segment.display_name(),
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CustomerRfm, ScoredCustomer, Segment};

    #[test]
    fn writes_one_row_per_customer() {
        let customers = vec![SegmentedCustomer {
            scored: ScoredCustomer {
                rfm: CustomerRfm {
                    customer_id: "17850".to_string(),
                    recency: 3,
                    frequency: 2,
                    monetary: 45.5,
                    recency_percentile: 0.5,
                    frequency_percentile: 0.75,
                    monetary_percentile: 1.0,
                },
                r_score: 3,
                f_score: 4,
                m_score: 5,
                rfm_code: "345".to_string(),
            },
            segment: Segment::LoyalCustomers,
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_results_csv(&path, &customers).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("customer_id,recency,frequency,monetary"));
        assert!(lines[1].starts_with("17850,3,2,45.50,"));
        assert!(lines[1].ends_with(",345,Loyal Customers"));
    }
}
