//! Read/write insights JSON files.
//!
//! Insights JSON is the "portable" representation of a segmentation run:
//! totals, distribution, and the per-segment monetary statistics. The schema
//! is defined by `domain::InsightsReport`.

use std::fs::File;
use std::path::Path;

use crate::domain::InsightsReport;
use crate::error::AppError;

/// Write an insights JSON file.
pub fn write_insights_json(path: &Path, report: &InsightsReport) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create insights JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::io(format!("Failed to write insights JSON: {e}")))?;

    Ok(())
}

/// Read an insights JSON file.
pub fn read_insights_json(path: &Path) -> Result<InsightsReport, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!(
            "Failed to open insights JSON '{}': {e}",
            path.display()
        ))
    })?;
    let report: InsightsReport = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Invalid insights JSON: {e}")))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Segment, SegmentCount, SegmentValue};

    #[test]
    fn json_round_trip_preserves_labels_and_order() {
        let report = InsightsReport {
            total_customers: 2,
            segment_distribution: vec![
                SegmentCount {
                    segment: Segment::Champions,
                    count: 1,
                },
                SegmentCount {
                    segment: Segment::AtRisk,
                    count: 1,
                },
            ],
            avg_monetary_by_segment: vec![SegmentValue {
                segment: Segment::Champions,
                value: 120.0,
            }],
            top_segments_by_value: vec![SegmentValue {
                segment: Segment::Champions,
                value: 120.0,
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("insights.json");
        write_insights_json(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        // Segments serialize as their marketing labels.
        assert!(text.contains("\"At Risk\""));

        let loaded = read_insights_json(&path).unwrap();
        assert_eq!(loaded.total_customers, 2);
        assert_eq!(loaded.segment_distribution[0].segment, Segment::Champions);
        assert_eq!(loaded.segment_distribution[1].segment, Segment::AtRisk);
    }
}
