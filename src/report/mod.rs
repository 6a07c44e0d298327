//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the metric/classification code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{AnalysisConfig, InsightsReport};
use crate::io::ingest::IngestedData;

const LABEL_WIDTH: usize = 28;

/// Format the run summary (source, cleaning counters, dataset stats).
pub fn format_run_summary(ingest: &IngestedData, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== rfm - Customer Segmentation ===\n");
    out.push_str(&format!(
        "Source: {} ({})\n",
        config.csv_path.display(),
        ingest.encoding
    ));
    out.push_str(&format!(
        "Rows: read={} used={} | dropped: {} missing customer, {} non-positive quantity, {} non-positive price | {} unparseable\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.dropped.missing_customer,
        ingest.dropped.nonpositive_quantity,
        ingest.dropped.nonpositive_price,
        ingest.row_errors.len(),
    ));
    out.push_str(&format!(
        "Span: {} -> {}\n",
        ingest.stats.first_invoice.format("%Y-%m-%d %H:%M"),
        ingest.stats.last_invoice.format("%Y-%m-%d %H:%M"),
    ));
    out.push_str(&format!(
        "Customers: {} | Transactions: {} | Revenue: {}\n",
        ingest.stats.n_customers,
        ingest.stats.n_transactions,
        fmt_money(ingest.stats.total_sales),
    ));
    out.push('\n');

    out
}

/// Format the insights report (distribution + monetary tables).
pub fn format_insights(report: &InsightsReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Total customers analyzed: {}\n",
        report.total_customers
    ));

    out.push_str("\nSegment distribution:\n");
    for entry in &report.segment_distribution {
        let pct = if report.total_customers > 0 {
            entry.count as f64 / report.total_customers as f64 * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "  {:<LABEL_WIDTH$} {:>7} ({pct:>5.1}%)\n",
            truncate(entry.segment.display_name(), LABEL_WIDTH),
            entry.count,
        ));
    }

    out.push_str("\nAverage monetary value by segment:\n");
    for entry in &report.avg_monetary_by_segment {
        out.push_str(&format!(
            "  {:<LABEL_WIDTH$} {:>14}\n",
            truncate(entry.segment.display_name(), LABEL_WIDTH),
            fmt_money(entry.value),
        ));
    }

    out.push_str("\nTop segments by total value:\n");
    for entry in &report.top_segments_by_value {
        out.push_str(&format!(
            "  {:<LABEL_WIDTH$} {:>14}\n",
            truncate(entry.segment.display_name(), LABEL_WIDTH),
            fmt_money(entry.value),
        ));
    }

    out
}

fn fmt_money(v: f64) -> String {
    format!("${v:.2}")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Segment, SegmentCount, SegmentValue};

    fn report() -> InsightsReport {
        InsightsReport {
            total_customers: 4,
            segment_distribution: vec![
                SegmentCount {
                    segment: Segment::Champions,
                    count: 3,
                },
                SegmentCount {
                    segment: Segment::AtRisk,
                    count: 1,
                },
            ],
            avg_monetary_by_segment: vec![SegmentValue {
                segment: Segment::Champions,
                value: 250.0,
            }],
            top_segments_by_value: vec![SegmentValue {
                segment: Segment::Champions,
                value: 750.0,
            }],
        }
    }

    #[test]
    fn insights_include_counts_and_percentages() {
        let text = format_insights(&report());
        assert!(text.contains("Total customers analyzed: 4"));
        assert!(text.contains("Champions"));
        assert!(text.contains("( 75.0%)"));
        assert!(text.contains("$250.00"));
        assert!(text.contains("$750.00"));
    }

    #[test]
    fn truncate_caps_long_labels() {
        assert_eq!(truncate("short", 10), "short");
        let t = truncate("a very long segment label indeed", 10);
        assert_eq!(t.chars().count(), 10);
        assert!(t.ends_with('.'));
    }
}
