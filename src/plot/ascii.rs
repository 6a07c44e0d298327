//! ASCII bar chart for terminal output.
//!
//! This is intentionally "dumb" (fixed-width rows), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)

use crate::domain::InsightsReport;

const LABEL_WIDTH: usize = 28;

/// Render the segment distribution as a horizontal bar chart.
///
/// `width` is the maximum bar length in columns; the largest segment always
/// fills it and the rest scale proportionally (minimum one mark for any
/// non-empty segment).
pub fn render_distribution_chart(report: &InsightsReport, width: usize) -> String {
    let width = width.max(10);
    let max_count = report
        .segment_distribution
        .iter()
        .map(|s| s.count)
        .max()
        .unwrap_or(0);
    if max_count == 0 {
        return String::new();
    }

    let mut out = String::new();
    out.push_str("Segment distribution:\n");
    for entry in &report.segment_distribution {
        let bar_len = ((entry.count as f64 / max_count as f64) * width as f64).round() as usize;
        let bar_len = bar_len.clamp(1, width);
        out.push_str(&format!(
            "{:<LABEL_WIDTH$} |{:<width$}| {}\n",
            entry.segment.display_name(),
            "#".repeat(bar_len),
            entry.count,
        ));
    }

    out
}
