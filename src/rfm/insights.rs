//! Segment-level insight aggregation.
//!
//! Pure fold over the segmented population. An empty input yields a valid
//! degenerate report (zero totals, empty maps) rather than an error; in
//! practice the metrics stage already rejects empty datasets upstream.

use std::collections::BTreeMap;

use crate::domain::{InsightsReport, Segment, SegmentCount, SegmentValue, SegmentedCustomer};

struct SegmentFold {
    count: usize,
    monetary_sum: f64,
}

/// Aggregate distribution and value statistics over the segmented population.
pub fn generate_insights(customers: &[SegmentedCustomer]) -> InsightsReport {
    // BTreeMap keeps per-segment iteration deterministic before the
    // value-based sorts below.
    let mut folds: BTreeMap<Segment, SegmentFold> = BTreeMap::new();
    for c in customers {
        let fold = folds.entry(c.segment).or_insert_with(|| SegmentFold {
            count: 0,
            monetary_sum: 0.0,
        });
        fold.count += 1;
        fold.monetary_sum += c.scored.rfm.monetary;
    }

    let mut segment_distribution: Vec<SegmentCount> = folds
        .iter()
        .map(|(&segment, fold)| SegmentCount {
            segment,
            count: fold.count,
        })
        .collect();
    segment_distribution.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.segment.display_name().cmp(b.segment.display_name()))
    });

    let mut avg_monetary_by_segment: Vec<SegmentValue> = folds
        .iter()
        .map(|(&segment, fold)| SegmentValue {
            segment,
            value: fold.monetary_sum / fold.count as f64,
        })
        .collect();
    sort_by_value_desc(&mut avg_monetary_by_segment);

    let mut top_segments_by_value: Vec<SegmentValue> = folds
        .iter()
        .map(|(&segment, fold)| SegmentValue {
            segment,
            value: fold.monetary_sum,
        })
        .collect();
    sort_by_value_desc(&mut top_segments_by_value);
    top_segments_by_value.truncate(5);

    InsightsReport {
        total_customers: customers.len(),
        segment_distribution,
        avg_monetary_by_segment,
        top_segments_by_value,
    }
}

fn sort_by_value_desc(values: &mut [SegmentValue]) {
    values.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.segment.display_name().cmp(b.segment.display_name()))
    });
}
