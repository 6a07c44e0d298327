//! Per-customer RFM metric derivation.
//!
//! This module turns cleaned transactions into one `CustomerRfm` per distinct
//! customer:
//!
//! - `recency` — whole days between the analysis date and the customer's last
//!   invoice, where `analysis_date = max(invoice_ts) + 1 day`. The +1 anchor
//!   makes the most recent customer's recency 1, never 0.
//! - `frequency` — count of distinct invoice ids.
//! - `monetary` — sum of `total_sales`.
//!
//! Percentile ranks are computed independently per metric over the full
//! customer population with the average-rank tie method, so tied values always
//! receive identical percentiles regardless of input order.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDateTime};

use crate::domain::{CustomerRfm, Transaction};
use crate::error::AppError;

struct CustomerFold {
    last_invoice: NaiveDateTime,
    invoices: HashSet<String>,
    monetary: f64,
}

/// Derive one `CustomerRfm` per distinct customer, sorted by customer id.
///
/// Fails with an empty-dataset error when `transactions` is empty (percentile
/// ranking is undefined on an empty population) and with an invalid-metric
/// error when the upstream cleaning contract is violated.
pub fn compute_rfm(transactions: &[Transaction]) -> Result<Vec<CustomerRfm>, AppError> {
    if transactions.is_empty() {
        return Err(AppError::empty_dataset(
            "No transactions to analyze: percentile ranking is undefined on an empty population.",
        ));
    }

    let mut max_ts = transactions[0].invoice_ts;
    for t in transactions {
        if !t.total_sales.is_finite() || t.total_sales < 0.0 {
            return Err(AppError::invalid_metric(format!(
                "Negative or non-finite total_sales for customer '{}' (invoice '{}'): upstream cleaning contract violated.",
                t.customer_id, t.invoice_id
            )));
        }
        if t.invoice_ts > max_ts {
            max_ts = t.invoice_ts;
        }
    }

    // Anchor so the most recent transaction yields recency = 1, never 0.
    let analysis_date = max_ts + Duration::days(1);

    let mut groups: HashMap<&str, CustomerFold> = HashMap::new();
    for t in transactions {
        let fold = groups
            .entry(t.customer_id.as_str())
            .or_insert_with(|| CustomerFold {
                last_invoice: t.invoice_ts,
                invoices: HashSet::new(),
                monetary: 0.0,
            });
        if t.invoice_ts > fold.last_invoice {
            fold.last_invoice = t.invoice_ts;
        }
        fold.invoices.insert(t.invoice_id.clone());
        fold.monetary += t.total_sales;
    }

    // Deterministic output order regardless of hash-map iteration.
    let mut customers: Vec<(String, CustomerFold)> = groups
        .into_iter()
        .map(|(id, fold)| (id.to_string(), fold))
        .collect();
    customers.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = Vec::with_capacity(customers.len());
    for (customer_id, fold) in customers {
        let recency = (analysis_date - fold.last_invoice).num_days();
        let frequency = fold.invoices.len();
        if frequency == 0 {
            return Err(AppError::invalid_metric(format!(
                "Customer '{customer_id}' grouped with zero invoices."
            )));
        }
        if fold.monetary < 0.0 {
            return Err(AppError::invalid_metric(format!(
                "Customer '{customer_id}' has negative monetary total."
            )));
        }
        out.push(CustomerRfm {
            customer_id,
            recency,
            frequency,
            monetary: fold.monetary,
            recency_percentile: 0.0,
            frequency_percentile: 0.0,
            monetary_percentile: 0.0,
        });
    }

    // Percentile ranking requires the entire population: it runs only after
    // every customer's raw metrics are known.
    let recency_pct = percentile_ranks(&out.iter().map(|c| c.recency as f64).collect::<Vec<_>>());
    let frequency_pct =
        percentile_ranks(&out.iter().map(|c| c.frequency as f64).collect::<Vec<_>>());
    let monetary_pct = percentile_ranks(&out.iter().map(|c| c.monetary).collect::<Vec<_>>());

    for (i, c) in out.iter_mut().enumerate() {
        c.recency_percentile = recency_pct[i];
        c.frequency_percentile = frequency_pct[i];
        c.monetary_percentile = monetary_pct[i];
    }

    Ok(out)
}

/// Percentile rank of each value within `values`, average-rank tie method.
///
/// For a value v, its rank is the mean of the 1-based positions it would
/// occupy among all ties, and `percentile = rank / n`. Results always lie in
/// `(0, 1]`; a single-element population yields `[1.0]`.
pub fn percentile_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Tie group occupies 1-based positions i+1 ..= j+1.
        let avg_rank = (i + j + 2) as f64 / 2.0;
        let pct = avg_rank / n as f64;
        for k in i..=j {
            out[order[k]] = pct;
        }
        i = j + 1;
    }

    out
}
