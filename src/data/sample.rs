//! Seeded synthetic retail transaction generation.
//!
//! The generated CSV uses the same columns as real online-retail exports
//! (InvoiceNo, StockCode, Description, Quantity, InvoiceDate, UnitPrice,
//! CustomerID, Country), including a small share of return rows and
//! anonymous rows so the cleaning stage has something to do.
//!
//! All randomness flows from one `StdRng::seed_from_u64`, so a fixed
//! `(seed, customers, days, end_date)` tuple always produces byte-identical
//! output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::LogNormal;

use crate::error::AppError;

/// Share of invoices that are emitted as returns (negative quantity).
const RETURN_RATE: f64 = 0.04;
/// Share of line items with a missing customer id (guest checkouts).
const ANONYMOUS_RATE: f64 = 0.05;

/// Generator settings, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub customers: usize,
    pub seed: u64,
    /// History window in days, ending at `end_date`.
    pub days: i64,
    pub end_date: NaiveDate,
}

/// One raw CSV row, pre-cleaning.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub invoice_id: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_ts: NaiveDateTime,
    pub unit_price: f64,
    pub customer_id: Option<String>,
    pub country: String,
}

/// Generate a deterministic synthetic transaction history.
pub fn generate_rows(config: &SampleConfig) -> Result<Vec<SampleRow>, AppError> {
    if config.customers == 0 {
        return Err(AppError::usage("Sample customer count must be > 0."));
    }
    if config.days <= 0 {
        return Err(AppError::usage("Sample history window must be > 0 days."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    // Prices cluster around a few pounds with a long tail, like real baskets.
    let price_dist: LogNormal<f64> = LogNormal::new(1.0, 0.75)
        .map_err(|e| AppError::internal(format!("Price distribution error: {e}")))?;

    let mut rows = Vec::new();
    let mut invoice_no = 536_365u64;

    for i in 0..config.customers {
        let customer_id = format!("{}", 12_000 + i);
        let n_invoices = rng.gen_range(1..=6);

        for _ in 0..n_invoices {
            let day_offset = rng.gen_range(0..config.days);
            let date = config.end_date - Duration::days(day_offset);
            let ts = date
                .and_hms_opt(rng.gen_range(8..20), rng.gen_range(0..60), 0)
                .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));

            let is_return = rng.gen_bool(RETURN_RATE);
            let invoice_id = if is_return {
                format!("C{invoice_no}")
            } else {
                invoice_no.to_string()
            };
            invoice_no += 1;

            let n_lines = rng.gen_range(1..=4);
            for line in 0..n_lines {
                let quantity = rng.gen_range(1..=12);
                let quantity = if is_return { -quantity } else { quantity };
                let unit_price = (price_dist.sample(&mut rng) * 100.0).round() / 100.0;
                let anonymous = rng.gen_bool(ANONYMOUS_RATE);

                rows.push(SampleRow {
                    invoice_id: invoice_id.clone(),
                    stock_code: format!("SKU{:05}", rng.gen_range(10_000..100_000)),
                    description: format!("SAMPLE ITEM {line}"),
                    quantity,
                    invoice_ts: ts,
                    unit_price,
                    customer_id: if anonymous {
                        None
                    } else {
                        Some(customer_id.clone())
                    },
                    country: "United Kingdom".to_string(),
                });
            }
        }
    }

    Ok(rows)
}

/// Generate and write a synthetic transaction CSV.
pub fn write_sample_csv(path: &Path, config: &SampleConfig) -> Result<usize, AppError> {
    let rows = generate_rows(config)?;

    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!(
            "Failed to create sample CSV '{}': {e}",
            path.display()
        ))
    })?;

    writeln!(
        file,
        "InvoiceNo,StockCode,Description,Quantity,InvoiceDate,UnitPrice,CustomerID,Country"
    )
    .map_err(|e| AppError::io(format!("Failed to write sample CSV header: {e}")))?;

    for row in &rows {
        writeln!(
            file,
            "{},{},{},{},{},{:.2},{},{}",
            row.invoice_id,
            row.stock_code,
            row.description,
            row.quantity,
            row.invoice_ts.format("%Y-%m-%d %H:%M:%S"),
            row.unit_price,
            row.customer_id.as_deref().unwrap_or(""),
            row.country,
        )
        .map_err(|e| AppError::io(format!("Failed to write sample CSV row: {e}")))?;
    }

    Ok(rows.len())
}
