//! CSV ingest and cleaning.
//!
//! This module is responsible for turning a raw online-retail CSV into clean
//! `Transaction` records that are safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level cleaning** (drop bad rows, but count what happened)
//! - **Deterministic behavior** (explicit encoding candidates, no probing by
//!   exception; fixed timestamp format ladder)
//! - **Separation of concerns**: no RFM logic here

use std::collections::HashMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{AnalysisConfig, Transaction, TransactionRow};
use crate::error::AppError;

/// Summary stats about the transactions actually used for analysis.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_transactions: usize,
    pub n_customers: usize,
    pub first_invoice: NaiveDateTime,
    pub last_invoice: NaiveDateTime,
    pub total_sales: f64,
}

/// Counts of rows dropped by each cleaning rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropCounts {
    pub missing_customer: usize,
    pub nonpositive_quantity: usize,
    pub nonpositive_price: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.missing_customer + self.nonpositive_quantity + self.nonpositive_price
    }
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub invoice: Option<String>,
    pub message: String,
}

/// Ingest output: cleaned transactions + stats + drop counts + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub transactions: Vec<Transaction>,
    pub stats: DatasetStats,
    pub dropped: DropCounts,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
    /// Which candidate decoding succeeded ("utf-8" or "latin-1").
    pub encoding: &'static str,
}

/// Load and clean a transactions CSV.
pub fn load_transactions(config: &AnalysisConfig) -> Result<IngestedData, AppError> {
    load_transactions_from_path(&config.csv_path)
}

/// Load and clean a transactions CSV from an explicit path.
pub fn load_transactions_from_path(path: &Path) -> Result<IngestedData, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::io(format!("Failed to read CSV '{}': {e}", path.display())))?;
    let (text, encoding) = decode_bytes(&bytes);
    let mut ingested = load_transactions_from_str(&text)?;
    ingested.encoding = encoding;
    Ok(ingested)
}

/// Parse, validate, and clean CSV text.
pub fn load_transactions_from_str(text: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::schema(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut transactions = Vec::new();
    let mut row_errors = Vec::new();
    let mut dropped = DropCounts::default();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    invoice: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(row) => {
                if let Some(txn) = clean_row(row, &mut dropped) {
                    transactions.push(txn);
                }
            }
            Err(e) => row_errors.push(RowError {
                line,
                invoice: get_optional(&record, &header_map, "invoiceno").map(str::to_string),
                message: e,
            }),
        }
    }

    let rows_used = transactions.len();
    let stats = compute_stats(&transactions).ok_or_else(|| {
        AppError::empty_dataset("No valid transactions remain after cleaning.")
    })?;

    Ok(IngestedData {
        transactions,
        stats,
        dropped,
        row_errors,
        rows_read,
        rows_used,
        encoding: "utf-8",
    })
}

/// Decode raw bytes using an explicit prioritized candidate list.
///
/// UTF-8 is tried first; on failure we fall back to Latin-1, which maps every
/// byte to the Unicode scalar of the same value and therefore cannot fail.
/// Real online-retail exports are frequently Latin-1/Windows-1252.
pub fn decode_bytes(bytes: &[u8]) -> (String, &'static str) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_string(), "utf-8"),
        Err(_) => (bytes.iter().map(|&b| b as char).collect(), "latin-1"),
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿InvoiceNo"). If we don't strip it, schema
    // validation will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

const REQUIRED_COLUMNS: [&str; 5] = [
    "invoiceno",
    "quantity",
    "invoicedate",
    "unitprice",
    "customerid",
];

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for col in REQUIRED_COLUMNS {
        if !header_map.contains_key(col) {
            return Err(AppError::schema(format!("Missing required column: `{col}`")));
        }
    }
    Ok(())
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<TransactionRow, String> {
    let invoice_id = get_required(record, header_map, "invoiceno")?.to_string();
    let customer_id = get_optional(record, header_map, "customerid").map(str::to_string);

    let quantity = get_required(record, header_map, "quantity")?
        .parse::<i64>()
        .map_err(|_| "Invalid `quantity` (expected an integer).".to_string())?;

    let unit_price = get_required(record, header_map, "unitprice")?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| "Invalid `unitprice` (expected a finite number).".to_string())?;

    let invoice_ts = parse_timestamp(get_required(record, header_map, "invoicedate")?)?;

    Ok(TransactionRow {
        invoice_id,
        customer_id,
        quantity,
        unit_price,
        invoice_ts,
    })
}

/// Apply the cleaning rules, counting each drop reason.
///
/// Rows without a customer id cannot be attributed; non-positive quantities
/// are returns/cancellations and non-positive prices are adjustment lines -
/// none of them belong in a purchase-behavior analysis.
fn clean_row(row: TransactionRow, dropped: &mut DropCounts) -> Option<Transaction> {
    let customer_id = match row.customer_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            dropped.missing_customer += 1;
            return None;
        }
    };
    if row.quantity <= 0 {
        dropped.nonpositive_quantity += 1;
        return None;
    }
    if row.unit_price <= 0.0 {
        dropped.nonpositive_price += 1;
        return None;
    }

    Some(Transaction {
        customer_id,
        invoice_id: row.invoice_id,
        invoice_ts: row.invoice_ts,
        total_sales: row.quantity as f64 * row.unit_price,
    })
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    // Retail exports vary: ISO datetimes, the UCI Online Retail `M/D/YYYY H:MM`
    // convention, or bare dates. We accept a small fixed ladder, first match
    // wins, to keep parsing deterministic.
    const DATETIME_FMTS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected one of: YYYY-MM-DD HH:MM:SS, YYYY-MM-DDTHH:MM:SS, M/D/YYYY H:MM, YYYY-MM-DD HH:MM, YYYY-MM-DD."
    ))
}

fn compute_stats(transactions: &[Transaction]) -> Option<DatasetStats> {
    let first = transactions.first()?;
    let mut first_invoice = first.invoice_ts;
    let mut last_invoice = first.invoice_ts;
    let mut total_sales = 0.0;
    let mut customers: std::collections::HashSet<&str> = std::collections::HashSet::new();

    for t in transactions {
        first_invoice = first_invoice.min(t.invoice_ts);
        last_invoice = last_invoice.max(t.invoice_ts);
        total_sales += t.total_sales;
        customers.insert(t.customer_id.as_str());
    }

    Some(DatasetStats {
        n_transactions: transactions.len(),
        n_customers: customers.len(),
        first_invoice,
        last_invoice,
        total_sales,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn get_optional<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}
