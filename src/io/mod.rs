//! Input/output helpers.
//!
//! - CSV ingest + cleaning (`ingest`)
//! - per-customer results export (`export`)
//! - insights JSON read/write (`insights`)

pub mod export;
pub mod ingest;
pub mod insights;

pub use export::*;
pub use ingest::*;
pub use insights::*;
