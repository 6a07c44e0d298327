//! Synthetic data generation.
//!
//! Backs `rfm sample` and the integration tests with seeded, reproducible
//! retail-style transaction CSVs.

pub mod sample;

pub use sample::*;
