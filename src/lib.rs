//! Assurance Harness - benchmark sweep aggregation and tipping-point analysis
//!
//! This library turns per-run benchmark result documents (a CPU capability
//! sweep by thread count and a storage efficiency sweep by block size) into
//! mean ± sample standard deviation summary tables, and flags block sizes
//! whose p99 latency crosses an operational threshold.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod discovery;
pub mod error;
pub mod html_output;
pub mod json_output;
pub mod loader;
pub mod record;
pub mod report;
pub mod stats;
pub mod tipping;

pub use aggregate::{aggregate, Aggregation, CapabilitySummaryRow, EfficiencySummaryRow};
pub use error::{HarnessError, Result};
pub use record::{Metadata, ResultRecord, RunOutcome};
pub use tipping::{detect_tipping_points, DEFAULT_LATENCY_THRESHOLD_US};
