//! Tipping-point detection on aggregated efficiency tables
//!
//! A tipping point is a block size whose mean p99 latency is strictly above
//! an operational threshold, marking the capacity cliff of the storage path.

use crate::aggregate::EfficiencySummaryRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default threshold: 100 ms expressed in microseconds
pub const DEFAULT_LATENCY_THRESHOLD_US: f64 = 100_000.0;

/// An efficiency row flagged as a tipping point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TippingPoint {
    pub block_size: String,
    pub p99_lat_us: f64,
}

impl From<&EfficiencySummaryRow> for TippingPoint {
    fn from(row: &EfficiencySummaryRow) -> Self {
        Self {
            block_size: row.block_size.clone(),
            p99_lat_us: row.p99_lat_us_mean,
        }
    }
}

impl fmt::Display for TippingPoint {
    /// Report line: `<block_size>: p99_lat_us=<value:.1>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: p99_lat_us={:.1}", self.block_size, self.p99_lat_us)
    }
}

/// Rows whose mean p99 latency is strictly greater than `threshold_us`
///
/// Table order is preserved. A row exactly at the threshold is not flagged.
pub fn detect_tipping_points(
    rows: &[EfficiencySummaryRow],
    threshold_us: f64,
) -> Vec<EfficiencySummaryRow> {
    rows.iter()
        .filter(|row| row.p99_lat_us_mean > threshold_us)
        .cloned()
        .collect()
}

/// Threshold rendered in milliseconds for report headings ("100", "2.5")
pub fn threshold_ms_label(threshold_us: f64) -> String {
    let ms = threshold_us / 1000.0;
    if ms.fract() == 0.0 {
        format!("{:.0}", ms)
    } else {
        format!("{}", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(block_size: &str, p99: f64) -> EfficiencySummaryRow {
        EfficiencySummaryRow {
            block_size: block_size.to_string(),
            bw_mib_s_mean: 100.0,
            bw_mib_s_std: 0.0,
            p99_lat_us_mean: p99,
            p99_lat_us_std: 0.0,
            samples: 1,
        }
    }

    #[test]
    fn test_default_threshold_flags_only_slow_rows() {
        let rows = vec![row("4k", 50_000.0), row("64k", 150_000.0)];
        let flagged = detect_tipping_points(&rows, DEFAULT_LATENCY_THRESHOLD_US);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].block_size, "64k");
    }

    #[test]
    fn test_boundary_is_excluded() {
        let rows = vec![row("16k", 100_000.0)];
        assert!(detect_tipping_points(&rows, 100_000.0).is_empty());
        assert_eq!(detect_tipping_points(&rows, 99_999.9).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_tipping_points(&[], DEFAULT_LATENCY_THRESHOLD_US).is_empty());
    }

    #[test]
    fn test_zero_threshold_flags_positive_latency() {
        let rows = vec![row("4k", 0.0), row("8k", 0.5), row("16k", 12.0)];
        let flagged = detect_tipping_points(&rows, 0.0);
        let names: Vec<&str> = flagged.iter().map(|r| r.block_size.as_str()).collect();
        assert_eq!(names, vec!["8k", "16k"]);
    }

    #[test]
    fn test_huge_threshold_flags_nothing() {
        let rows = vec![row("1m", 9.0e12)];
        assert!(detect_tipping_points(&rows, f64::MAX).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let rows = vec![
            row("1m", 300_000.0),
            row("4k", 10.0),
            row("256k", 200_000.0),
        ];
        let flagged = detect_tipping_points(&rows, DEFAULT_LATENCY_THRESHOLD_US);
        let names: Vec<&str> = flagged.iter().map(|r| r.block_size.as_str()).collect();
        assert_eq!(names, vec!["1m", "256k"]);
    }

    #[test]
    fn test_report_line_format() {
        let point = TippingPoint::from(&row("64k", 150_000.04));
        assert_eq!(point.to_string(), "64k: p99_lat_us=150000.0");

        let point = TippingPoint::from(&row("1m", 123_456.789));
        assert_eq!(point.to_string(), "1m: p99_lat_us=123456.8");
    }

    #[test]
    fn test_threshold_ms_label() {
        assert_eq!(threshold_ms_label(100_000.0), "100");
        assert_eq!(threshold_ms_label(2_500.0), "2.5");
        assert_eq!(threshold_ms_label(0.0), "0");
    }
}
