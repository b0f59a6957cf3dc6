//! Chart models handed to the plotting frontend
//!
//! Nothing here draws. A capability chart is a single line series of
//! throughput by thread count; an efficiency chart is two stacked bar panels
//! (bandwidth over p99 latency) sharing the block-size axis. Both are
//! serialized to JSON next to the report.

use crate::aggregate::{CapabilitySummaryRow, EfficiencySummaryRow};
use crate::error::Result;
use crate::record::Metadata;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CAPABILITY_CHART_FILE: &str = "plot_capability.json";
pub const EFFICIENCY_CHART_FILE: &str = "plot_efficiency.json";

/// A point with a symmetric error bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBarPoint {
    pub x: f64,
    pub y: f64,
    pub err: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityChart {
    pub title: String,
    pub series_label: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ErrorBarPoint>,
    /// False when every std is zero, i.e. plot a plain line
    pub has_error_bars: bool,
}

impl CapabilityChart {
    /// Build from a capability table; `None` when the table is empty
    pub fn from_rows(rows: &[CapabilitySummaryRow], metadata: &Metadata) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let points: Vec<ErrorBarPoint> = rows
            .iter()
            .map(|r| ErrorBarPoint {
                x: f64::from(r.threads),
                y: r.ops_per_sec_mean,
                err: r.ops_per_sec_std,
            })
            .collect();
        let has_error_bars = points.iter().any(|p| p.err != 0.0);

        Some(Self {
            title: "Capability sweep (stress-ng CPU)".to_string(),
            series_label: metadata.label().to_string(),
            x_label: "Threads".to_string(),
            y_label: "Bogo ops/s".to_string(),
            points,
            has_error_bars,
        })
    }
}

/// One bar panel of the efficiency chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPanel {
    pub title: String,
    pub y_label: String,
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub has_error_bars: bool,
}

impl BarPanel {
    fn new(title: &str, y_label: &str, means: Vec<f64>, stds: Vec<f64>) -> Self {
        let has_error_bars = stds.iter().any(|s| *s != 0.0);
        Self {
            title: title.to_string(),
            y_label: y_label.to_string(),
            means,
            stds,
            has_error_bars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyChart {
    pub title: String,
    pub x_label: String,
    /// Shared categorical axis, in table order
    pub block_sizes: Vec<String>,
    pub bandwidth: BarPanel,
    pub latency: BarPanel,
}

impl EfficiencyChart {
    /// Build from an efficiency table; `None` when the table is empty
    pub fn from_rows(rows: &[EfficiencySummaryRow], metadata: &Metadata) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let bandwidth = BarPanel::new(
            "Efficiency sweep (fio write) - Bandwidth",
            "Bandwidth (MiB/s)",
            rows.iter().map(|r| r.bw_mib_s_mean).collect(),
            rows.iter().map(|r| r.bw_mib_s_std).collect(),
        );
        let latency = BarPanel::new(
            "Efficiency sweep - p99 latency",
            "p99 latency (µs)",
            rows.iter().map(|r| r.p99_lat_us_mean).collect(),
            rows.iter().map(|r| r.p99_lat_us_std).collect(),
        );

        Some(Self {
            title: format!("Arch: {}", metadata.label()),
            x_label: "Block size".to_string(),
            block_sizes: rows.iter().map(|r| r.block_size.clone()).collect(),
            bandwidth,
            latency,
        })
    }
}

/// Write whichever charts exist into `out_dir`, returning the written paths
pub fn write_charts(
    out_dir: &Path,
    capability: Option<&CapabilityChart>,
    efficiency: Option<&EfficiencyChart>,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if let Some(chart) = capability {
        let path = out_dir.join(CAPABILITY_CHART_FILE);
        std::fs::write(&path, to_json(chart)?)?;
        written.push(path);
    }
    if let Some(chart) = efficiency {
        let path = out_dir.join(EFFICIENCY_CHART_FILE);
        std::fs::write(&path, to_json(chart)?)?;
        written.push(path);
    }

    debug!(dir = %out_dir.display(), count = written.len(), "Wrote chart models");
    Ok(written)
}

fn to_json<T: Serialize>(chart: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(chart)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cap_row(threads: u32, mean: f64, std: f64) -> CapabilitySummaryRow {
        CapabilitySummaryRow {
            threads,
            ops_per_sec_mean: mean,
            ops_per_sec_std: std,
            samples: 2,
        }
    }

    fn eff_row(block_size: &str, bw_std: f64, lat_std: f64) -> EfficiencySummaryRow {
        EfficiencySummaryRow {
            block_size: block_size.to_string(),
            bw_mib_s_mean: 100.0,
            bw_mib_s_std: bw_std,
            p99_lat_us_mean: 2000.0,
            p99_lat_us_std: lat_std,
            samples: 2,
        }
    }

    #[test]
    fn test_empty_tables_produce_no_chart() {
        let meta = Metadata::new();
        assert!(CapabilityChart::from_rows(&[], &meta).is_none());
        assert!(EfficiencyChart::from_rows(&[], &meta).is_none());
    }

    #[test]
    fn test_capability_points_and_label() {
        let meta = Metadata::new().with("isa", "arm64");
        let rows = vec![cap_row(1, 100.0, 0.0), cap_row(2, 190.0, 14.1)];
        let chart = CapabilityChart::from_rows(&rows, &meta).unwrap();
        assert_eq!(chart.series_label, "arm64");
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[1].x, 2.0);
        assert_eq!(chart.points[1].y, 190.0);
        assert!(chart.has_error_bars);
    }

    #[test]
    fn test_capability_without_spread_is_plain_line() {
        let rows = vec![cap_row(1, 100.0, 0.0)];
        let chart = CapabilityChart::from_rows(&rows, &Metadata::new()).unwrap();
        assert!(!chart.has_error_bars);
        assert_eq!(chart.series_label, "Unknown");
    }

    #[test]
    fn test_efficiency_panels_independent() {
        let meta = Metadata::new().with("type", "IBM Z Mainframe");
        let rows = vec![eff_row("4k", 0.0, 12.0), eff_row("64k", 0.0, 0.0)];
        let chart = EfficiencyChart::from_rows(&rows, &meta).unwrap();
        assert_eq!(chart.title, "Arch: IBM Z Mainframe");
        assert_eq!(chart.block_sizes, vec!["4k", "64k"]);
        assert!(!chart.bandwidth.has_error_bars);
        assert!(chart.latency.has_error_bars);
        assert_eq!(chart.latency.stds, vec![12.0, 0.0]);
    }

    #[test]
    fn test_write_charts() {
        let dir = TempDir::new().unwrap();
        let rows = vec![cap_row(1, 10.0, 0.0)];
        let cap = CapabilityChart::from_rows(&rows, &Metadata::new());

        let written = write_charts(dir.path(), cap.as_ref(), None).unwrap();
        assert_eq!(written, vec![dir.path().join(CAPABILITY_CHART_FILE)]);

        let text = std::fs::read_to_string(&written[0]).unwrap();
        let parsed: CapabilityChart = serde_json::from_str(&text).unwrap();
        assert_eq!(Some(parsed), cap);
        assert!(!dir.path().join(EFFICIENCY_CHART_FILE).exists());
    }
}
