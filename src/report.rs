//! Analysis report: aggregated tables plus tipping points
//!
//! This is the single value every output format renders from.

use crate::aggregate::{aggregate, Aggregation};
use crate::error::Result;
use crate::record::ResultRecord;
use crate::tipping::{detect_tipping_points, threshold_ms_label, TippingPoint};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outcome of analyzing one set of runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// System label derived from the first run's metadata
    pub label: String,
    pub threshold_us: f64,
    pub aggregation: Aggregation,
    pub tipping_points: Vec<TippingPoint>,
}

impl AnalysisReport {
    /// Run tipping-point detection over an aggregation
    pub fn new(aggregation: Aggregation, threshold_us: f64) -> Self {
        let tipping_points = detect_tipping_points(&aggregation.efficiency, threshold_us)
            .iter()
            .map(TippingPoint::from)
            .collect();

        Self {
            label: aggregation.metadata.label().to_string(),
            threshold_us,
            aggregation,
            tipping_points,
        }
    }

    /// Number of runs that went into the report
    pub fn run_count(&self) -> usize {
        self.aggregation.runs.total()
    }

    /// One line per tipping point: `<block_size>: p99_lat_us=<value:.1>`
    pub fn tipping_lines(&self) -> Vec<String> {
        self.tipping_points.iter().map(ToString::to_string).collect()
    }

    /// Heading for the tipping-point section
    pub fn tipping_heading(&self) -> String {
        let ms = threshold_ms_label(self.threshold_us);
        if self.tipping_points.is_empty() {
            format!("No tipping points (p99 latency > {} ms) in this dataset.", ms)
        } else {
            format!("Detected Tipping Points (p99 latency > {} ms):", ms)
        }
    }

    /// Plain-text report for the terminal
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Loaded {} run(s) for {}\n",
            self.run_count(),
            self.label
        ));

        let agg = &self.aggregation;
        if !agg.capability.is_empty() {
            out.push_str("\nCapability sweep (ops/s, mean ± std)\n");
            out.push_str(&format!(
                "{:>8} {:>14} {:>12} {:>6}\n",
                "threads", "mean", "std", "runs"
            ));
            for row in &agg.capability {
                out.push_str(&format!(
                    "{:>8} {:>14.2} {:>12.2} {:>6}\n",
                    row.threads, row.ops_per_sec_mean, row.ops_per_sec_std, row.samples
                ));
            }
        }

        if !agg.efficiency.is_empty() {
            out.push_str("\nEfficiency sweep (mean ± std)\n");
            out.push_str(&format!(
                "{:>10} {:>12} {:>10} {:>14} {:>12} {:>6}\n",
                "block_size", "bw_mib_s", "std", "p99_lat_us", "std", "runs"
            ));
            for row in &agg.efficiency {
                out.push_str(&format!(
                    "{:>10} {:>12.2} {:>10.2} {:>14.1} {:>12.1} {:>6}\n",
                    row.block_size,
                    row.bw_mib_s_mean,
                    row.bw_mib_s_std,
                    row.p99_lat_us_mean,
                    row.p99_lat_us_std,
                    row.samples
                ));
            }
        }

        if !agg.runs.incomplete.is_empty() {
            out.push_str(&format!(
                "\nIncomplete runs ({} partial, {} crashed):\n",
                agg.runs.partial, agg.runs.crashed
            ));
            for run in &agg.runs.incomplete {
                out.push_str(&format!("  {}: {}\n", run.source.display(), run.outcome));
            }
        }

        out.push('\n');
        out.push_str(&self.tipping_heading());
        out.push('\n');
        for line in self.tipping_lines() {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }

        out
    }
}

/// Aggregate records and detect tipping points in one step
pub fn analyze(records: &[ResultRecord], threshold_us: f64) -> Result<AnalysisReport> {
    let aggregation = aggregate(records)?;
    let report = AnalysisReport::new(aggregation, threshold_us);
    info!(
        runs = report.run_count(),
        label = %report.label,
        tipping_points = report.tipping_points.len(),
        "Analysis complete"
    );
    Ok(report)
}
