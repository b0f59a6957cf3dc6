//! JSON output format for analysis reports

use crate::aggregate::{CapabilitySummaryRow, EfficiencySummaryRow, RunTally};
use crate::record::Metadata;
use crate::report::AnalysisReport;
use crate::tipping::TippingPoint;
use serde::{Deserialize, Serialize};

/// Tipping-point section of the JSON report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTipping {
    /// Threshold applied, in microseconds
    pub threshold_us: f64,
    pub points: Vec<TippingPoint>,
    /// Report lines, `<block_size>: p99_lat_us=<value>`
    pub lines: Vec<String>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub label: String,
    pub metadata: Metadata,
    pub runs: RunTally,
    pub capability: Vec<CapabilitySummaryRow>,
    pub efficiency: Vec<EfficiencySummaryRow>,
    pub tipping: JsonTipping,
}

impl JsonOutput {
    /// Build the JSON document for a report
    pub fn from_report(report: &AnalysisReport) -> Self {
        let agg = &report.aggregation;
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "harness-json-v1".to_string(),
            label: report.label.clone(),
            metadata: agg.metadata.clone(),
            runs: agg.runs.clone(),
            capability: agg.capability.clone(),
            efficiency: agg.efficiency.clone(),
            tipping: JsonTipping {
                threshold_us: report.threshold_us,
                points: report.tipping_points.clone(),
                lines: report.tipping_lines(),
            },
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
