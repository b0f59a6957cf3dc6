//! Merge per-run result records into summary tables
//!
//! Capability observations are grouped by thread count and emitted in
//! ascending thread order. Efficiency observations are grouped by block size
//! and emitted in the order each block size first appears in the merged
//! stream, so the runner's sweep order survives aggregation.

use crate::error::{HarnessError, Result};
use crate::record::{Metadata, ResultRecord, RunOutcome};
use crate::stats::MeanStd;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::debug;

/// CPU throughput summary for one thread count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilitySummaryRow {
    pub threads: u32,
    pub ops_per_sec_mean: f64,
    pub ops_per_sec_std: f64,
    /// Number of observations in the group
    pub samples: usize,
}

/// Storage I/O summary for one block size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummaryRow {
    pub block_size: String,
    pub bw_mib_s_mean: f64,
    pub bw_mib_s_std: f64,
    pub p99_lat_us_mean: f64,
    pub p99_lat_us_std: f64,
    pub samples: usize,
}

/// Per-outcome run counts plus the sources of runs that did not complete
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTally {
    pub complete: usize,
    pub partial: usize,
    pub crashed: usize,
    /// Partial and crashed runs, in input order
    pub incomplete: Vec<IncompleteRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncompleteRun {
    pub source: PathBuf,
    pub outcome: RunOutcome,
}

impl RunTally {
    pub fn total(&self) -> usize {
        self.complete + self.partial + self.crashed
    }

    fn record(&mut self, source: PathBuf, outcome: RunOutcome) {
        match outcome {
            RunOutcome::Complete => self.complete += 1,
            RunOutcome::Partial => self.partial += 1,
            RunOutcome::Crashed => self.crashed += 1,
        }
        if outcome != RunOutcome::Complete {
            self.incomplete.push(IncompleteRun { source, outcome });
        }
    }
}

/// Result of aggregating a set of runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub capability: Vec<CapabilitySummaryRow>,
    pub efficiency: Vec<EfficiencySummaryRow>,
    /// Metadata of the first record
    pub metadata: Metadata,
    pub runs: RunTally,
}

impl Aggregation {
    /// True if neither table has rows
    pub fn is_empty(&self) -> bool {
        self.capability.is_empty() && self.efficiency.is_empty()
    }
}

/// Accumulates efficiency groups in first-occurrence order
#[derive(Debug, Default)]
struct EfficiencyGroups {
    order: Vec<String>,
    index: HashMap<String, usize>,
    bw: Vec<Vec<f64>>,
    lat: Vec<Vec<f64>>,
}

impl EfficiencyGroups {
    fn push(&mut self, block_size: &str, bw_mib_s: f64, p99_lat_us: f64) {
        let slot = match self.index.get(block_size) {
            Some(&slot) => slot,
            None => {
                let slot = self.order.len();
                self.order.push(block_size.to_string());
                self.index.insert(block_size.to_string(), slot);
                self.bw.push(Vec::new());
                self.lat.push(Vec::new());
                slot
            }
        };
        self.bw[slot].push(bw_mib_s);
        self.lat[slot].push(p99_lat_us);
    }

    fn into_rows(self) -> Vec<EfficiencySummaryRow> {
        self.order
            .into_iter()
            .zip(self.bw.iter().zip(self.lat.iter()))
            .map(|(block_size, (bw, lat))| {
                let bw_stats = MeanStd::of(bw);
                let lat_stats = MeanStd::of(lat);
                EfficiencySummaryRow {
                    block_size,
                    bw_mib_s_mean: bw_stats.mean,
                    bw_mib_s_std: bw_stats.std,
                    p99_lat_us_mean: lat_stats.mean,
                    p99_lat_us_std: lat_stats.std,
                    samples: bw.len(),
                }
            })
            .collect()
    }
}

/// Aggregate records into capability and efficiency summary tables
///
/// Every record is validated first; an invalid measurement aborts the whole
/// aggregation with `MalformedDocument` rather than skewing the statistics.
/// Empty input yields empty tables and empty metadata.
pub fn aggregate(records: &[ResultRecord]) -> Result<Aggregation> {
    for (i, record) in records.iter().enumerate() {
        record
            .validate()
            .map_err(|reason| HarnessError::malformed(record.display_name(i), reason))?;
    }

    let metadata = records
        .first()
        .map(|r| r.metadata.clone())
        .unwrap_or_default();

    let mut runs = RunTally::default();
    let mut by_threads: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut efficiency = EfficiencyGroups::default();

    for (i, record) in records.iter().enumerate() {
        runs.record(record.display_name(i), record.outcome());

        for obs in &record.capability_sweep {
            by_threads
                .entry(obs.threads)
                .or_default()
                .push(obs.ops_per_sec);
        }
        for obs in &record.efficiency_sweep {
            efficiency.push(&obs.block_size, obs.bw_mib_s, obs.p99_lat_us);
        }
    }

    let capability: Vec<CapabilitySummaryRow> = by_threads
        .into_iter()
        .map(|(threads, values)| {
            let stats = MeanStd::of(&values);
            CapabilitySummaryRow {
                threads,
                ops_per_sec_mean: stats.mean,
                ops_per_sec_std: stats.std,
                samples: values.len(),
            }
        })
        .collect();
    let efficiency = efficiency.into_rows();

    debug!(
        records = records.len(),
        capability_rows = capability.len(),
        efficiency_rows = efficiency.len(),
        crashed = runs.crashed,
        "Aggregated result records"
    );

    Ok(Aggregation {
        capability,
        efficiency,
        metadata,
        runs,
    })
}
