//! Per-run result records produced by the benchmark runner
//!
//! A record holds the architecture metadata of the tested system plus the
//! two raw sweeps: CPU throughput by thread count (capability) and storage
//! I/O by block size (efficiency). Crashed or partial runs simply carry
//! empty sweeps.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Label used when metadata names neither a type nor an ISA
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Description of the tested system
///
/// Keys are kept sorted so serialized metadata is deterministic. Only `isa`
/// and `type` have meaning to the analysis; everything else is carried
/// through for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key, replacing any previous value
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Instruction-set architecture identifier (e.g. "x86_64", "s390x")
    pub fn isa(&self) -> Option<&str> {
        self.str_field("isa")
    }

    /// Human-readable system type (e.g. "IBM Z Mainframe")
    pub fn system_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// Raw value for any key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display label: type, then ISA, then "Unknown". Empty strings are skipped.
    pub fn label(&self) -> &str {
        self.system_type()
            .filter(|s| !s.is_empty())
            .or_else(|| self.isa().filter(|s| !s.is_empty()))
            .unwrap_or(UNKNOWN_LABEL)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// One CPU-throughput data point at a given concurrency level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityObservation {
    pub threads: u32,
    pub ops_per_sec: f64,
}

/// One storage I/O run at a given block size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyObservation {
    /// Block size label as written by the runner (e.g. "4k", "1m")
    pub block_size: String,
    pub bw_mib_s: f64,
    pub p99_lat_us: f64,
}

/// How far a run got before it stopped writing observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Both sweeps have observations
    Complete,
    /// Exactly one sweep has observations
    Partial,
    /// Neither sweep has observations
    Crashed,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunOutcome::Complete => "complete",
            RunOutcome::Partial => "partial",
            RunOutcome::Crashed => "crashed",
        };
        f.write_str(s)
    }
}

/// Measurements from one benchmark run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub capability_sweep: Vec<CapabilityObservation>,
    #[serde(default)]
    pub efficiency_sweep: Vec<EfficiencyObservation>,
    /// File the record was loaded from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ResultRecord {
    /// Create an empty record with the given metadata
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    /// Parse a record from a JSON document
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_capability(mut self, threads: u32, ops_per_sec: f64) -> Self {
        self.capability_sweep.push(CapabilityObservation {
            threads,
            ops_per_sec,
        });
        self
    }

    #[must_use]
    pub fn with_efficiency(mut self, block_size: &str, bw_mib_s: f64, p99_lat_us: f64) -> Self {
        self.efficiency_sweep.push(EfficiencyObservation {
            block_size: block_size.to_string(),
            bw_mib_s,
            p99_lat_us,
        });
        self
    }

    /// True if the run produced no observations at all
    pub fn is_empty(&self) -> bool {
        self.capability_sweep.is_empty() && self.efficiency_sweep.is_empty()
    }

    pub fn outcome(&self) -> RunOutcome {
        match (
            self.capability_sweep.is_empty(),
            self.efficiency_sweep.is_empty(),
        ) {
            (false, false) => RunOutcome::Complete,
            (true, true) => RunOutcome::Crashed,
            _ => RunOutcome::Partial,
        }
    }

    /// Name used in diagnostics: the source path, or a positional fallback
    pub fn display_name(&self, index: usize) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("record #{}", index)))
    }

    /// Check measurement invariants
    ///
    /// Thread counts must be positive and every measured value must be a
    /// finite, non-negative number.
    pub fn validate(&self) -> Result<(), String> {
        for (i, obs) in self.capability_sweep.iter().enumerate() {
            if obs.threads == 0 {
                return Err(format!("capability_sweep[{}]: threads must be positive", i));
            }
            check_measurement(obs.ops_per_sec, "capability_sweep", i, "ops_per_sec")?;
        }

        for (i, obs) in self.efficiency_sweep.iter().enumerate() {
            check_measurement(obs.bw_mib_s, "efficiency_sweep", i, "bw_mib_s")?;
            check_measurement(obs.p99_lat_us, "efficiency_sweep", i, "p99_lat_us")?;
        }

        Ok(())
    }
}

fn check_measurement(value: f64, sweep: &str, index: usize, field: &str) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!(
            "{}[{}]: {} must be a non-negative number, got {}",
            sweep, index, field, value
        ));
    }
    Ok(())
}
