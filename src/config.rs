//! Analysis configuration
//!
//! Loaded from a TOML file (`--config`); every key is optional and falls
//! back to the defaults the runner writes results with.

use crate::error::{HarnessError, Result};
use crate::tipping::DEFAULT_LATENCY_THRESHOLD_US;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canonical aggregate file written by the runner's post-processing step
pub const DEFAULT_AGGREGATE_FILE: &str = "processed_results.json";

/// Per-run result files (`perf_run_001.json`, `perf_run_20240101T0930.json`, ...)
pub const DEFAULT_RUN_FILE_PATTERN: &str = r"^perf_run_.*\.json$";

/// Configuration for loading and analyzing results
///
/// # Example
/// ```
/// use assurance_harness::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.latency_threshold_us, 100_000.0); // 100 ms
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// p99 latency above which a block size is a tipping point (microseconds)
    pub latency_threshold_us: f64,

    /// File name preferred over per-run files when present in a directory
    pub aggregate_file: String,

    /// Regex matched against file names when collecting per-run files
    pub run_file_pattern: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            latency_threshold_us: DEFAULT_LATENCY_THRESHOLD_US,
            aggregate_file: DEFAULT_AGGREGATE_FILE.to_string(),
            run_file_pattern: DEFAULT_RUN_FILE_PATTERN.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| HarnessError::Config(e.to_string()))?;
        config.validate().map_err(HarnessError::Config)?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Override the latency threshold
    #[must_use]
    pub fn with_threshold(mut self, threshold_us: f64) -> Self {
        self.latency_threshold_us = threshold_us;
        self
    }

    /// Compiled per-run file pattern
    pub fn run_file_regex(&self) -> Result<Regex> {
        Regex::new(&self.run_file_pattern).map_err(|e| {
            HarnessError::Config(format!(
                "run_file_pattern {:?} is not a valid regex: {}",
                self.run_file_pattern, e
            ))
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.latency_threshold_us.is_finite() || self.latency_threshold_us < 0.0 {
            return Err(format!(
                "latency_threshold_us must be a non-negative number, got {}",
                self.latency_threshold_us
            ));
        }

        if self.aggregate_file.trim().is_empty() {
            return Err("aggregate_file must not be empty".to_string());
        }

        if let Err(e) = Regex::new(&self.run_file_pattern) {
            return Err(format!(
                "run_file_pattern {:?} is not a valid regex: {}",
                self.run_file_pattern, e
            ));
        }

        Ok(())
    }
}
