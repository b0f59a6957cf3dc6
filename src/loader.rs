//! Resolve a results path to result documents and parse them
//!
//! A path may name a single JSON file or a results directory. A directory
//! holding the canonical aggregate file is read from that file alone;
//! otherwise every per-run file is collected in lexicographic name order,
//! which approximates run order for zero-padded or timestamped names.

use crate::config::AnalysisConfig;
use crate::error::{HarnessError, Result};
use crate::record::ResultRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolve `path` to the ordered list of result documents to analyze
///
/// A missing path, a non-JSON file or a directory without matching files all
/// yield an empty list. Only an unreadable directory listing is an error.
pub fn find_result_sources(path: &Path, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        debug!(path = %path.display(), is_json, "Result path is a file");
        return Ok(if is_json {
            vec![path.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    if !path.is_dir() {
        debug!(path = %path.display(), "Result path does not exist");
        return Ok(Vec::new());
    }

    let aggregate = path.join(&config.aggregate_file);
    if aggregate.is_file() {
        debug!(path = %aggregate.display(), "Using aggregate result file");
        return Ok(vec![aggregate]);
    }

    let pattern = config.run_file_regex()?;
    let mut sources = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if pattern.is_match(name) && entry.path().is_file() {
            sources.push(entry.path());
        }
    }
    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(
        dir = %path.display(),
        pattern = %config.run_file_pattern,
        count = sources.len(),
        "Collected per-run result files"
    );
    Ok(sources)
}

/// Read and parse one result document
pub fn load_record(path: &Path) -> Result<ResultRecord> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| HarnessError::malformed(path, format!("cannot read: {}", e)))?;
    let record = ResultRecord::from_json_str(&text)
        .map_err(|e| HarnessError::malformed(path, e.to_string()))?;
    record
        .validate()
        .map_err(|reason| HarnessError::malformed(path, reason))?;
    Ok(record.with_source(path))
}

/// Load every source in order, stopping at the first malformed document
pub fn load_records(paths: &[PathBuf]) -> Result<Vec<ResultRecord>> {
    paths.iter().map(|p| load_record(p)).collect()
}

/// Resolve and load all records under `path`
///
/// Returns `NoData` when nothing resolves or every run is empty.
pub fn load_results(path: &Path, config: &AnalysisConfig) -> Result<Vec<ResultRecord>> {
    let sources = find_result_sources(path, config)?;
    if sources.is_empty() {
        return Err(HarnessError::NoData(path.to_path_buf()));
    }

    let records = load_records(&sources)?;
    if records.iter().all(ResultRecord::is_empty) {
        return Err(HarnessError::NoData(path.to_path_buf()));
    }

    info!(path = %path.display(), runs = records.len(), "Loaded result records");
    Ok(records)
}
