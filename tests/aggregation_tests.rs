// Aggregation and tipping-point scenarios against the public library API

use assurance_harness::loader::{find_result_sources, load_records};
use assurance_harness::config::AnalysisConfig;
use assurance_harness::{
    aggregate, detect_tipping_points, Metadata, ResultRecord, DEFAULT_LATENCY_THRESHOLD_US,
};
use std::path::PathBuf;

fn assert_close(actual: f64, expected: f64) {
    let tol = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tol,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn block_sizes(records: &[ResultRecord]) -> Vec<String> {
    aggregate(records)
        .unwrap()
        .efficiency
        .into_iter()
        .map(|r| r.block_size)
        .collect()
}

/// Two repeated runs at two concurrency levels
#[test]
fn test_two_runs_mean_and_sample_std() {
    let first = ResultRecord::default()
        .with_capability(1, 100.0)
        .with_capability(2, 200.0);
    let second = ResultRecord::default()
        .with_capability(1, 120.0)
        .with_capability(2, 180.0);

    let agg = aggregate(&[first, second]).unwrap();
    assert_eq!(agg.capability.len(), 2);
    assert_eq!(agg.capability[0].threads, 1);
    assert_close(agg.capability[0].ops_per_sec_mean, 110.0);
    assert_close(agg.capability[0].ops_per_sec_std, 14.142135623730951);
    assert_eq!(agg.capability[1].threads, 2);
    assert_close(agg.capability[1].ops_per_sec_mean, 190.0);
    assert_close(agg.capability[1].ops_per_sec_std, 14.142135623730951);
}

/// Only the block size above 100 ms is a tipping point
#[test]
fn test_single_run_tipping_point() {
    let record = ResultRecord::default()
        .with_efficiency("4k", 100.0, 50_000.0)
        .with_efficiency("64k", 400.0, 150_000.0);

    let agg = aggregate(&[record]).unwrap();
    let flagged = detect_tipping_points(&agg.efficiency, 100_000.0);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].block_size, "64k");
}

#[test]
fn test_empty_input_yields_empty_tables() {
    let agg = aggregate(&[]).unwrap();
    assert!(agg.capability.is_empty());
    assert!(agg.efficiency.is_empty());
    assert_eq!(agg.metadata, Metadata::new());
}

#[test]
fn test_empty_efficiency_sweep_still_aggregates_capability() {
    let records = vec![
        ResultRecord::default().with_capability(4, 400.0),
        ResultRecord::default()
            .with_capability(4, 440.0)
            .with_efficiency("4k", 10.0, 100.0),
    ];
    let agg = aggregate(&records).unwrap();
    assert_close(agg.capability[0].ops_per_sec_mean, 420.0);
    assert_eq!(agg.efficiency.len(), 1);
    assert_eq!(agg.efficiency[0].samples, 1);
    assert_eq!(agg.efficiency[0].bw_mib_s_std, 0.0);
}

#[test]
fn test_capability_rows_independent_of_record_order() {
    let a = ResultRecord::default()
        .with_capability(8, 80.0)
        .with_capability(1, 10.0);
    let b = ResultRecord::default()
        .with_capability(2, 20.0)
        .with_capability(1, 12.0);
    let c = ResultRecord::default().with_capability(8, 88.0);

    let forward = aggregate(&[a.clone(), b.clone(), c.clone()]).unwrap();
    let reversed = aggregate(&[c, b, a]).unwrap();
    assert_eq!(forward.capability, reversed.capability);
}

#[test]
fn test_efficiency_order_stable_with_same_first_record() {
    let a = ResultRecord::default()
        .with_efficiency("4k", 1.0, 1.0)
        .with_efficiency("64k", 2.0, 2.0);
    let b = ResultRecord::default()
        .with_efficiency("64k", 3.0, 3.0)
        .with_efficiency("1m", 4.0, 4.0);
    let c = ResultRecord::default().with_efficiency("1m", 5.0, 5.0);

    assert_eq!(
        block_sizes(&[a.clone(), b.clone(), c.clone()]),
        block_sizes(&[a, c, b])
    );
}

#[test]
fn test_efficiency_order_follows_first_occurrence() {
    let a = ResultRecord::default()
        .with_efficiency("4k", 1.0, 1.0)
        .with_efficiency("64k", 2.0, 2.0);
    let b = ResultRecord::default()
        .with_efficiency("64k", 3.0, 3.0)
        .with_efficiency("4k", 4.0, 4.0);

    assert_eq!(block_sizes(&[a.clone(), b.clone()]), vec!["4k", "64k"]);
    assert_eq!(block_sizes(&[b, a]), vec!["64k", "4k"]);
}

#[test]
fn test_default_threshold_boundary() {
    let record = ResultRecord::default()
        .with_efficiency("16k", 1.0, DEFAULT_LATENCY_THRESHOLD_US)
        .with_efficiency("32k", 1.0, DEFAULT_LATENCY_THRESHOLD_US + 0.1);
    let agg = aggregate(&[record]).unwrap();
    let flagged = detect_tipping_points(&agg.efficiency, DEFAULT_LATENCY_THRESHOLD_US);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].block_size, "32k");
}

#[test]
fn test_fixture_directory_end_to_end() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/two_runs");
    let sources = find_result_sources(&dir, &AnalysisConfig::default()).unwrap();
    assert_eq!(sources.len(), 2);

    let records = load_records(&sources).unwrap();
    let agg = aggregate(&records).unwrap();
    assert_eq!(agg.metadata.label(), "IBM Z Mainframe");
    assert_eq!(agg.runs.complete, 2);

    let threads: Vec<u32> = agg.capability.iter().map(|r| r.threads).collect();
    assert_eq!(threads, vec![1, 2]);
    assert_close(agg.efficiency[1].p99_lat_us_mean, 155_000.0);
    assert_close(agg.efficiency[1].p99_lat_us_std, 50_000_000.0_f64.sqrt());
}
