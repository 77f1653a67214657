//! End-to-end tests for the cholbench binary
//!
//! The benchmarked "solvers" are stub shell commands, so these tests
//! exercise the full pipeline: templating, shell execution, stream
//! capture, timing override, aggregation, baseline comparison, and
//! both persistence formats.

use assert_cmd::Command;
use predicates::prelude::*;

const STUB_OK: &str = r#"printf '{"time_ms": 5.0}'"#;

fn cholbench() -> Command {
    Command::cargo_bin("cholbench").expect("binary under test")
}

#[test]
fn stub_solvers_produce_three_records_with_reported_timing() {
    let dir = tempfile::tempdir().unwrap();
    let jsonl = dir.path().join("results.jsonl");
    let csv = dir.path().join("results.csv");

    cholbench()
        .args(["--n", "512", "--runs", "2"])
        .args(["--hip-cmd", STUB_OK])
        .args(["--roc-cmd", STUB_OK])
        .args(["--scalapack-cmd", STUB_OK])
        .arg("--out-jsonl")
        .arg(&jsonl)
        .arg("--out-csv")
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"status":"ok","results":3}"#));

    let lines: Vec<String> = std::fs::read_to_string(&jsonl)
        .unwrap()
        .lines()
        .map(String::from)
        .collect();
    assert_eq!(lines.len(), 3);

    let methods: Vec<String> = lines
        .iter()
        .map(|line| {
            let record: serde_json::Value = serde_json::from_str(line).unwrap();
            // Self-reported timing wins regardless of actual wall-clock overhead.
            assert_eq!(record["time_ms"], 5.0);
            assert_eq!(record["runs"], 2);
            assert_eq!(record["n"], 512);
            record["method"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(methods, vec!["hipsolver", "rocsolver", "scalapack"]);

    let table = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(table.lines().count(), 4);
    assert!(table.starts_with("timestamp,method,"));
}

#[test]
fn baseline_comparison_flows_through_to_the_logs() {
    let dir = tempfile::tempdir().unwrap();
    let jsonl = dir.path().join("results.jsonl");

    cholbench()
        .args(["--n", "100", "--p", "2", "--q", "3"])
        .args(["--hip-cmd", STUB_OK])
        .args(["--roc-cmd", STUB_OK])
        // {np} renders as p*q = 6, so the baseline reports 6.0 ms.
        .args(["--scalapack-cmd", r#"printf '{"time_ms": {np}.0}'"#])
        .arg("--out-jsonl")
        .arg(&jsonl)
        .arg("--out-csv")
        .arg(dir.path().join("results.csv"))
        .assert()
        .success();

    let contents = std::fs::read_to_string(&jsonl).unwrap();
    for line in contents.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        match record["method"].as_str().unwrap() {
            "scalapack" => {
                assert_eq!(record["time_ms"], 6.0);
                assert!(record["performance_difference_pct"].is_null());
                assert!(record["performance_difference"].is_null());
            }
            _ => {
                // (5.0 - 6.0) / 6.0 * 100
                let pct = record["performance_difference_pct"].as_f64().unwrap();
                assert!((pct - (-100.0 / 6.0)).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn failing_method_exits_two_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let jsonl = dir.path().join("results.jsonl");
    let csv = dir.path().join("results.csv");

    cholbench()
        .args(["--n", "512"])
        .args(["--hip-cmd", STUB_OK])
        .args(["--roc-cmd", "echo device lost >&2; exit 1"])
        .args(["--scalapack-cmd", STUB_OK])
        .arg("--out-jsonl")
        .arg(&jsonl)
        .arg("--out-csv")
        .arg(&csv)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("device lost"));

    assert!(!jsonl.exists());
    assert!(!csv.exists());
}

#[test]
fn missing_n_is_an_argument_error() {
    cholbench().assert().code(1);
}

#[test]
fn zero_n_is_an_argument_error() {
    cholbench().args(["--n", "0"]).assert().code(1);
}

#[test]
fn csv_header_is_not_duplicated_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let jsonl = dir.path().join("results.jsonl");
    let csv = dir.path().join("results.csv");

    for _ in 0..2 {
        cholbench()
            .args(["--n", "256"])
            .args(["--hip-cmd", STUB_OK])
            .args(["--roc-cmd", STUB_OK])
            .args(["--scalapack-cmd", STUB_OK])
            .arg("--out-jsonl")
            .arg(&jsonl)
            .arg("--out-csv")
            .arg(&csv)
            .assert()
            .success();
    }

    let table = std::fs::read_to_string(&csv).unwrap();
    let headers = table
        .lines()
        .filter(|line| line.starts_with("timestamp,method"))
        .count();
    assert_eq!(headers, 1);
    assert_eq!(table.lines().count(), 7);

    let log = std::fs::read_to_string(&jsonl).unwrap();
    assert_eq!(log.lines().count(), 6);
}

#[test]
fn legacy_duplicate_keys_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let jsonl = dir.path().join("results.jsonl");

    cholbench()
        .args(["--n", "128", "--peak-tflops", "10"])
        .args(["--hip-cmd", STUB_OK])
        .args(["--roc-cmd", STUB_OK])
        .args(["--scalapack-cmd", STUB_OK])
        .arg("--out-jsonl")
        .arg(&jsonl)
        .arg("--out-csv")
        .arg(dir.path().join("results.csv"))
        .assert()
        .success();

    let contents = std::fs::read_to_string(&jsonl).unwrap();
    let record: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();

    assert_eq!(record["memory_usage_kb"], record["memory_uasge_kb"]);
    assert_eq!(record["theoretical_time_ms"], record["theoretical_time"]);

    let expected = (128.0_f64.powi(3) / 3.0) / (10.0 * 1e12) * 1000.0;
    assert!((record["theoretical_time_ms"].as_f64().unwrap() - expected).abs() < 1e-12);
}
