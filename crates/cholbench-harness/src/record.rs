//! Benchmark records and their append-only persistence
//!
//! Each finalized record is appended to a line-delimited JSON log and a
//! parallel CSV table. Logs are append-only; a record is never mutated
//! once written. Three values are additionally duplicated under legacy
//! field names in both formats, `memory_uasge_kb` (sic) included, for
//! downstream consumers of the historical schema.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{HarnessError, Result};

/// One aggregated result: one method, one harness invocation
#[derive(Debug, Clone)]
pub struct Entry {
    /// UTC ISO-8601 creation time
    pub timestamp: String,
    pub method: String,
    pub n: u32,
    pub block: u32,
    pub p: u32,
    pub q: u32,
    pub iters: u32,
    pub runs: u32,
    /// Mean time across trials in ms
    pub time_ms: f64,
    /// Mean peak RSS across trials with available readings, in KB
    pub memory_usage_kb: Option<f64>,
    /// Best-case estimate from peak throughput, in ms
    pub theoretical_time_ms: Option<f64>,
    /// Percentage difference vs. the baseline method
    pub performance_difference_pct: Option<f64>,
}

/// Wire form of an [`Entry`]: sentinels and legacy duplicate keys are a
/// serialization concern only.
#[derive(Serialize)]
struct WireRecord<'a> {
    timestamp: &'a str,
    method: &'a str,
    n: u32,
    block: u32,
    p: u32,
    q: u32,
    iters: u32,
    runs: u32,
    time_ms: f64,
    memory_usage_kb: f64,
    #[serde(rename = "memory_uasge_kb")]
    memory_usage_kb_legacy: f64,
    theoretical_time_ms: f64,
    #[serde(rename = "theoretical_time")]
    theoretical_time_legacy: f64,
    performance_difference_pct: Option<f64>,
    #[serde(rename = "performance_difference")]
    performance_difference_legacy: Option<f64>,
}

impl<'a> From<&'a Entry> for WireRecord<'a> {
    fn from(entry: &'a Entry) -> Self {
        let memory = entry.memory_usage_kb.unwrap_or(-1.0);
        let theoretical = entry.theoretical_time_ms.unwrap_or(-1.0);
        Self {
            timestamp: &entry.timestamp,
            method: &entry.method,
            n: entry.n,
            block: entry.block,
            p: entry.p,
            q: entry.q,
            iters: entry.iters,
            runs: entry.runs,
            time_ms: entry.time_ms,
            memory_usage_kb: memory,
            memory_usage_kb_legacy: memory,
            theoretical_time_ms: theoretical,
            theoretical_time_legacy: theoretical,
            performance_difference_pct: entry.performance_difference_pct,
            performance_difference_legacy: entry.performance_difference_pct,
        }
    }
}

const CSV_HEADER: &str = "timestamp,method,n,block,p,q,iters,runs,time_ms,memory_usage_kb,\
                          memory_uasge_kb,theoretical_time_ms,theoretical_time,\
                          performance_difference_pct,performance_difference";

/// Append every entry to the line-delimited log, creating it if absent.
pub fn append_jsonl(path: &Path, entries: &[Entry]) -> Result<()> {
    let open_err = |source: io::Error| HarnessError::JsonlOpen {
        path: path.to_path_buf(),
        source,
    };

    create_parent_dir(path).map_err(open_err)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;
    let mut writer = BufWriter::new(file);

    for entry in entries {
        let line = serde_json::to_string(&WireRecord::from(entry))
            .map_err(|e| open_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        writeln!(writer, "{line}").map_err(open_err)?;
    }
    writer.flush().map_err(open_err)
}

/// Append every entry to the CSV table, writing the header only when
/// the file did not already exist.
pub fn append_csv(path: &Path, entries: &[Entry]) -> Result<()> {
    let open_err = |source: io::Error| HarnessError::CsvOpen {
        path: path.to_path_buf(),
        source,
    };

    create_parent_dir(path).map_err(open_err)?;
    let existed = path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(open_err)?;
    let mut writer = BufWriter::new(file);

    if !existed {
        writeln!(writer, "{CSV_HEADER}").map_err(open_err)?;
    }
    for entry in entries {
        writeln!(writer, "{}", csv_row(entry)).map_err(open_err)?;
    }
    writer.flush().map_err(open_err)
}

fn csv_row(entry: &Entry) -> String {
    let memory = sentinel(entry.memory_usage_kb);
    let theoretical = sentinel(entry.theoretical_time_ms);
    // Absent comparison renders as empty fields, not zero.
    let perf = entry
        .performance_difference_pct
        .map(|v| v.to_string())
        .unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        entry.timestamp,
        entry.method,
        entry.n,
        entry.block,
        entry.p,
        entry.q,
        entry.iters,
        entry.runs,
        entry.time_ms,
        memory,
        memory,
        theoretical,
        theoretical,
        perf,
        perf,
    )
}

fn sentinel(value: Option<f64>) -> String {
    value.unwrap_or(-1.0).to_string()
}

fn create_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
