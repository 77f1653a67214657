//! Benchmark orchestration
//!
//! Methods run one at a time, and trials within a method run one at a
//! time. The benchmarked programs contend for exclusive device and
//! network resources, so any concurrency here would corrupt both the
//! wall-clock and memory readings.

use chrono::Utc;
use tracing::{error, info};

use crate::analyze;
use crate::config::{BenchConfig, BASELINE_METHOD};
use crate::error::{HarnessError, Result};
use crate::estimate;
use crate::process;
use crate::record::Entry;
use crate::stats;
use crate::template;
use crate::timing;

/// Sequential benchmark runner over the configured methods
pub struct BenchHarness {
    config: BenchConfig,
    records: Vec<Entry>,
}

impl BenchHarness {
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    /// Benchmark every configured method in order, then fill in the
    /// comparisons against the baseline.
    ///
    /// Any trial exiting non-zero aborts the whole invocation; records
    /// accumulated so far are discarded by the caller, never persisted.
    pub fn run_all(&mut self) -> Result<&[Entry]> {
        self.records.clear();

        let methods = self.config.methods();
        let total = methods.len();
        for (index, (name, command_template)) in methods.into_iter().enumerate() {
            info!("benchmarking method {}/{}: {}", index + 1, total, name);
            let entry = self.run_method(name, command_template)?;
            self.records.push(entry);
        }

        analyze::apply_baseline(&mut self.records, BASELINE_METHOD);
        Ok(&self.records)
    }

    /// Run all trials for one method and reduce them to a record.
    fn run_method(&self, method: &str, command_template: &str) -> Result<Entry> {
        let mut times = Vec::new();
        let mut memories = Vec::new();

        for run in 0..self.config.runs {
            let command = template::render(command_template, &self.config);
            let outcome = process::run_command(&command)?;

            if !outcome.success() {
                error!(
                    method,
                    status = outcome.exit_code,
                    "benchmarked process failed: {}",
                    command
                );
                return Err(HarnessError::BenchmarkFailed {
                    method: method.to_string(),
                    command,
                    status: outcome.exit_code,
                    stderr: outcome.stderr,
                });
            }

            // A self-reported compute window beats the external wall
            // clock, which includes shell and startup overhead.
            let time_ms = timing::self_reported_ms(&outcome.stdout).unwrap_or(outcome.elapsed_ms);
            info!(method, run = run + 1, time_ms, "trial complete");

            times.push(time_ms);
            if let Some(kb) = outcome.max_rss_kb {
                memories.push(kb as f64);
            }
        }

        Ok(Entry {
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            method: method.to_string(),
            n: self.config.n,
            block: self.config.block,
            p: self.config.p,
            q: self.config.q,
            iters: self.config.iters,
            runs: self.config.runs,
            time_ms: stats::mean(&times).unwrap_or(-1.0),
            memory_usage_kb: stats::mean(&memories),
            theoretical_time_ms: estimate::theoretical_time_ms(
                self.config.n,
                self.config.peak_tflops,
            ),
            performance_difference_pct: None,
        })
    }

    /// Append all finalized records to both logs.
    pub fn write_results(&self) -> Result<()> {
        crate::record::append_jsonl(&self.config.out_jsonl, &self.records)?;
        crate::record::append_csv(&self.config.out_csv, &self.records)
    }

    pub fn records(&self) -> &[Entry] {
        &self.records
    }
}
