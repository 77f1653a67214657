//! Benchmark configuration
//!
//! Parsed once at startup by the CLI and read-only from then on.

use std::path::PathBuf;

use crate::error::{HarnessError, Result};

/// Name of the method every other method is compared against.
pub const BASELINE_METHOD: &str = "scalapack";

/// Immutable per-invocation settings for one benchmark run
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Problem size (matrix dimension), must be positive
    pub n: u32,

    /// Block size for the distributed factorization
    pub block: u32,

    /// Process-grid rows
    pub p: u32,

    /// Process-grid columns
    pub q: u32,

    /// Factorization iterations per solver invocation
    pub iters: u32,

    /// Repeated trials per method
    pub runs: u32,

    /// Peak hardware throughput in TFLOP/s; non-positive disables the
    /// theoretical estimate
    pub peak_tflops: f64,

    /// Command template for the hipSOLVER backend
    pub hip_cmd: String,

    /// Command template for the rocSOLVER backend
    pub roc_cmd: String,

    /// Command template for the ScaLAPACK baseline
    pub scalapack_cmd: String,

    /// Line-delimited results log path
    pub out_jsonl: PathBuf,

    /// Tabular results log path
    pub out_csv: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            n: 0,
            block: 256,
            p: 1,
            q: 1,
            iters: 3,
            runs: 1,
            peak_tflops: 0.0,
            hip_cmd: "./build/hip_cholesky --n {n} --iters {iters}".to_string(),
            roc_cmd: "./build/roc_cholesky --n {n} --iters {iters}".to_string(),
            scalapack_cmd: "mpirun -np {np} ./build/scalapack_cholesky --n {n} --nb {block} \
                            --p {p} --q {q} --iters {iters}"
                .to_string(),
            out_jsonl: PathBuf::from("output/bench_results.jsonl"),
            out_csv: PathBuf::from("output/bench_results.csv"),
        }
    }
}

impl BenchConfig {
    /// Validate settings that clap cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(HarnessError::Config("--n is required and must be > 0".into()));
        }
        Ok(())
    }

    /// The benchmarked methods in execution order, each with its template.
    pub fn methods(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("hipsolver", self.hip_cmd.as_str()),
            ("rocsolver", self.roc_cmd.as_str()),
            (BASELINE_METHOD, self.scalapack_cmd.as_str()),
        ]
    }
}
