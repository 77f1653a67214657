//! Cholbench orchestration library
//!
//! This crate drives external, independently built Cholesky solver
//! binaries through repeated measured trials:
//! - command templating against the run configuration
//! - shell execution with stream capture and rusage accounting
//! - self-reported timing extraction from solver stdout
//! - multi-run aggregation and baseline comparison
//! - theoretical best-case estimation from peak throughput
//! - append-only JSONL and CSV persistence
//!
//! Execution is strictly sequential; the solvers own exclusive
//! accelerator and MPI resources, so nothing here runs concurrently.

pub mod analyze;
pub mod config;
pub mod error;
pub mod estimate;
pub mod process;
pub mod record;
pub mod runner;
pub mod stats;
pub mod template;
pub mod timing;

pub use config::{BenchConfig, BASELINE_METHOD};
pub use error::{HarnessError, Result};
pub use process::CommandOutcome;
pub use record::Entry;
pub use runner::BenchHarness;
