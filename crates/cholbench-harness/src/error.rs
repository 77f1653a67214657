//! Error types for the benchmark harness

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Errors that can occur while orchestrating a benchmark run
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Invalid or missing configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Could not create the temporary files that capture the child's streams
    #[error("failed to create capture file: {0}")]
    CaptureFile(#[source] io::Error),

    /// The shell hosting the benchmarked command could not be spawned
    #[error("failed to spawn shell for `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// Waiting on the child process failed
    #[error("wait4 failed for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A benchmarked method's process exited non-zero
    #[error("method `{method}` exited with status {status}: {command}")]
    BenchmarkFailed {
        method: String,
        command: String,
        status: i32,
        stderr: String,
    },

    /// The line-delimited results log could not be opened for append
    #[error("failed to open results log {path}: {source}")]
    JsonlOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tabular results log could not be opened for append
    #[error("failed to open results table {path}: {source}")]
    CsvOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HarnessError {
    /// Process exit code associated with this error.
    ///
    /// Host-environment failures (capture files, spawn, wait) share the
    /// general fatal code 1; they indicate a broken host, not a slow or
    /// broken benchmarked program.
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::Config(_)
            | HarnessError::CaptureFile(_)
            | HarnessError::Spawn { .. }
            | HarnessError::Wait { .. } => 1,
            HarnessError::BenchmarkFailed { .. } => 2,
            HarnessError::JsonlOpen { .. } => 3,
            HarnessError::CsvOpen { .. } => 4,
        }
    }
}
