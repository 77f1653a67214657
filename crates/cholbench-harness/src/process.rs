//! External process execution and measurement
//!
//! Runs one rendered command through the system shell, capturing both
//! output streams into scoped temporary files and recording wall-clock
//! time plus the child's peak resident set size. The child is reaped
//! with `wait4` so the kernel's resource accounting for it (and any
//! descendants it waited on) comes back with the exit status.

use std::io;
use std::process::{Command, Stdio};
use std::time::Instant;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{HarnessError, Result};

/// Raw outcome of one subprocess invocation
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Exit status; -1 when the child was terminated by a signal
    pub exit_code: i32,

    /// Externally measured wall-clock time, spawn to exit, in ms
    pub elapsed_ms: f64,

    /// Peak resident set size of the child in KB, when available
    pub max_rss_kb: Option<i64>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Execute `command` under `sh -c`, blocking until it exits.
///
/// Shell execution is deliberate: user-supplied templates may contain
/// pipelines, redirection, and environment expansion. The capture files
/// are `NamedTempFile`s, removed on drop on every exit path.
pub fn run_command(command: &str) -> Result<CommandOutcome> {
    let stdout_file = NamedTempFile::new().map_err(HarnessError::CaptureFile)?;
    let stderr_file = NamedTempFile::new().map_err(HarnessError::CaptureFile)?;

    let stdout_handle = stdout_file.reopen().map_err(HarnessError::CaptureFile)?;
    let stderr_handle = stderr_file.reopen().map_err(HarnessError::CaptureFile)?;

    debug!(command, "spawning benchmarked command");

    let start = Instant::now();
    let child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_handle))
        .stderr(Stdio::from(stderr_handle))
        .spawn()
        .map_err(|source| HarnessError::Spawn {
            command: command.to_string(),
            source,
        })?;

    let (status, usage) = wait_with_usage(child.id() as libc::pid_t).map_err(|source| {
        HarnessError::Wait {
            command: command.to_string(),
            source,
        }
    })?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    let stdout = read_capture(&stdout_file);
    let stderr = read_capture(&stderr_file);

    let exit_code = if libc::WIFEXITED(status) {
        libc::WEXITSTATUS(status)
    } else {
        -1
    };

    Ok(CommandOutcome {
        exit_code,
        elapsed_ms,
        max_rss_kb: max_rss_kb(&usage),
        stdout,
        stderr,
    })
}

/// Reap `pid` with `wait4`, retrying on EINTR.
fn wait_with_usage(pid: libc::pid_t) -> io::Result<(libc::c_int, libc::rusage)> {
    let mut status: libc::c_int = 0;
    // SAFETY: rusage is plain old data; an all-zero value is valid.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    loop {
        // SAFETY: pid refers to a child we just spawned and have not yet
        // reaped; status and usage point to stack storage we own.
        let rc = unsafe { libc::wait4(pid, &mut status, 0, &mut usage) };
        if rc >= 0 {
            return Ok((status, usage));
        }
        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(libc::EINTR) {
            return Err(err);
        }
    }
}

/// Peak RSS in KB. Linux reports ru_maxrss in KB, macOS in bytes.
fn max_rss_kb(usage: &libc::rusage) -> Option<i64> {
    let raw = usage.ru_maxrss as i64;
    if raw < 0 {
        return None;
    }
    if cfg!(target_os = "macos") {
        Some(raw / 1024)
    } else {
        Some(raw)
    }
}

fn read_capture(file: &NamedTempFile) -> String {
    match std::fs::read(file.path()) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}
