//! Self-reported timing extraction
//!
//! Benchmarked programs may print a structured `"time_ms": <number>`
//! field on standard output. When present it is trusted over the
//! externally measured wall clock, which includes shell and process
//! startup overhead the solver's own compute window does not.

use std::sync::OnceLock;

use regex::Regex;

fn time_ms_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#""time_ms"\s*:\s*([0-9]+(?:\.[0-9]+)?)"#)
            .unwrap_or_else(|e| panic!("invalid time_ms pattern: {e}"))
    })
}

/// Extract the self-reported time from captured stdout, if any.
///
/// Absent or malformed fields yield `None`; extraction never fails a run.
pub fn self_reported_ms(stdout: &str) -> Option<f64> {
    let captures = time_ms_pattern().captures(stdout)?;
    captures.get(1)?.as_str().parse::<f64>().ok()
}
