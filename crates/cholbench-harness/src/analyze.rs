//! Comparative analysis against the baseline method

use crate::record::Entry;

/// Fill in each record's percentage timing difference relative to the
/// record named `baseline`.
///
/// The baseline's mean time is captured before any record is mutated, so
/// no aliasing into the record list is needed. When the baseline record
/// is missing, or its mean time is not strictly positive, every
/// comparison stays absent. The baseline never receives a
/// self-comparison.
pub fn apply_baseline(entries: &mut [Entry], baseline: &str) {
    let baseline_time = entries
        .iter()
        .find(|entry| entry.method == baseline)
        .map(|entry| entry.time_ms)
        .filter(|time| *time > 0.0);

    let Some(base) = baseline_time else {
        return;
    };

    for entry in entries.iter_mut().filter(|entry| entry.method != baseline) {
        entry.performance_difference_pct = Some((entry.time_ms - base) / base * 100.0);
    }
}
