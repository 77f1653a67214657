//! Theoretical-throughput estimation
//!
//! Best-case execution time from algorithmic FLOP count and a
//! user-supplied peak hardware throughput figure. Recorded alongside
//! each result as an annotation; never used for validation or gating.

/// Expected best-case time in ms for a dense Cholesky factorization of
/// an `n` x `n` matrix at `peak_tflops` TFLOP/s.
///
/// The FLOP count is `n^3 / 3`. A non-positive throughput figure means
/// no estimate.
pub fn theoretical_time_ms(n: u32, peak_tflops: f64) -> Option<f64> {
    if peak_tflops <= 0.0 {
        return None;
    }
    let n = n as f64;
    let flops = n * n * n / 3.0;
    Some(flops / (peak_tflops * 1e12) * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_flop_count_formula() {
        let expected = (100.0_f64 * 100.0 * 100.0 / 3.0) / (10.0 * 1e12) * 1000.0;
        assert_eq!(theoretical_time_ms(100, 10.0), Some(expected));
    }

    #[test]
    fn non_positive_peak_yields_none() {
        assert_eq!(theoretical_time_ms(100, 0.0), None);
        assert_eq!(theoretical_time_ms(100, -1.5), None);
    }
}
