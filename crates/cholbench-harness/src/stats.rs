//! Series reduction helpers

/// Arithmetic mean of a series; `None` for the empty series.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_series() {
        assert_eq!(mean(&[10.0, 20.0, 30.0]), Some(20.0));
        assert_eq!(mean(&[5.0]), Some(5.0));
    }

    #[test]
    fn empty_series_has_no_mean() {
        assert_eq!(mean(&[]), None);
    }
}
