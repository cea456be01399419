//! Small descriptive statistics used by the adaptive thresholds.
//!
//! Values closer than [`VALUE_EPSILON`] are treated as equal when counting
//! frequencies, so float noise in upstream coordinates does not split a mode.

use crate::utils::safe_float_cmp;

/// Two values closer than this count as the same value.
pub const VALUE_EPSILON: f32 = 0.005;

/// Most frequent value.
///
/// Ties between equally frequent values break to the smaller value. Returns
/// `None` for an empty slice, and also when there is more than one value and
/// none of them repeats: such data has no meaningful mode.
pub fn mode(values: &[f32]) -> Option<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| safe_float_cmp(*a, *b));

    let mut best_value = sorted[0];
    let mut best_count = 0usize;
    let mut run_start = 0usize;

    for i in 1..=sorted.len() {
        let run_ends = i == sorted.len() || (sorted[i] - sorted[run_start]).abs() >= VALUE_EPSILON;
        if run_ends {
            let count = i - run_start;
            // Strictly greater keeps the smaller value on ties (ascending scan)
            if count > best_count {
                best_count = count;
                best_value = sorted[run_start];
            }
            run_start = i;
        }
    }

    if best_count == 1 && sorted.len() > 1 {
        return None;
    }
    Some(best_value)
}

/// Median value; the mean of the two middle values for an even count.
pub fn median(values: &[f32]) -> Option<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| safe_float_cmp(*a, *b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Mode, falling back to the median when no mode exists.
pub fn mode_or_median(values: &[f32]) -> Option<f32> {
    mode(values).or_else(|| median(values))
}

/// Arithmetic mean.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Sample standard deviation (n − 1 denominator); 0 for fewer than two values.
pub fn sample_stdev(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = values.iter().sum::<f32>() / values.len() as f32;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f32>() / (values.len() - 1) as f32;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_single_winner() {
        assert_eq!(mode(&[12.0, 20.0, 12.0, 12.0, 9.0]), Some(12.0));
    }

    #[test]
    fn test_mode_tie_breaks_to_smaller() {
        assert_eq!(mode(&[20.0, 12.0, 20.0, 12.0]), Some(12.0));
        assert_eq!(mode(&[3.0, 3.0, 1.0, 1.0, 2.0, 2.0]), Some(1.0));
    }

    #[test]
    fn test_mode_absent_when_all_unique() {
        assert_eq!(mode(&[1.0, 2.0, 3.0]), None);
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn test_mode_single_value() {
        assert_eq!(mode(&[7.5]), Some(7.5));
    }

    #[test]
    fn test_mode_absorbs_float_noise() {
        assert_eq!(mode(&[12.0, 12.001, 14.0]), Some(12.0));
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_mode_or_median_fallback() {
        assert_eq!(mode_or_median(&[10.0, 11.0, 14.0, 20.0]), Some(12.5));
        assert_eq!(mode_or_median(&[10.0, 10.0, 14.0]), Some(10.0));
    }

    #[test]
    fn test_mean_and_stdev() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_stdev(&[5.0]), 0.0);
        let sd = sample_stdev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - 2.138).abs() < 0.01);
    }
}
