//! Trailing-window helpers shared by the indicators.
//!
//! All windows are trailing and inclusive of the current bar. A window that
//! is not yet full, or that contains a NaN, yields NaN.

use crate::domain::Bar;

/// Trailing mean over `period` values.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = window.iter().sum::<f64>() / period as f64;
    }

    result
}

/// Trailing sample standard deviation (divisor `period - 1`).
///
/// `period == 1` has no sample deviation and yields NaN everywhere.
pub fn rolling_sample_std(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period < 2 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let mean = window.iter().sum::<f64>() / period as f64;
        let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (period - 1) as f64;
        result[i] = variance.sqrt();
    }

    result
}

/// Highest high over the trailing `period` bars.
pub fn highest_high(bars: &[Bar], period: usize) -> Vec<f64> {
    rolling_extreme(bars, period, |b| b.high, f64::max)
}

/// Lowest low over the trailing `period` bars.
pub fn lowest_low(bars: &[Bar], period: usize) -> Vec<f64> {
    rolling_extreme(bars, period, |b| b.low, f64::min)
}

fn rolling_extreme(
    bars: &[Bar],
    period: usize,
    field: impl Fn(&Bar) -> f64,
    pick: impl Fn(f64, f64) -> f64,
) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];
        if window.iter().any(|b| field(b).is_nan()) {
            continue;
        }
        result[i] = window
            .iter()
            .map(&field)
            .fold(field(&window[0]), &pick);
    }

    result
}

/// Midpoint of the trailing high/low range: (HH + LL) / 2.
pub fn midpoint(bars: &[Bar], period: usize) -> Vec<f64> {
    highest_high(bars, period)
        .into_iter()
        .zip(lowest_low(bars, period))
        .map(|(hh, ll)| (hh + ll) / 2.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn mean_of_window() {
        let result = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 2);
        assert!(result[0].is_nan());
        assert_approx(result[1], 1.5, DEFAULT_EPSILON);
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn mean_skips_windows_with_nan() {
        let result = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0], 2);
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert_approx(result[3], 3.5, DEFAULT_EPSILON);
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        // [2, 4, 6]: mean 4, squared deviations 4+0+4 = 8, / 2 = 4, sqrt = 2
        let result = rolling_sample_std(&[2.0, 4.0, 6.0], 3);
        assert_approx(result[2], 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sample_std_period_one_is_undefined() {
        let result = rolling_sample_std(&[2.0, 4.0, 6.0], 1);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn extremes_and_midpoint() {
        // make_bars: high = max(open, close) + 1, low = min(open, close) - 1
        let bars = make_bars(&[10.0, 12.0, 11.0]);
        let hh = highest_high(&bars, 2);
        let ll = lowest_low(&bars, 2);
        assert!(hh[0].is_nan());
        assert_approx(hh[1], 13.0, DEFAULT_EPSILON);
        assert_approx(ll[1], 9.0, DEFAULT_EPSILON);
        assert_approx(hh[2], 13.0, DEFAULT_EPSILON);
        assert_approx(ll[2], 9.0, DEFAULT_EPSILON);
        assert_approx(midpoint(&bars, 2)[2], 11.0, DEFAULT_EPSILON);
    }
}
