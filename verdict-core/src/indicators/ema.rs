//! Exponential Moving Average (EMA) over an arbitrary series.
//!
//! Recursive: EMA[t] = EMA[t-1] + alpha * (x[t] - EMA[t-1]), alpha = 2/(span+1).
//! Seed: EMA equals the first defined input value (no SMA warm-up), so the
//! output is defined from the first defined input onward.
//! A NaN after the seed taints the rest of the series.

/// EMA of `values` with the given span, seeded with the first defined value.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    let Some(seed_index) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[seed_index];
    result[seed_index] = prev;

    for i in (seed_index + 1)..n {
        if values[i].is_nan() {
            return result;
        }
        prev += alpha * (values[i] - prev);
        result[i] = prev;
    }

    result
}
