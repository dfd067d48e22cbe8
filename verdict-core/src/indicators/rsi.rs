//! Relative Strength Index (RSI).
//!
//! Simple trailing means of gains and losses over the last `period` close
//! deltas (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (the first delta exists at bar 1).
//! Edge cases: avg_loss == 0 with gains → 100; no movement at all → NaN.

use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: Self::key(period),
        }
    }

    pub fn key(period: usize) -> String {
        format!("rsi_{period}")
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        let mut changes = vec![f64::NAN; n];
        for i in 1..n {
            changes[i] = bars[i].close - bars[i - 1].close;
        }

        for i in self.period..n {
            let window = &changes[i + 1 - self.period..=i];
            if window.iter().any(|ch| ch.is_nan()) {
                continue;
            }
            let gain: f64 = window.iter().filter(|&&ch| ch > 0.0).sum();
            let loss: f64 = window.iter().filter(|&&ch| ch < 0.0).map(|ch| -ch).sum();
            result[i] = compute_rsi(gain / self.period as f64, loss / self.period as f64);
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        f64::NAN
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
