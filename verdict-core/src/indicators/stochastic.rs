//! Stochastic oscillator %K / %D.
//!
//! %K = 100 * (close - LL_N) / (HH_N - LL_N), NaN when HH == LL.
//! %D = trailing mean of %K over 3 bars.
//! Lookback: period - 1 for %K, period + 1 for %D.

use super::indicator::Indicator;
use super::rolling::{highest_high, lowest_low, rolling_mean};
use crate::domain::Bar;

/// Smoothing window for %D.
pub const STOCHASTIC_D_PERIOD: usize = 3;

/// Which stochastic line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize, line: StochasticLine) -> Self {
        assert!(period >= 1, "Stochastic period must be >= 1");
        Self {
            period,
            line,
            name: Self::key(period, line),
        }
    }

    pub fn key(period: usize, line: StochasticLine) -> String {
        match line {
            StochasticLine::K => format!("stoch_k_{period}"),
            StochasticLine::D => format!("stoch_d_{period}"),
        }
    }
}

/// %K series over `period` bars.
pub fn percent_k(bars: &[Bar], period: usize) -> Vec<f64> {
    let hh = highest_high(bars, period);
    let ll = lowest_low(bars, period);
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let range = hh[i] - ll[i];
            if range.is_nan() || range == 0.0 {
                f64::NAN
            } else {
                100.0 * (bar.close - ll[i]) / range
            }
        })
        .collect()
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.period - 1,
            StochasticLine::D => self.period - 1 + STOCHASTIC_D_PERIOD - 1,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let k = percent_k(bars, self.period);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => rolling_mean(&k, STOCHASTIC_D_PERIOD),
        }
    }
}
