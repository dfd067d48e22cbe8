//! Volatility family: annualized return volatility and ATR%.
//!
//! - Volatility: sample stddev of close-to-close returns over `period`,
//!   scaled by sqrt(252) * 100.
//! - ATR%: simple mean of True Range over `period`, as a percentage of close.
//!
//! Lookback: period (the first return exists at bar 1).

use super::atr::true_range;
use super::indicator::Indicator;
use super::rolling::{rolling_mean, rolling_sample_std};
use crate::domain::Bar;

/// Trading periods per year used for annualization.
pub const ANNUALIZATION_PERIODS: f64 = 252.0;

/// Which volatility line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolatilityLine {
    Volatility,
    AtrPercent,
}

#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    line: VolatilityLine,
    name: String,
}

impl Volatility {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize, line: VolatilityLine) -> Self {
        assert!(period >= 1, "volatility period must be >= 1");
        Self {
            period,
            line,
            name: Self::key(period, line),
        }
    }

    pub fn key(period: usize, line: VolatilityLine) -> String {
        match line {
            VolatilityLine::Volatility => format!("volatility_{period}"),
            VolatilityLine::AtrPercent => format!("atr_pct_{period}"),
        }
    }
}

/// Close-to-close simple returns; bar 0 and a zero previous close are NaN.
pub fn simple_returns(bars: &[Bar]) -> Vec<f64> {
    let mut returns = vec![f64::NAN; bars.len()];
    for i in 1..bars.len() {
        let prev = bars[i - 1].close;
        if prev != 0.0 {
            returns[i] = bars[i].close / prev - 1.0;
        }
    }
    returns
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.line {
            VolatilityLine::Volatility => {
                let scale = ANNUALIZATION_PERIODS.sqrt() * 100.0;
                rolling_sample_std(&simple_returns(bars), self.period)
                    .into_iter()
                    .map(|s| s * scale)
                    .collect()
            }
            VolatilityLine::AtrPercent => rolling_mean(&true_range(bars), self.period)
                .into_iter()
                .zip(bars)
                .map(|(atr, bar)| {
                    if bar.close == 0.0 {
                        f64::NAN
                    } else {
                        atr / bar.close * 100.0
                    }
                })
                .collect(),
        }
    }
}
