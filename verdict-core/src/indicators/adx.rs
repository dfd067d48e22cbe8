//! ADX: Average Directional Index (Wilder), with +DI and -DI.
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Lookback: period for the DI lines, 2 * period - 1 for ADX.

use super::atr::{true_range, wilder_smooth};
use super::indicator::Indicator;
use crate::domain::Bar;

/// Which ADX-family line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    line: AdxLine,
    name: String,
}

impl Adx {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize, line: AdxLine) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self {
            period,
            line,
            name: Self::key(period, line),
        }
    }

    pub fn key(period: usize, line: AdxLine) -> String {
        match line {
            AdxLine::Adx => format!("adx_{period}"),
            AdxLine::PlusDi => format!("plus_di_{period}"),
            AdxLine::MinusDi => format!("minus_di_{period}"),
        }
    }
}

struct DirectionalLines {
    plus_di: Vec<f64>,
    minus_di: Vec<f64>,
}

fn directional_lines(bars: &[Bar], period: usize) -> DirectionalLines {
    let n = bars.len();
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let high_diff = bars[i].high - bars[i - 1].high;
        let low_diff = bars[i - 1].low - bars[i].low;
        if high_diff.is_nan() || low_diff.is_nan() {
            continue;
        }

        plus_dm[i] = if high_diff > low_diff && high_diff > 0.0 {
            high_diff
        } else {
            0.0
        };
        minus_dm[i] = if low_diff > high_diff && low_diff > 0.0 {
            low_diff
        } else {
            0.0
        };
    }

    let smooth_tr = wilder_smooth(&true_range(bars), period);
    let smooth_plus = wilder_smooth(&plus_dm, period);
    let smooth_minus = wilder_smooth(&minus_dm, period);

    let mut plus_di = vec![f64::NAN; n];
    let mut minus_di = vec![f64::NAN; n];
    for i in 0..n {
        let tr = smooth_tr[i];
        if tr.is_nan() || smooth_plus[i].is_nan() || smooth_minus[i].is_nan() || tr == 0.0 {
            continue;
        }
        plus_di[i] = 100.0 * smooth_plus[i] / tr;
        minus_di[i] = 100.0 * smooth_minus[i] / tr;
    }

    DirectionalLines { plus_di, minus_di }
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            AdxLine::Adx => 2 * self.period - 1,
            AdxLine::PlusDi | AdxLine::MinusDi => self.period,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let DirectionalLines { plus_di, minus_di } = directional_lines(bars, self.period);
        match self.line {
            AdxLine::PlusDi => plus_di,
            AdxLine::MinusDi => minus_di,
            AdxLine::Adx => {
                let dx: Vec<f64> = plus_di
                    .iter()
                    .zip(&minus_di)
                    .map(|(&p, &m)| {
                        let sum = p + m;
                        if sum.is_nan() {
                            f64::NAN
                        } else if sum == 0.0 {
                            0.0
                        } else {
                            100.0 * (p - m).abs() / sum
                        }
                    })
                    .collect();
                wilder_smooth(&dx, self.period)
            }
        }
    }
}
