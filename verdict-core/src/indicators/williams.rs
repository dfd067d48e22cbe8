//! Williams %R.
//!
//! %R = (HH_N - close) / (HH_N - LL_N) * -100, in [-100, 0].
//! NaN when HH == LL. Lookback: period - 1.

use super::indicator::Indicator;
use super::rolling::{highest_high, lowest_low};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
    name: String,
}

impl WilliamsR {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self {
            period,
            name: Self::key(period),
        }
    }

    pub fn key(period: usize) -> String {
        format!("williams_r_{period}")
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let hh = highest_high(bars, self.period);
        let ll = lowest_low(bars, self.period);
        bars.iter()
            .enumerate()
            .map(|(i, bar)| {
                let range = hh[i] - ll[i];
                if range.is_nan() || range == 0.0 {
                    f64::NAN
                } else {
                    (hh[i] - bar.close) / range * -100.0
                }
            })
            .collect()
    }
}
