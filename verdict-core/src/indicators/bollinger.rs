//! Bollinger Bands: moving average +/- a multiple of the standard deviation.
//!
//! Four lines (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + deviation * stddev(close, period)
//! - Lower: middle - deviation * stddev(close, period)
//! - Position: (close - lower) / (upper - lower), NaN on zero width
//!
//! Uses sample stddev (divide by N-1); period 1 leaves the bands undefined.
//! Lookback: period - 1.

use super::indicator::Indicator;
use super::rolling::{rolling_mean, rolling_sample_std};
use crate::domain::Bar;

/// Which Bollinger line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    Position,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    deviation: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    /// # Panics
    ///
    /// Panics if `period` is zero or `deviation` is negative or not finite.
    pub fn new(period: usize, deviation: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(
            deviation.is_finite() && deviation >= 0.0,
            "Bollinger deviation must be finite and non-negative"
        );
        Self {
            period,
            deviation,
            band,
            name: Self::key(period, deviation, band),
        }
    }

    pub fn key(period: usize, deviation: f64, band: BollingerBand) -> String {
        let prefix = match band {
            BollingerBand::Upper => "bb_upper",
            BollingerBand::Middle => "bb_middle",
            BollingerBand::Lower => "bb_lower",
            BollingerBand::Position => "bb_position",
        };
        format!("{prefix}_{period}_{deviation}")
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let middle = rolling_mean(&closes, self.period);
        if self.band == BollingerBand::Middle {
            return middle;
        }

        let std = rolling_sample_std(&closes, self.period);
        let offset = |i: usize| self.deviation * std[i];

        (0..closes.len())
            .map(|i| match self.band {
                BollingerBand::Upper => middle[i] + offset(i),
                BollingerBand::Lower => middle[i] - offset(i),
                BollingerBand::Middle => middle[i],
                BollingerBand::Position => {
                    let upper = middle[i] + offset(i);
                    let lower = middle[i] - offset(i);
                    let width = upper - lower;
                    if width.is_nan() || width == 0.0 {
                        f64::NAN
                    } else {
                        (closes[i] - lower) / width
                    }
                }
            })
            .collect()
    }
}
