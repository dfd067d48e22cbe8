//! Volatility classifier.
//!
//! Compares each bar's volatility with the mean over the whole series, so a
//! verdict can change when later bars are appended. Rules:
//! 1. vol > 1.5 m and close > close 5 bars ago → buy
//! 2. vol > 1.5 m and close < close 5 bars ago → sell
//! 3. vol < 0.7 m → hold
//! 4. ATR% above its series mean → buy
//! 5. otherwise hold
//!
//! A missing close 5 bars back only disables rules 1 and 2.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::indicator::mean_defined;
use crate::indicators::{IndicatorValues, Volatility, VolatilityLine};

pub const HIGH_VOLATILITY_RATIO: f64 = 1.5;
pub const LOW_VOLATILITY_RATIO: f64 = 0.7;
/// Bars back for the momentum check under high volatility.
pub const MOMENTUM_LAG: usize = 5;

#[derive(Debug, Clone)]
pub struct VolatilityClassifier {
    pub period: usize,
    vol_key: String,
    atr_pct_key: String,
}

/// Series-wide reference levels.
#[derive(Debug, Clone, Copy)]
struct SeriesMeans {
    volatility: f64,
    atr_pct: f64,
}

impl VolatilityClassifier {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            vol_key: Volatility::key(period, VolatilityLine::Volatility),
            atr_pct_key: Volatility::key(period, VolatilityLine::AtrPercent),
        }
    }

    fn means(&self, indicators: &IndicatorValues) -> SeriesMeans {
        let of = |key: &str| indicators.get_series(key).map_or(f64::NAN, mean_defined);
        SeriesMeans {
            volatility: of(&self.vol_key),
            atr_pct: of(&self.atr_pct_key),
        }
    }

    fn classify_with(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        means: SeriesMeans,
    ) -> IndicatorVerdict {
        let (Some(vol), Some(atr_pct)) = (
            indicators.defined(&self.vol_key, bar_index),
            indicators.defined(&self.atr_pct_key, bar_index),
        ) else {
            return IndicatorVerdict::no_data(self.kind());
        };
        if means.volatility.is_nan() || means.atr_pct.is_nan() {
            return IndicatorVerdict::no_data(self.kind());
        }

        let close = bars[bar_index].close;
        let lagged = bar_index
            .checked_sub(MOMENTUM_LAG)
            .map(|i| bars[i].close);
        let high_vol = vol > HIGH_VOLATILITY_RATIO * means.volatility;

        let (verdict, reading) = match lagged {
            Some(past) if high_vol && close > past => (Verdict::Buy, "high volatility, rising"),
            Some(past) if high_vol && close < past => (Verdict::Sell, "high volatility, falling"),
            _ if vol < LOW_VOLATILITY_RATIO * means.volatility => {
                (Verdict::Hold, "low volatility")
            }
            _ if atr_pct > means.atr_pct => (Verdict::Buy, "ATR% above average"),
            _ => (Verdict::Hold, "normal volatility"),
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            vol,
            format!(
                "volatility {vol:.1}% vs mean {:.1}% ATR% {atr_pct:.2} (period {}) - {reading}",
                means.volatility, self.period
            ),
        )
    }
}

impl Classifier for VolatilityClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Volatility
    }

    fn classify(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        self.classify_with(bars, bar_index, indicators, self.means(indicators))
    }

    fn classify_all(&self, bars: &[Bar], indicators: &IndicatorValues) -> Vec<IndicatorVerdict> {
        let means = self.means(indicators);
        (0..bars.len())
            .map(|i| self.classify_with(bars, i, indicators, means))
            .collect()
    }
}
