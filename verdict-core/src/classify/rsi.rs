//! RSI classifier.
//!
//! `< lower` strong buy, `> upper` strong sell, `[lower, 40]` buy,
//! `[60, upper]` sell, otherwise hold. Bounds are taken as configured, so
//! overlapping or inverted bounds shift which rule fires first.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{IndicatorValues, Rsi};

/// Upper edge of the mild-buy zone.
pub const RSI_BUY_ZONE_CEILING: f64 = 40.0;
/// Lower edge of the mild-sell zone.
pub const RSI_SELL_ZONE_FLOOR: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct RsiClassifier {
    pub period: usize,
    pub lower: f64,
    pub upper: f64,
    indicator_key: String,
}

impl RsiClassifier {
    pub fn new(period: usize, lower: f64, upper: f64) -> Self {
        Self {
            period,
            lower,
            upper,
            indicator_key: Rsi::key(period),
        }
    }

    /// Rule table on a defined RSI value.
    pub fn verdict_for(&self, rsi: f64) -> (Verdict, &'static str) {
        if rsi < self.lower {
            (Verdict::StrongBuy, "strong oversold")
        } else if rsi > self.upper {
            (Verdict::StrongSell, "strong overbought")
        } else if rsi >= self.lower && rsi <= RSI_BUY_ZONE_CEILING {
            (Verdict::Buy, "oversold zone")
        } else if rsi >= RSI_SELL_ZONE_FLOOR && rsi <= self.upper {
            (Verdict::Sell, "overbought zone")
        } else {
            (Verdict::Hold, "neutral")
        }
    }
}

impl Classifier for RsiClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn classify(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let Some(rsi) = indicators.defined(&self.indicator_key, bar_index) else {
            return IndicatorVerdict::no_data(self.kind());
        };

        let (verdict, reading) = self.verdict_for(rsi);
        IndicatorVerdict::new(
            self.kind(),
            verdict,
            rsi,
            format!(
                "RSI {rsi:.1} (period {}) - {reading} | bounds {}/{}",
                self.period, self.lower, self.upper
            ),
        )
    }
}
