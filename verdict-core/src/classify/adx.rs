//! ADX classifier: trend strength gates the directional-index comparison.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{Adx, AdxLine, IndicatorValues};

/// ADX above this is a strong trend.
pub const ADX_STRONG_TREND: f64 = 25.0;
/// ADX above this is a trend at all.
pub const ADX_TREND: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct AdxClassifier {
    pub period: usize,
    adx_key: String,
    plus_key: String,
    minus_key: String,
}

impl AdxClassifier {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            adx_key: Adx::key(period, AdxLine::Adx),
            plus_key: Adx::key(period, AdxLine::PlusDi),
            minus_key: Adx::key(period, AdxLine::MinusDi),
        }
    }
}

impl Classifier for AdxClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Adx
    }

    fn classify(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let (Some(adx), Some(plus), Some(minus)) = (
            indicators.defined(&self.adx_key, bar_index),
            indicators.defined(&self.plus_key, bar_index),
            indicators.defined(&self.minus_key, bar_index),
        ) else {
            return IndicatorVerdict::no_data(self.kind());
        };

        let (verdict, reading) = if adx > ADX_STRONG_TREND && plus > minus {
            (Verdict::StrongBuy, "strong uptrend")
        } else if adx > ADX_STRONG_TREND && plus < minus {
            (Verdict::StrongSell, "strong downtrend")
        } else if adx > ADX_TREND && plus > minus {
            (Verdict::Buy, "uptrend")
        } else if adx > ADX_TREND && plus < minus {
            (Verdict::Sell, "downtrend")
        } else {
            (Verdict::Hold, "no trend")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            adx,
            format!(
                "ADX {adx:.1} +DI {plus:.1} -DI {minus:.1} (period {}) - {reading}",
                self.period
            ),
        )
    }
}
