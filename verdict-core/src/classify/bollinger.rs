//! Bollinger classifier: mean reversion at the bands.
//!
//! Close above the upper band sells, below the lower band buys. The raw value
//! is the position inside the band, 0.5 when the band has zero width.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{Bollinger, BollingerBand, IndicatorValues};

#[derive(Debug, Clone)]
pub struct BollingerClassifier {
    pub period: usize,
    pub deviation: f64,
    upper_key: String,
    lower_key: String,
}

impl BollingerClassifier {
    pub fn new(period: usize, deviation: f64) -> Self {
        Self {
            period,
            deviation,
            upper_key: Bollinger::key(period, deviation, BollingerBand::Upper),
            lower_key: Bollinger::key(period, deviation, BollingerBand::Lower),
        }
    }
}

impl Classifier for BollingerClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Bollinger
    }

    fn classify(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let (Some(upper), Some(lower)) = (
            indicators.defined(&self.upper_key, bar_index),
            indicators.defined(&self.lower_key, bar_index),
        ) else {
            return IndicatorVerdict::no_data(self.kind());
        };
        let close = bars[bar_index].close;

        let width = upper - lower;
        let position = if width == 0.0 {
            0.5
        } else {
            (close - lower) / width
        };

        let (verdict, reading) = if close > upper {
            (Verdict::Sell, "above upper band")
        } else if close < lower {
            (Verdict::Buy, "below lower band")
        } else {
            (Verdict::Hold, "inside bands")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            position,
            format!(
                "close {close:.2} {reading} [{lower:.2}, {upper:.2}] ({} x{}) - position {position:.2}",
                self.period, self.deviation
            ),
        )
    }
}
