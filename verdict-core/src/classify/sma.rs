//! SMA classifier: close above or below its moving average.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{IndicatorValues, Sma};

#[derive(Debug, Clone)]
pub struct SmaClassifier {
    pub period: usize,
    indicator_key: String,
}

impl SmaClassifier {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            indicator_key: Sma::key(period),
        }
    }
}

impl Classifier for SmaClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Sma
    }

    fn classify(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let Some(ma) = indicators.defined(&self.indicator_key, bar_index) else {
            return IndicatorVerdict::no_data(self.kind());
        };
        let close = bars[bar_index].close;

        let (verdict, reading) = if close > ma {
            (Verdict::Buy, "above")
        } else if close < ma {
            (Verdict::Sell, "below")
        } else {
            (Verdict::Hold, "at")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            close - ma,
            format!("close {close:.2} {reading} SMA{} {ma:.2}", self.period),
        )
    }
}
