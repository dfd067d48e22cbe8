//! Parabolic SAR classifier: which side of the stop the close sits on.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{IndicatorValues, ParabolicSar, SarParams};

#[derive(Debug, Clone)]
pub struct ParabolicSarClassifier {
    indicator_key: String,
}

impl ParabolicSarClassifier {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        Self {
            indicator_key: ParabolicSar::key(af_start, af_step, af_max),
        }
    }

    pub fn from_params(params: SarParams) -> Self {
        Self::new(params.af_start, params.af_step, params.af_max)
    }
}

impl Classifier for ParabolicSarClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::ParabolicSar
    }

    fn classify(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let Some(sar) = indicators.defined(&self.indicator_key, bar_index) else {
            return IndicatorVerdict::no_data(self.kind());
        };
        let close = bars[bar_index].close;

        let verdict = if close > sar {
            Verdict::Buy
        } else if close < sar {
            Verdict::Sell
        } else {
            Verdict::Hold
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            close - sar,
            format!("close {close:.2} vs SAR {sar:.2}"),
        )
    }
}
