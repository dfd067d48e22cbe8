//! Stochastic classifier: extremes first, then the %K/%D cross.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{IndicatorValues, Stochastic, StochasticLine};

pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct StochasticClassifier {
    pub period: usize,
    k_key: String,
    d_key: String,
}

impl StochasticClassifier {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            k_key: Stochastic::key(period, StochasticLine::K),
            d_key: Stochastic::key(period, StochasticLine::D),
        }
    }
}

impl Classifier for StochasticClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Stochastic
    }

    fn classify(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let (Some(k), Some(d)) = (
            indicators.defined(&self.k_key, bar_index),
            indicators.defined(&self.d_key, bar_index),
        ) else {
            return IndicatorVerdict::no_data(self.kind());
        };

        let (verdict, reading) = if k > STOCHASTIC_OVERBOUGHT && d > STOCHASTIC_OVERBOUGHT {
            (Verdict::Sell, "overbought")
        } else if k < STOCHASTIC_OVERSOLD && d < STOCHASTIC_OVERSOLD {
            (Verdict::Buy, "oversold")
        } else if k > d {
            (Verdict::Buy, "%K above %D")
        } else if k < d {
            (Verdict::Sell, "%K below %D")
        } else {
            (Verdict::Hold, "%K equals %D")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            (k + d) / 2.0,
            format!("%K {k:.1} %D {d:.1} (period {}) - {reading}", self.period),
        )
    }
}
