//! Williams %R classifier.
//!
//! Extremes first; in the middle zone the direction against the previous
//! bar's %R decides. Without a defined previous value neither rising nor
//! falling applies.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{IndicatorValues, WilliamsR};

pub const WILLIAMS_OVERSOLD: f64 = -80.0;
pub const WILLIAMS_OVERBOUGHT: f64 = -20.0;
pub const WILLIAMS_MIDLINE: f64 = -50.0;

#[derive(Debug, Clone)]
pub struct WilliamsClassifier {
    pub period: usize,
    indicator_key: String,
}

impl WilliamsClassifier {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            indicator_key: WilliamsR::key(period),
        }
    }
}

impl Classifier for WilliamsClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Williams
    }

    fn classify(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let Some(r) = indicators.defined(&self.indicator_key, bar_index) else {
            return IndicatorVerdict::no_data(self.kind());
        };
        let previous = bar_index
            .checked_sub(1)
            .and_then(|i| indicators.defined(&self.indicator_key, i));
        let rising = previous.is_some_and(|p| r > p);
        let falling = previous.is_some_and(|p| r < p);

        let (verdict, reading) = if r <= WILLIAMS_OVERSOLD {
            (Verdict::StrongBuy, "oversold")
        } else if r >= WILLIAMS_OVERBOUGHT {
            (Verdict::StrongSell, "overbought")
        } else if r < WILLIAMS_MIDLINE && rising {
            (Verdict::Buy, "turning up from the lower half")
        } else if r > WILLIAMS_MIDLINE && falling {
            (Verdict::Sell, "turning down from the upper half")
        } else {
            (Verdict::Hold, "neutral")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            r,
            format!("%R {r:.1} (period {}) - {reading}", self.period),
        )
    }
}
