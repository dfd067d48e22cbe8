//! MACD classifier: line vs signal, confirmed by the histogram sign.

use super::Classifier;
use crate::domain::{Bar, IndicatorKind, IndicatorVerdict, Verdict};
use crate::indicators::{IndicatorValues, Macd, MacdLine};

#[derive(Debug, Clone)]
pub struct MacdClassifier {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    line_key: String,
    signal_key: String,
    hist_key: String,
}

impl MacdClassifier {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self {
            fast,
            slow,
            signal,
            line_key: Macd::key(fast, slow, signal, MacdLine::Line),
            signal_key: Macd::key(fast, slow, signal, MacdLine::Signal),
            hist_key: Macd::key(fast, slow, signal, MacdLine::Histogram),
        }
    }
}

impl Classifier for MacdClassifier {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn classify(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict {
        let (Some(macd), Some(signal), Some(hist)) = (
            indicators.defined(&self.line_key, bar_index),
            indicators.defined(&self.signal_key, bar_index),
            indicators.defined(&self.hist_key, bar_index),
        ) else {
            return IndicatorVerdict::no_data(self.kind());
        };

        let (verdict, reading) = if macd > signal && hist > 0.0 {
            (Verdict::StrongBuy, "bullish crossover, rising histogram")
        } else if macd < signal && hist < 0.0 {
            (Verdict::StrongSell, "bearish crossover, falling histogram")
        } else if macd > signal {
            (Verdict::Buy, "above signal")
        } else if macd < signal {
            (Verdict::Sell, "below signal")
        } else {
            (Verdict::Hold, "flat")
        };

        IndicatorVerdict::new(
            self.kind(),
            verdict,
            hist,
            format!(
                "MACD {macd:.4} vs signal {signal:.4}, hist {hist:.4} ({}/{}/{}) - {reading}",
                self.fast, self.slow, self.signal
            ),
        )
    }
}
