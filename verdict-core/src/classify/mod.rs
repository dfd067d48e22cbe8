//! Per-indicator classification: maps indicator values at a bar to a
//! five-class [`Verdict`] with a raw value and a rationale.
//!
//! Classifiers see only bar history and precomputed indicator values. Rules
//! are evaluated in order and the first match wins. When any value a rule
//! set needs is undefined the result is HOLD with no value.

pub mod adx;
pub mod bollinger;
pub mod ichimoku;
pub mod macd;
pub mod parabolic_sar;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volatility;
pub mod williams;

pub use adx::AdxClassifier;
pub use bollinger::BollingerClassifier;
pub use ichimoku::IchimokuClassifier;
pub use macd::MacdClassifier;
pub use parabolic_sar::ParabolicSarClassifier;
pub use rsi::RsiClassifier;
pub use sma::SmaClassifier;
pub use stochastic::StochasticClassifier;
pub use volatility::VolatilityClassifier;
pub use williams::WilliamsClassifier;

use crate::domain::{Bar, IndicatorKind, IndicatorVerdict};
use crate::indicators::IndicatorValues;

/// Trait for per-indicator classifiers.
pub trait Classifier: Send + Sync {
    /// Which indicator this classifier votes for.
    fn kind(&self) -> IndicatorKind;

    /// Classify the bar at `bar_index`.
    fn classify(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> IndicatorVerdict;

    /// Classify every bar of the series.
    fn classify_all(&self, bars: &[Bar], indicators: &IndicatorValues) -> Vec<IndicatorVerdict> {
        (0..bars.len())
            .map(|i| self.classify(bars, i, indicators))
            .collect()
    }
}

/// Build an `IndicatorValues` from (name, series) pairs.
#[cfg(test)]
pub(crate) fn make_indicators(series: &[(&str, Vec<f64>)]) -> IndicatorValues {
    let mut iv = IndicatorValues::new();
    for (name, values) in series {
        iv.insert(*name, values.clone());
    }
    iv
}
