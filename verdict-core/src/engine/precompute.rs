//! Indicator precomputation.
//!
//! All indicators are computed once per symbol before classification.

use crate::domain::Bar;
use crate::indicators::{Indicator, IndicatorValues};
use tracing::debug;

/// Compute every indicator over `bars` into one `IndicatorValues` container.
pub fn precompute_indicators(bars: &[Bar], indicators: &[Box<dyn Indicator>]) -> IndicatorValues {
    let mut iv = IndicatorValues::new();
    for indicator in indicators {
        let series = indicator.compute(bars);
        debug_assert_eq!(
            series.len(),
            bars.len(),
            "indicator '{}' produced {} values for {} bars",
            indicator.name(),
            series.len(),
            bars.len(),
        );
        let defined = series.iter().filter(|v| !v.is_nan()).count();
        debug!(
            indicator = indicator.name(),
            lookback = indicator.lookback(),
            defined,
            "precomputed indicator"
        );
        iv.insert(indicator.name(), series);
    }
    iv
}

/// The warm-up length of a set of indicators: the largest lookback.
pub fn compute_warmup(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}
