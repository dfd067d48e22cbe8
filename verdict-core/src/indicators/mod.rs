//! Concrete indicator implementations.
//!
//! Every indicator implements the [`Indicator`] trait. Indicators are
//! precomputed once per symbol and looked up per bar by the classifiers via
//! [`IndicatorValues`].
//!
//! Multi-series indicators (MACD, Bollinger, Stochastic, Ichimoku, ADX,
//! volatility) are exposed as separate named instances per line, keeping the
//! single-series trait unchanged.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod ichimoku;
pub mod indicator;
pub mod macd;
pub mod parabolic_sar;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volatility;
pub mod williams;

pub use adx::{Adx, AdxLine};
pub use bollinger::{Bollinger, BollingerBand};
pub use ichimoku::{Ichimoku, IchimokuLine, IchimokuParams};
pub use indicator::{Indicator, IndicatorValues};
pub use macd::{Macd, MacdLine};
pub use parabolic_sar::{ParabolicSar, SarParams, SarState, Trend};
pub use rsi::Rsi;
pub use sma::Sma;
pub use stochastic::{Stochastic, StochasticLine};
pub use volatility::{Volatility, VolatilityLine};
pub use williams::WilliamsR;

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    let data: Vec<(f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close)
        })
        .collect();
    make_ohlc_bars(&data)
}

/// Create daily bars from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            timestamp: base + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
