//! Property tests for engine invariants.
//!
//! Uses proptest to verify:
//! 1. Oscillator bounds: RSI, Stochastic %K/%D and ADX in [0, 100],
//!    Williams %R in [-100, 0], wherever defined
//! 2. Output length always equals input length
//! 3. Consensus strength stays in [-1, 1] and the verdict never opposes
//!    the heavier side
//! 4. `analyze` is pure: same input, same table, same digest
//! 5. History no longer than an indicator's lookback yields nothing but NaN

use chrono::NaiveDate;
use proptest::prelude::*;
use verdict_core::consensus::aggregate;
use verdict_core::domain::{Bar, TimeSeries, Verdict};
use verdict_core::engine::analyze;
use verdict_core::indicators::*;
use verdict_core::profile::ProfileBook;

const EPS: f64 = 1e-9;

// ── Strategies (proptest) ────────────────────────────────────────────

/// (close anchor, upper wick, lower wick, close position inside the range)
fn arb_bar_shape() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (10.0..500.0_f64, 0.0..5.0_f64, 0.0..5.0_f64, 0.0..=1.0_f64)
}

fn arb_bars(min: usize, max: usize) -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec(arb_bar_shape(), min..max).prop_map(|shapes| {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        shapes
            .into_iter()
            .enumerate()
            .map(|(i, (anchor, up, down, pos))| {
                let high = anchor + up;
                let low = anchor - down;
                let close = low + pos * (high - low);
                Bar {
                    timestamp: base + chrono::Duration::days(i as i64),
                    open: anchor,
                    high,
                    low,
                    close,
                    volume: 1000,
                }
            })
            .collect()
    })
}

fn arb_verdict() -> impl Strategy<Value = Verdict> {
    prop::sample::select(Verdict::ALL.to_vec())
}

fn assert_within(values: &[f64], lo: f64, hi: f64) -> Result<(), TestCaseError> {
    for (i, v) in values.iter().enumerate().filter(|(_, v)| !v.is_nan()) {
        prop_assert!(
            *v >= lo - EPS && *v <= hi + EPS,
            "value {} at bar {} outside [{}, {}]",
            v,
            i,
            lo,
            hi
        );
    }
    Ok(())
}

// ── 1. Oscillator Bounds ─────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(bars in arb_bars(1, 120), period in 2usize..30) {
        assert_within(&Rsi::new(period).compute(&bars), 0.0, 100.0)?;
    }

    #[test]
    fn stochastic_is_bounded(bars in arb_bars(1, 120), period in 1usize..30) {
        assert_within(&Stochastic::new(period, StochasticLine::K).compute(&bars), 0.0, 100.0)?;
        assert_within(&Stochastic::new(period, StochasticLine::D).compute(&bars), 0.0, 100.0)?;
    }

    #[test]
    fn williams_is_bounded(bars in arb_bars(1, 120), period in 1usize..30) {
        assert_within(&WilliamsR::new(period).compute(&bars), -100.0, 0.0)?;
    }

    #[test]
    fn adx_is_bounded(bars in arb_bars(1, 120), period in 2usize..20) {
        for line in [AdxLine::Adx, AdxLine::PlusDi, AdxLine::MinusDi] {
            assert_within(&Adx::new(period, line).compute(&bars), 0.0, 100.0)?;
        }
    }
}

// ── 2. Output Length ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_series_matches_input_length(bars in arb_bars(0, 80)) {
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Rsi::new(14)),
            Box::new(Macd::new(12, 26, 9, MacdLine::Histogram)),
            Box::new(Sma::new(20)),
            Box::new(Bollinger::new(20, 2.0, BollingerBand::Position)),
            Box::new(Ichimoku::new(IchimokuParams::default(), IchimokuLine::SenkouB)),
            Box::new(Ichimoku::new(IchimokuParams::default(), IchimokuLine::Chikou)),
            Box::new(ParabolicSar::default_params()),
            Box::new(Volatility::new(20, VolatilityLine::AtrPercent)),
        ];
        for ind in &indicators {
            prop_assert_eq!(ind.compute(&bars).len(), bars.len(), "{}", ind.name());
        }
    }
}

// ── 3. Consensus ─────────────────────────────────────────────────────

proptest! {
    #[test]
    fn strength_is_bounded(verdicts in prop::collection::vec(arb_verdict(), 1..12)) {
        let c = aggregate(&verdicts).unwrap();
        prop_assert!((-1.0..=1.0).contains(&c.strength));
    }

    #[test]
    fn consensus_follows_heavier_side(verdicts in prop::collection::vec(arb_verdict(), 1..12)) {
        let c = aggregate(&verdicts).unwrap();
        if c.verdict.is_buy() {
            prop_assert!(c.buy_weight > c.sell_weight);
        }
        if c.verdict.is_sell() {
            prop_assert!(c.sell_weight > c.buy_weight);
        }
        if c.buy_weight == c.sell_weight {
            prop_assert_eq!(c.verdict, Verdict::Hold);
        }
    }

    #[test]
    fn consensus_ignores_vote_order(mut verdicts in prop::collection::vec(arb_verdict(), 1..12)) {
        let a = aggregate(&verdicts).unwrap();
        verdicts.reverse();
        let b = aggregate(&verdicts).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ── 4. Determinism ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn analyze_is_idempotent(bars in arb_bars(0, 90)) {
        let series = TimeSeries::new("PROP", bars).unwrap();
        let profile = ProfileBook::builtin().get("agresivo").unwrap();
        let a = analyze(&series, &profile).unwrap();
        let b = analyze(&series, &profile).unwrap();
        prop_assert_eq!(&a.digest, &b.digest);
        prop_assert_eq!(a, b);
    }
}

// ── 5. Short History ─────────────────────────────────────────────────

/// One instance of every series the library produces, with drawn periods.
fn every_indicator(period: usize, ichimoku: IchimokuParams) -> Vec<Box<dyn Indicator>> {
    let mut all: Vec<Box<dyn Indicator>> = vec![
        Box::new(Rsi::new(period)),
        Box::new(Sma::new(period)),
        Box::new(WilliamsR::new(period)),
        Box::new(ParabolicSar::default_params()),
    ];
    for line in [MacdLine::Line, MacdLine::Signal, MacdLine::Histogram] {
        all.push(Box::new(Macd::new(period, period + 5, 3, line)));
    }
    for band in [
        BollingerBand::Middle,
        BollingerBand::Upper,
        BollingerBand::Lower,
        BollingerBand::Position,
    ] {
        all.push(Box::new(Bollinger::new(period, 2.0, band)));
    }
    for line in [StochasticLine::K, StochasticLine::D] {
        all.push(Box::new(Stochastic::new(period, line)));
    }
    for line in [
        IchimokuLine::Tenkan,
        IchimokuLine::Kijun,
        IchimokuLine::SenkouA,
        IchimokuLine::SenkouB,
    ] {
        all.push(Box::new(Ichimoku::new(ichimoku, line)));
    }
    for line in [AdxLine::Adx, AdxLine::PlusDi, AdxLine::MinusDi] {
        all.push(Box::new(Adx::new(period, line)));
    }
    for line in [VolatilityLine::Volatility, VolatilityLine::AtrPercent] {
        all.push(Box::new(Volatility::new(period, line)));
    }
    all
}

fn arb_ichimoku() -> impl Strategy<Value = IchimokuParams> {
    (1usize..12, 1usize..30, 1usize..40, 0usize..30).prop_map(
        |(conversion, base, span_b, displacement)| IchimokuParams {
            conversion,
            base,
            span_b,
            displacement,
        },
    )
}

proptest! {
    #[test]
    fn history_within_lookback_is_undefined(
        bars in arb_bars(80, 100),
        period in 1usize..30,
        ichimoku in arb_ichimoku(),
        cut in any::<usize>(),
    ) {
        for ind in every_indicator(period, ichimoku) {
            let n = cut % (ind.lookback() + 1);
            let values = ind.compute(&bars[..n]);
            prop_assert_eq!(values.len(), n);
            prop_assert!(
                values.iter().all(|v| v.is_nan()),
                "{} defined within {} bars (lookback {})",
                ind.name(),
                n,
                ind.lookback()
            );
        }
    }

    #[test]
    fn chikou_undefined_without_future_bars(
        bars in arb_bars(1, 40),
        ichimoku in arb_ichimoku(),
    ) {
        let n = bars.len().min(ichimoku.displacement);
        let chikou = Ichimoku::new(ichimoku, IchimokuLine::Chikou).compute(&bars[..n]);
        prop_assert!(chikou.iter().all(|v| v.is_nan()));
    }
}
