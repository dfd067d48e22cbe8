//! End-to-end scenarios through `analyze`, plus characterization tests.
//!
//! The characterization section locks two tuned heuristics exactly as they
//! behave today: the RSI rule order when the configured bounds overlap the
//! fixed 40/60 zones, and the 0.4 n / 0.3 n consensus ratios. A change to
//! either must show up here as a failing test.

use chrono::NaiveDate;
use verdict_core::classify::RsiClassifier;
use verdict_core::consensus::aggregate;
use verdict_core::domain::{Bar, IndicatorKind, TimeSeries, Verdict};
use verdict_core::engine::{analyze, EngineError};
use verdict_core::profile::{ConfigError, ProfileBook, StrategyProfile};

fn series_from_closes(closes: &[f64]) -> TimeSeries {
    let base = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1_000,
            }
        })
        .collect();
    TimeSeries::new("SCN", bars).unwrap()
}

fn profile_with(indicators: &[IndicatorKind]) -> StrategyProfile {
    StrategyProfile {
        indicators: indicators.to_vec(),
        ..Default::default()
    }
}

// ── Scenarios ────────────────────────────────────────────────────────

#[test]
fn flat_series_is_neutral_on_bollinger_and_macd() {
    let series = series_from_closes(&[100.0; 30]);
    let profile = profile_with(&[IndicatorKind::Bollinger, IndicatorKind::Macd]);
    let report = analyze(&series, &profile).unwrap();

    let last = report.latest().unwrap();
    let bb = last.verdict_for(IndicatorKind::Bollinger).unwrap();
    assert_eq!(bb.verdict, Verdict::Hold);
    assert_eq!(bb.value, Some(0.5));

    let macd = last.verdict_for(IndicatorKind::Macd).unwrap();
    assert_eq!(macd.verdict, Verdict::Hold);
    assert_eq!(macd.value, Some(0.0));

    assert_eq!(last.consensus.verdict, Verdict::Hold);
    assert_eq!(last.consensus.strength, 0.0);
}

#[test]
fn rising_series_reads_overbought_rsi_and_bullish_sma() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    let series = series_from_closes(&closes);
    let profile = profile_with(&[IndicatorKind::Rsi, IndicatorKind::Sma]);
    let report = analyze(&series, &profile).unwrap();

    let last = report.latest().unwrap();
    // No losses in the window: RSI = 100, above the upper bound.
    let rsi = last.verdict_for(IndicatorKind::Rsi).unwrap();
    assert_eq!(rsi.value, Some(100.0));
    assert_eq!(rsi.verdict, Verdict::StrongSell);

    let sma = last.verdict_for(IndicatorKind::Sma).unwrap();
    assert_eq!(sma.verdict, Verdict::Buy);
    assert!(sma.value.unwrap() > 0.0);
}

#[test]
fn short_history_holds_with_no_data() {
    let series = series_from_closes(&[100.0, 101.0, 99.0, 102.0, 98.0]);
    let profile = ProfileBook::builtin().get("agresivo").unwrap();
    let report = analyze(&series, &profile).unwrap();

    let first = &report.bars[0];
    assert_eq!(first.verdicts.len(), 10);
    for v in &first.verdicts {
        if v.indicator != IndicatorKind::Macd {
            assert!(!v.has_data(), "{} should have no data at bar 0", v.indicator);
            assert!(v.rationale.ends_with("no data"));
        }
    }
}

#[test]
fn empty_indicator_set_is_a_configuration_error() {
    let series = series_from_closes(&[100.0; 10]);
    let err = analyze(&series, &profile_with(&[])).unwrap_err();
    assert!(matches!(err, EngineError::Config(ConfigError::EmptyIndicatorSet)));
}

#[test]
fn every_builtin_profile_runs() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 100.0 + 8.0 * (i as f64 * 0.21).sin() + 0.05 * i as f64)
        .collect();
    let series = series_from_closes(&closes);
    let book = ProfileBook::builtin();
    for name in book.names() {
        let profile = book.get(name).unwrap();
        let report = analyze(&series, &profile).unwrap();
        assert_eq!(report.profile, name);
        assert_eq!(report.len(), 120);
        let last = report.latest().unwrap();
        assert_eq!(last.verdicts.len(), profile.indicators.len());
        assert!(last.verdicts.iter().all(|v| v.has_data()), "{name}");
    }
}

// ── Characterization: consensus ratios ───────────────────────────────

#[test]
fn characterize_strong_buy_plus_buy() {
    let c = aggregate(&[Verdict::StrongBuy, Verdict::Buy]).unwrap();
    assert_eq!(c.verdict, Verdict::StrongBuy);
    assert_eq!(c.strength, 0.75);
    assert_eq!((c.buy_weight, c.sell_weight), (3, 0));
}

#[test]
fn characterize_all_hold() {
    let c = aggregate(&[Verdict::Hold; 6]).unwrap();
    assert_eq!(c.verdict, Verdict::Hold);
    assert_eq!(c.strength, 0.0);
}

#[test]
fn characterize_win_ratio_boundary() {
    use Verdict::*;
    // n = 6: 0.4 n = 2.4. A weight of 2 loses, 3 wins.
    assert_eq!(aggregate(&[Buy, Buy, Hold, Hold, Hold, Hold]).unwrap().verdict, Hold);
    assert_eq!(aggregate(&[Buy, Buy, Buy, Hold, Hold, Hold]).unwrap().verdict, Buy);
    // A single strong vote carries weight 2: enough for n = 5 but not n = 6.
    assert_eq!(aggregate(&[StrongSell, Hold, Hold, Hold, Hold]).unwrap().verdict, StrongSell);
    assert_eq!(aggregate(&[StrongSell, Hold, Hold, Hold, Hold, Hold]).unwrap().verdict, Hold);
}

#[test]
fn characterize_strong_ratio_boundary() {
    use Verdict::*;
    // n = 7: 0.3 n = 2.1. One strong buy (doubled: 2) is not enough.
    let c = aggregate(&[StrongBuy, Buy, Buy, Hold, Hold, Hold, Hold]).unwrap();
    assert_eq!(c.verdict, Buy);
    // Two strong buys (doubled: 4) are.
    let c = aggregate(&[StrongBuy, StrongBuy, Hold, Hold, Hold, Hold, Hold]).unwrap();
    assert_eq!(c.verdict, StrongBuy);
}

#[test]
fn characterize_opposing_votes() {
    use Verdict::*;
    // Buy weight 3 beats sell weight 2 and reaches 0.4 n = 1.6 for n = 4.
    let c = aggregate(&[StrongBuy, Buy, Sell, Sell]).unwrap();
    assert_eq!(c.verdict, StrongBuy);
    assert_eq!(c.strength, 1.0 / 8.0);
}

// ── Characterization: RSI rule order ─────────────────────────────────

#[test]
fn characterize_rsi_default_bounds() {
    let rsi = RsiClassifier::new(14, 30.0, 70.0);
    assert_eq!(rsi.verdict_for(29.9).0, Verdict::StrongBuy);
    assert_eq!(rsi.verdict_for(30.0).0, Verdict::Buy);
    assert_eq!(rsi.verdict_for(40.0).0, Verdict::Buy);
    assert_eq!(rsi.verdict_for(50.0).0, Verdict::Hold);
    assert_eq!(rsi.verdict_for(60.0).0, Verdict::Sell);
    assert_eq!(rsi.verdict_for(70.0).0, Verdict::Sell);
    assert_eq!(rsi.verdict_for(70.1).0, Verdict::StrongSell);
}

#[test]
fn characterize_rsi_overlapping_bounds() {
    // lower above 40 and upper below 60: the mild zones can never fire.
    let rsi = RsiClassifier::new(14, 45.0, 55.0);
    assert_eq!(rsi.verdict_for(42.0).0, Verdict::StrongBuy);
    assert_eq!(rsi.verdict_for(50.0).0, Verdict::Hold);
    assert_eq!(rsi.verdict_for(57.0).0, Verdict::StrongSell);
}

#[test]
fn characterize_rsi_inverted_bounds() {
    // lower > upper: the strong-buy branch is tested first and wins.
    let rsi = RsiClassifier::new(14, 70.0, 30.0);
    assert_eq!(rsi.verdict_for(50.0).0, Verdict::StrongBuy);
    assert_eq!(rsi.verdict_for(80.0).0, Verdict::StrongSell);
}
