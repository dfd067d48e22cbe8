//! Per-symbol pipeline: precompute the active indicators, classify every
//! bar, aggregate every bar.
//!
//! Pure and sequential within one symbol; callers parallelize across
//! symbols.

pub mod precompute;
pub mod report;

pub use precompute::{compute_warmup, precompute_indicators};
pub use report::{BarReport, SymbolReport};

use crate::consensus::{aggregate, ConsensusError};
use crate::domain::{IndicatorVerdict, TimeSeries, Verdict};
use crate::factory::{create_classifiers, required_indicators};
use crate::fingerprint::ReportDigest;
use crate::profile::{ConfigError, StrategyProfile};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),

    #[error("cannot fingerprint report: {0}")]
    Digest(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct DigestInput<'a> {
    symbol: &'a str,
    profile: &'a StrategyProfile,
    bars: &'a [BarReport],
}

/// Analyze one series under one profile.
///
/// The profile is validated first; a configuration error aborts the run.
/// An empty series yields an empty table.
pub fn analyze(series: &TimeSeries, profile: &StrategyProfile) -> Result<SymbolReport, EngineError> {
    profile.validate()?;

    let bars = series.bars();
    let indicators = required_indicators(profile);
    let values = precompute_indicators(bars, &indicators);
    let classifiers = create_classifiers(profile);

    let columns: Vec<Vec<IndicatorVerdict>> = classifiers
        .iter()
        .map(|c| {
            let column = c.classify_all(bars, &values);
            debug!(
                symbol = series.symbol(),
                indicator = %c.kind(),
                with_data = column.iter().filter(|v| v.has_data()).count(),
                "classified"
            );
            column
        })
        .collect();

    let mut rows = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let verdicts: Vec<IndicatorVerdict> = columns.iter().map(|col| col[i].clone()).collect();
        let votes: Vec<Verdict> = verdicts.iter().map(|v| v.verdict).collect();
        let consensus = aggregate(&votes)?;
        let raw = indicators
            .iter()
            .map(|ind| (ind.name().to_string(), values.defined(ind.name(), i)))
            .collect();
        rows.push(BarReport::new(bar, raw, verdicts, consensus));
    }

    let digest = ReportDigest::of(&DigestInput {
        symbol: series.symbol(),
        profile,
        bars: &rows,
    })?;

    let report = SymbolReport {
        symbol: series.symbol().to_string(),
        profile: profile.name.clone(),
        indicators: profile.indicators.clone(),
        series: indicators.iter().map(|i| i.name().to_string()).collect(),
        warmup_bars: compute_warmup(&indicators),
        bars: rows,
        digest,
    };

    if let Some(latest) = report.latest() {
        info!(
            symbol = %report.symbol,
            profile = %report.profile,
            bars = report.len(),
            verdict = %latest.consensus.verdict,
            strength = latest.consensus.strength,
            "analyzed symbol"
        );
    } else {
        info!(symbol = %report.symbol, profile = %report.profile, "empty series");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IndicatorKind, Verdict};
    use crate::indicators::make_bars;

    fn series(closes: &[f64]) -> TimeSeries {
        TimeSeries::new("TEST", make_bars(closes)).unwrap()
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 10.0 * (i as f64 * 0.3).sin() + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn table_covers_every_bar() {
        let ts = series(&wave(80));
        let report = analyze(&ts, &StrategyProfile::default()).unwrap();
        assert_eq!(report.len(), 80);
        assert_eq!(report.symbol, "TEST");
        for row in &report.bars {
            assert_eq!(row.verdicts.len(), 6);
            assert_eq!(row.values.len(), report.series.len());
            assert!((-1.0..=1.0).contains(&row.consensus.strength));
        }
    }

    #[test]
    fn verdicts_follow_profile_order() {
        let profile = StrategyProfile {
            indicators: vec![IndicatorKind::Adx, IndicatorKind::Rsi],
            ..Default::default()
        };
        let report = analyze(&series(&wave(60)), &profile).unwrap();
        let kinds: Vec<IndicatorKind> = report.bars[0].verdicts.iter().map(|v| v.indicator).collect();
        assert_eq!(kinds, vec![IndicatorKind::Adx, IndicatorKind::Rsi]);
        assert!(report.bars[59].verdict_for(IndicatorKind::Rsi).is_some());
        assert!(report.bars[59].verdict_for(IndicatorKind::Sma).is_none());
    }

    #[test]
    fn warmup_rows_are_no_data() {
        let profile = StrategyProfile {
            indicators: vec![IndicatorKind::Sma],
            ..Default::default()
        };
        let report = analyze(&series(&wave(30)), &profile).unwrap();
        assert_eq!(report.warmup_bars, 19);
        let first = &report.bars[0];
        assert_eq!(first.values["sma_20"], None);
        assert!(!first.verdicts[0].has_data());
        assert_eq!(first.consensus.verdict, Verdict::Hold);
        assert!(report.bars[19].values["sma_20"].is_some());
    }

    #[test]
    fn invalid_profile_is_an_error() {
        let profile = StrategyProfile {
            indicators: vec![],
            ..Default::default()
        };
        let err = analyze(&series(&wave(10)), &profile).unwrap_err();
        assert!(matches!(err, EngineError::Config(ConfigError::EmptyIndicatorSet)));
    }

    #[test]
    fn empty_series_gives_empty_table() {
        let ts = TimeSeries::new("EMPTY", vec![]).unwrap();
        let report = analyze(&ts, &StrategyProfile::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.latest_verdict(), None);
    }

    #[test]
    fn digest_is_stable_and_profile_sensitive() {
        let ts = series(&wave(40));
        let a = analyze(&ts, &StrategyProfile::default()).unwrap();
        let b = analyze(&ts, &StrategyProfile::default()).unwrap();
        assert_eq!(a.digest, b.digest);

        let other = StrategyProfile {
            rsi_period: 7,
            ..Default::default()
        };
        let c = analyze(&ts, &other).unwrap();
        assert_ne!(a.digest, c.digest);
    }
}
