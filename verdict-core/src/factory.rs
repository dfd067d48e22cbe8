//! Factory: turns a validated profile into indicator and classifier trait
//! objects.

use crate::classify::{
    AdxClassifier, BollingerClassifier, Classifier, IchimokuClassifier, MacdClassifier,
    ParabolicSarClassifier, RsiClassifier, SmaClassifier, StochasticClassifier,
    VolatilityClassifier, WilliamsClassifier,
};
use crate::domain::IndicatorKind;
use crate::indicators::{
    Adx, AdxLine, Bollinger, BollingerBand, Ichimoku, IchimokuLine, Indicator, Macd, MacdLine,
    ParabolicSar, Rsi, Sma, Stochastic, StochasticLine, Volatility, VolatilityLine, WilliamsR,
};
use crate::profile::StrategyProfile;
use std::collections::HashSet;

// ─── Classifiers ─────────────────────────────────────────────────────

/// Build the classifier for one indicator kind.
pub fn create_classifier(kind: IndicatorKind, profile: &StrategyProfile) -> Box<dyn Classifier> {
    let p = profile;
    match kind {
        IndicatorKind::Rsi => Box::new(RsiClassifier::new(p.rsi_period, p.rsi_lower, p.rsi_upper)),
        IndicatorKind::Macd => Box::new(MacdClassifier::new(p.macd_fast, p.macd_slow, p.macd_signal)),
        IndicatorKind::Sma => Box::new(SmaClassifier::new(p.ma_period)),
        IndicatorKind::Bollinger => {
            Box::new(BollingerClassifier::new(p.bollinger_period, p.bollinger_deviation))
        }
        IndicatorKind::Stochastic => Box::new(StochasticClassifier::new(p.stochastic_period)),
        IndicatorKind::Ichimoku => Box::new(IchimokuClassifier::new(p.ichimoku_params())),
        IndicatorKind::Williams => Box::new(WilliamsClassifier::new(p.williams_period)),
        IndicatorKind::Adx => Box::new(AdxClassifier::new(p.adx_period)),
        IndicatorKind::ParabolicSar => {
            Box::new(ParabolicSarClassifier::from_params(p.sar_params()))
        }
        IndicatorKind::Volatility => Box::new(VolatilityClassifier::new(p.volatility_period)),
    }
}

/// Classifiers for every active indicator, in profile order.
pub fn create_classifiers(profile: &StrategyProfile) -> Vec<Box<dyn Classifier>> {
    profile
        .indicators
        .iter()
        .map(|&kind| create_classifier(kind, profile))
        .collect()
}

// ─── Indicators ──────────────────────────────────────────────────────

/// Every series one indicator kind produces, in export order.
pub fn indicators_for(kind: IndicatorKind, profile: &StrategyProfile) -> Vec<Box<dyn Indicator>> {
    let p = profile;
    match kind {
        IndicatorKind::Rsi => vec![Box::new(Rsi::new(p.rsi_period))],
        IndicatorKind::Macd => [MacdLine::Line, MacdLine::Signal, MacdLine::Histogram]
            .into_iter()
            .map(|line| {
                Box::new(Macd::new(p.macd_fast, p.macd_slow, p.macd_signal, line))
                    as Box<dyn Indicator>
            })
            .collect(),
        IndicatorKind::Sma => vec![Box::new(Sma::new(p.ma_period))],
        IndicatorKind::Bollinger => [
            BollingerBand::Middle,
            BollingerBand::Upper,
            BollingerBand::Lower,
            BollingerBand::Position,
        ]
        .into_iter()
        .map(|band| {
            Box::new(Bollinger::new(p.bollinger_period, p.bollinger_deviation, band))
                as Box<dyn Indicator>
        })
        .collect(),
        IndicatorKind::Stochastic => [StochasticLine::K, StochasticLine::D]
            .into_iter()
            .map(|line| Box::new(Stochastic::new(p.stochastic_period, line)) as Box<dyn Indicator>)
            .collect(),
        IndicatorKind::Ichimoku => [
            IchimokuLine::Tenkan,
            IchimokuLine::Kijun,
            IchimokuLine::SenkouA,
            IchimokuLine::SenkouB,
            IchimokuLine::Chikou,
        ]
        .into_iter()
        .map(|line| Box::new(Ichimoku::new(p.ichimoku_params(), line)) as Box<dyn Indicator>)
        .collect(),
        IndicatorKind::Williams => vec![Box::new(WilliamsR::new(p.williams_period))],
        IndicatorKind::Adx => [AdxLine::Adx, AdxLine::PlusDi, AdxLine::MinusDi]
            .into_iter()
            .map(|line| Box::new(Adx::new(p.adx_period, line)) as Box<dyn Indicator>)
            .collect(),
        IndicatorKind::ParabolicSar => vec![Box::new(ParabolicSar::from_params(p.sar_params()))],
        IndicatorKind::Volatility => [VolatilityLine::Volatility, VolatilityLine::AtrPercent]
            .into_iter()
            .map(|line| Box::new(Volatility::new(p.volatility_period, line)) as Box<dyn Indicator>)
            .collect(),
    }
}

/// Deduplicated list of indicators the active classifiers need, for
/// precomputation.
pub fn required_indicators(profile: &StrategyProfile) -> Vec<Box<dyn Indicator>> {
    let mut seen = HashSet::new();
    let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();

    for &kind in &profile.indicators {
        for ind in indicators_for(kind, profile) {
            if seen.insert(ind.name().to_string()) {
                indicators.push(ind);
            }
        }
    }

    indicators
}

// ─── Tests ───────────────────────────────────────────────────────────
