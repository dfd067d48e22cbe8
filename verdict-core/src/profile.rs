//! Strategy profiles: typed, validated engine configuration.
//!
//! A profile selects the active indicators, their parameters and the RSI
//! bounds. Profiles live in a TOML file as `[profiles.<name>]` tables. Every
//! key has a default; unknown keys and unknown indicator names are rejected
//! at parse time, everything else by [`StrategyProfile::validate`].

use crate::domain::IndicatorKind;
use crate::indicators::{IchimokuParams, SarParams};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ─── Error type ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read profile file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    #[error("profile selects no indicators")]
    EmptyIndicatorSet,

    #[error("indicator listed twice: {0}")]
    DuplicateIndicator(IndicatorKind),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

// ─── Profile ─────────────────────────────────────────────────────────

/// Configuration for one analysis run.
///
/// Field aliases accept the key names of older profile files
/// (`rsi_under`, `combinacion_indicadores`, `intervalo`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyProfile {
    /// Set from the `[profiles.<name>]` table key.
    #[serde(skip)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none", alias = "combinacion_nombres")]
    pub description: Option<String>,

    #[serde(
        alias = "combinacion_indicadores",
        deserialize_with = "deserialize_indicators"
    )]
    pub indicators: Vec<IndicatorKind>,

    #[serde(alias = "rsi_periodo")]
    pub rsi_period: usize,
    #[serde(alias = "rsi_under")]
    pub rsi_lower: f64,
    pub rsi_upper: f64,

    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    #[serde(alias = "media_movil_periodo")]
    pub ma_period: usize,

    #[serde(alias = "bollinger_periodo")]
    pub bollinger_period: usize,
    #[serde(alias = "bollinger_desviacion")]
    pub bollinger_deviation: f64,

    #[serde(alias = "estocastico_periodo")]
    pub stochastic_period: usize,

    pub ichimoku_conversion: usize,
    pub ichimoku_base: usize,
    pub ichimoku_span_b: usize,
    pub ichimoku_displacement: usize,

    pub williams_period: usize,
    pub adx_period: usize,

    #[serde(alias = "parabolic_acceleration")]
    pub psar_af_start: f64,
    pub psar_af_step: f64,
    #[serde(alias = "parabolic_maximum")]
    pub psar_af_max: f64,

    #[serde(alias = "periodo_volatilidad")]
    pub volatility_period: usize,

    /// Bar interval requested from the data source (e.g. "1d").
    #[serde(skip_serializing_if = "Option::is_none", alias = "intervalo")]
    pub interval: Option<String>,
    /// History window requested from the data source (e.g. "6mo").
    #[serde(skip_serializing_if = "Option::is_none", alias = "periodo")]
    pub window: Option<String>,
}

impl Default for StrategyProfile {
    fn default() -> Self {
        let ichimoku = IchimokuParams::default();
        let sar = SarParams::default();
        Self {
            name: "default".into(),
            description: None,
            indicators: vec![
                IndicatorKind::Rsi,
                IndicatorKind::Macd,
                IndicatorKind::Sma,
                IndicatorKind::Bollinger,
                IndicatorKind::Stochastic,
                IndicatorKind::Volatility,
            ],
            rsi_period: 14,
            rsi_lower: 30.0,
            rsi_upper: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            ma_period: 20,
            bollinger_period: 20,
            bollinger_deviation: 2.0,
            stochastic_period: 14,
            ichimoku_conversion: ichimoku.conversion,
            ichimoku_base: ichimoku.base,
            ichimoku_span_b: ichimoku.span_b,
            ichimoku_displacement: ichimoku.displacement,
            williams_period: 14,
            adx_period: 14,
            psar_af_start: sar.af_start,
            psar_af_step: sar.af_step,
            psar_af_max: sar.af_max,
            volatility_period: 20,
            interval: None,
            window: None,
        }
    }
}

/// Accept either a TOML array of names or one comma-separated string.
fn deserialize_indicators<'de, D>(deserializer: D) -> Result<Vec<IndicatorKind>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IndicatorList {
        List(Vec<String>),
        Joined(String),
    }

    let names = match IndicatorList::deserialize(deserializer)? {
        IndicatorList::List(names) => names,
        IndicatorList::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    };

    names
        .iter()
        .map(|n| n.parse::<IndicatorKind>().map_err(serde::de::Error::custom))
        .collect()
}

fn require_period(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: "period must be >= 1".into(),
        });
    }
    Ok(())
}

fn require_bounded_below(
    name: &'static str,
    value: f64,
    min: f64,
    inclusive: bool,
) -> Result<(), ConfigError> {
    let in_range = if inclusive { value >= min } else { value > min };
    if !value.is_finite() || !in_range {
        let op = if inclusive { ">=" } else { ">" };
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{value} must be finite and {op} {min}"),
        });
    }
    Ok(())
}

impl StrategyProfile {
    /// Check every parameter. Configuration errors surface here, never as an
    /// empty consensus downstream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indicators.is_empty() {
            return Err(ConfigError::EmptyIndicatorSet);
        }
        let mut seen = HashSet::new();
        for kind in &self.indicators {
            if !seen.insert(*kind) {
                return Err(ConfigError::DuplicateIndicator(*kind));
            }
        }

        for (name, value) in [
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("ma_period", self.ma_period),
            ("bollinger_period", self.bollinger_period),
            ("stochastic_period", self.stochastic_period),
            ("ichimoku_conversion", self.ichimoku_conversion),
            ("ichimoku_base", self.ichimoku_base),
            ("ichimoku_span_b", self.ichimoku_span_b),
            ("williams_period", self.williams_period),
            ("adx_period", self.adx_period),
            ("volatility_period", self.volatility_period),
        ] {
            require_period(name, value)?;
        }

        for (name, value) in [("rsi_lower", self.rsi_lower), ("rsi_upper", self.rsi_upper)] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("{value} is outside [0, 100]"),
                });
            }
        }

        require_bounded_below("bollinger_deviation", self.bollinger_deviation, 0.0, true)?;
        require_bounded_below("psar_af_start", self.psar_af_start, 0.0, false)?;
        require_bounded_below("psar_af_step", self.psar_af_step, 0.0, false)?;
        require_bounded_below("psar_af_max", self.psar_af_max, 0.0, false)?;
        if self.psar_af_max < self.psar_af_start {
            return Err(ConfigError::InvalidParameter {
                name: "psar_af_max",
                reason: format!(
                    "{} is below psar_af_start {}",
                    self.psar_af_max, self.psar_af_start
                ),
            });
        }

        Ok(())
    }

    pub fn ichimoku_params(&self) -> IchimokuParams {
        IchimokuParams {
            conversion: self.ichimoku_conversion,
            base: self.ichimoku_base,
            span_b: self.ichimoku_span_b,
            displacement: self.ichimoku_displacement,
        }
    }

    pub fn sar_params(&self) -> SarParams {
        SarParams {
            af_start: self.psar_af_start,
            af_step: self.psar_af_step,
            af_max: self.psar_af_max,
        }
    }
}

// ─── Profile book ────────────────────────────────────────────────────

/// Named profiles loaded from a `[profiles.<name>]` TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileBook {
    #[serde(default)]
    profiles: BTreeMap<String, StrategyProfile>,
}

impl ProfileBook {
    /// Load a profile book from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a profile book from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut book: ProfileBook = toml::from_str(content)?;
        for (name, profile) in book.profiles.iter_mut() {
            profile.name = name.clone();
        }
        Ok(book)
    }

    /// Serialize the book to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Look up and validate a profile by name.
    pub fn get(&self, name: &str) -> Result<StrategyProfile, ConfigError> {
        let profile = self
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))?;
        profile.validate()?;
        Ok(profile.clone())
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(|s| s.as_str()).collect()
    }

    /// Add or replace a profile under its own name.
    pub fn insert(&mut self, profile: StrategyProfile) {
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The five stock strategies: short, medium and long horizon, aggressive
    /// and conservative.
    pub fn builtin() -> Self {
        use IndicatorKind::*;
        let base = StrategyProfile::default();
        let mut book = Self::default();

        book.insert(StrategyProfile {
            name: "corto_plazo".into(),
            description: Some("intraday trading".into()),
            indicators: vec![Rsi, Macd, Stochastic, Williams, ParabolicSar, Volatility],
            rsi_period: 7,
            rsi_lower: 25.0,
            rsi_upper: 75.0,
            macd_fast: 6,
            macd_slow: 13,
            macd_signal: 5,
            stochastic_period: 9,
            williams_period: 9,
            volatility_period: 10,
            interval: Some("5m".into()),
            window: Some("5d".into()),
            ..base.clone()
        });

        book.insert(StrategyProfile {
            name: "mediano_plazo".into(),
            description: Some("swing trading".into()),
            interval: Some("1d".into()),
            window: Some("6mo".into()),
            ..base.clone()
        });

        book.insert(StrategyProfile {
            name: "largo_plazo".into(),
            description: Some("long-term investing".into()),
            indicators: vec![Rsi, Macd, Sma, Ichimoku, Adx, Volatility],
            rsi_period: 21,
            ma_period: 50,
            adx_period: 20,
            volatility_period: 50,
            interval: Some("1wk".into()),
            window: Some("5y".into()),
            ..base.clone()
        });

        book.insert(StrategyProfile {
            name: "agresivo".into(),
            description: Some("high-risk scalping".into()),
            indicators: IndicatorKind::ALL.to_vec(),
            rsi_period: 7,
            rsi_lower: 20.0,
            rsi_upper: 80.0,
            bollinger_deviation: 1.5,
            psar_af_step: 0.03,
            psar_af_max: 0.3,
            interval: Some("15m".into()),
            window: Some("1mo".into()),
            ..base.clone()
        });

        book.insert(StrategyProfile {
            name: "conservador".into(),
            description: Some("conservative investing".into()),
            indicators: vec![Rsi, Macd, Sma, Bollinger, Adx],
            rsi_lower: 25.0,
            rsi_upper: 75.0,
            ma_period: 50,
            bollinger_deviation: 2.5,
            interval: Some("1d".into()),
            window: Some("1y".into()),
            ..base
        });

        book
    }
}
