//! The closed set of indicators the engine knows how to compute and classify.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Indicator identity, as named in strategy profiles.
///
/// Accepts the canonical snake_case names plus the Spanish aliases used by
/// older profile files (`media_movil`, `estocastico`, `volatilidad`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Rsi,
    Macd,
    #[serde(alias = "media_movil", alias = "ma")]
    Sma,
    Bollinger,
    #[serde(alias = "estocastico", alias = "stoch")]
    Stochastic,
    Ichimoku,
    #[serde(alias = "williams_r")]
    Williams,
    Adx,
    #[serde(alias = "parabolic", alias = "psar", alias = "sar")]
    ParabolicSar,
    #[serde(alias = "volatilidad")]
    Volatility,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 10] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Sma,
        IndicatorKind::Bollinger,
        IndicatorKind::Stochastic,
        IndicatorKind::Ichimoku,
        IndicatorKind::Williams,
        IndicatorKind::Adx,
        IndicatorKind::ParabolicSar,
        IndicatorKind::Volatility,
    ];

    /// Canonical profile/column name.
    pub fn as_str(self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Sma => "sma",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Stochastic => "stochastic",
            IndicatorKind::Ichimoku => "ichimoku",
            IndicatorKind::Williams => "williams",
            IndicatorKind::Adx => "adx",
            IndicatorKind::ParabolicSar => "parabolic_sar",
            IndicatorKind::Volatility => "volatility",
        }
    }

    /// Display label for rationales.
    pub fn label(self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Bollinger => "Bollinger",
            IndicatorKind::Stochastic => "Stochastic",
            IndicatorKind::Ichimoku => "Ichimoku",
            IndicatorKind::Williams => "Williams %R",
            IndicatorKind::Adx => "ADX",
            IndicatorKind::ParabolicSar => "Parabolic SAR",
            IndicatorKind::Volatility => "Volatility",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "rsi" => Ok(IndicatorKind::Rsi),
            "macd" => Ok(IndicatorKind::Macd),
            "sma" | "media_movil" | "ma" => Ok(IndicatorKind::Sma),
            "bollinger" => Ok(IndicatorKind::Bollinger),
            "stochastic" | "estocastico" | "stoch" => Ok(IndicatorKind::Stochastic),
            "ichimoku" => Ok(IndicatorKind::Ichimoku),
            "williams" | "williams_r" => Ok(IndicatorKind::Williams),
            "adx" => Ok(IndicatorKind::Adx),
            "parabolic_sar" | "parabolic" | "psar" | "sar" => Ok(IndicatorKind::ParabolicSar),
            "volatility" | "volatilidad" => Ok(IndicatorKind::Volatility),
            _ => Err(format!("unknown indicator: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_roundtrips_through_from_str() {
        for kind in IndicatorKind::ALL {
            assert_eq!(kind.as_str().parse::<IndicatorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn spanish_aliases_parse() {
        assert_eq!("media_movil".parse::<IndicatorKind>().unwrap(), IndicatorKind::Sma);
        assert_eq!(" Estocastico ".parse::<IndicatorKind>().unwrap(), IndicatorKind::Stochastic);
        assert_eq!("volatilidad".parse::<IndicatorKind>().unwrap(), IndicatorKind::Volatility);
        assert_eq!("parabolic".parse::<IndicatorKind>().unwrap(), IndicatorKind::ParabolicSar);
    }

    #[test]
    fn serde_accepts_aliases() {
        let kinds: Vec<IndicatorKind> =
            serde_json::from_str(r#"["media_movil", "volatilidad", "parabolic_sar"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                IndicatorKind::Sma,
                IndicatorKind::Volatility,
                IndicatorKind::ParabolicSar
            ]
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("fibonacci".parse::<IndicatorKind>().is_err());
        assert!(serde_json::from_str::<IndicatorKind>("\"fibonacci\"").is_err());
    }
}
