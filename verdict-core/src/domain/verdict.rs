//! Verdict classes and the per-indicator / consensus verdict records.

use super::kind::IndicatorKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-class ordinal trading verdict.
///
/// Serialized with the codes downstream consumers already store
/// (`COMPRA_FUERTE`, `COMPRA`, `HOLD`, `VENTA`, `VENTA_FUERTE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "COMPRA_FUERTE")]
    StrongBuy,
    #[serde(rename = "COMPRA")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "VENTA")]
    Sell,
    #[serde(rename = "VENTA_FUERTE")]
    StrongSell,
}

impl Verdict {
    pub const ALL: [Verdict; 5] = [
        Verdict::StrongBuy,
        Verdict::Buy,
        Verdict::Hold,
        Verdict::Sell,
        Verdict::StrongSell,
    ];

    /// Signed vote weight: +2, +1, 0, -1, -2.
    pub fn weight(self) -> i32 {
        match self {
            Verdict::StrongBuy => 2,
            Verdict::Buy => 1,
            Verdict::Hold => 0,
            Verdict::Sell => -1,
            Verdict::StrongSell => -2,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Verdict::StrongBuy => "COMPRA_FUERTE",
            Verdict::Buy => "COMPRA",
            Verdict::Hold => "HOLD",
            Verdict::Sell => "VENTA",
            Verdict::StrongSell => "VENTA_FUERTE",
        }
    }

    /// Compact code used in wide tables (`C_F`, `C`, `H`, `V`, `V_F`).
    pub fn short_code(self) -> &'static str {
        match self {
            Verdict::StrongBuy => "C_F",
            Verdict::Buy => "C",
            Verdict::Hold => "H",
            Verdict::Sell => "V",
            Verdict::StrongSell => "V_F",
        }
    }

    pub fn is_buy(self) -> bool {
        matches!(self, Verdict::StrongBuy | Verdict::Buy)
    }

    pub fn is_sell(self) -> bool {
        matches!(self, Verdict::StrongSell | Verdict::Sell)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.code())
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.code() == s || v.short_code() == s)
            .ok_or_else(|| format!("unknown verdict: {s}"))
    }
}

/// One indicator's verdict at one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorVerdict {
    pub indicator: IndicatorKind,
    pub verdict: Verdict,
    /// Raw numeric value the rule was evaluated on. `None` means no data.
    pub value: Option<f64>,
    pub rationale: String,
}

impl IndicatorVerdict {
    pub fn new(
        indicator: IndicatorKind,
        verdict: Verdict,
        value: f64,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            indicator,
            verdict,
            value: Some(value),
            rationale: rationale.into(),
        }
    }

    /// HOLD with no value, used whenever an input series is still undefined.
    pub fn no_data(indicator: IndicatorKind) -> Self {
        Self {
            indicator,
            verdict: Verdict::Hold,
            value: None,
            rationale: format!("{} - no data", indicator.label()),
        }
    }

    pub fn has_data(&self) -> bool {
        self.value.is_some()
    }
}

/// Aggregated verdict for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusVerdict {
    pub verdict: Verdict,
    /// Σ weights / (2n), in [-1, 1].
    pub strength: f64,
    pub buy_weight: u32,
    pub sell_weight: u32,
}
