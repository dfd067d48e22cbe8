//! Per-bar output table.

use crate::domain::{Bar, ConsensusVerdict, IndicatorKind, IndicatorVerdict, Verdict};
use crate::fingerprint::ReportDigest;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarReport {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Raw indicator series values by series name; `None` is undefined.
    pub values: BTreeMap<String, Option<f64>>,
    /// One verdict per active indicator, in profile order.
    pub verdicts: Vec<IndicatorVerdict>,
    pub consensus: ConsensusVerdict,
}

impl BarReport {
    pub(crate) fn new(
        bar: &Bar,
        values: BTreeMap<String, Option<f64>>,
        verdicts: Vec<IndicatorVerdict>,
        consensus: ConsensusVerdict,
    ) -> Self {
        Self {
            timestamp: bar.timestamp,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            values,
            verdicts,
            consensus,
        }
    }

    pub fn verdict_for(&self, kind: IndicatorKind) -> Option<&IndicatorVerdict> {
        self.verdicts.iter().find(|v| v.indicator == kind)
    }
}

/// Full analysis of one symbol under one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolReport {
    pub symbol: String,
    pub profile: String,
    /// Active indicators, in profile order.
    pub indicators: Vec<IndicatorKind>,
    /// Raw series names, in export order.
    pub series: Vec<String>,
    /// Bars before every indicator series is defined.
    pub warmup_bars: usize,
    pub bars: Vec<BarReport>,
    /// BLAKE3 over the profile and the table.
    pub digest: ReportDigest,
}

impl SymbolReport {
    /// Most recent row.
    pub fn latest(&self) -> Option<&BarReport> {
        self.bars.last()
    }

    /// Consensus verdict of the most recent bar.
    pub fn latest_verdict(&self) -> Option<Verdict> {
        self.latest().map(|b| b.consensus.verdict)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
