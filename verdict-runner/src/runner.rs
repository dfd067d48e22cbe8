//! Universe analysis: the same profile over many symbols.
//!
//! Symbols share nothing but `&StrategyProfile`, so the fan-out is a plain
//! `par_iter`. Results come back in input order either way.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use verdict_core::domain::TimeSeries;
use verdict_core::engine::{analyze, SymbolReport};
use verdict_core::profile::StrategyProfile;

/// Reports for every analyzed symbol, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniverseReport {
    pub profile: String,
    pub reports: Vec<SymbolReport>,
}

impl UniverseReport {
    pub fn get(&self, symbol: &str) -> Option<&SymbolReport> {
        self.reports.iter().find(|r| r.symbol == symbol)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Analyze every series under one profile.
///
/// The profile is validated once up front, so a configuration error is
/// reported a single time instead of once per symbol.
pub fn analyze_universe(
    series: &[TimeSeries],
    profile: &StrategyProfile,
    parallel: bool,
) -> Result<UniverseReport> {
    profile
        .validate()
        .with_context(|| format!("invalid profile '{}'", profile.name))?;

    let run = |s: &TimeSeries| {
        analyze(s, profile).with_context(|| format!("analysis failed for {}", s.symbol()))
    };

    let reports: Vec<SymbolReport> = if parallel {
        series.par_iter().map(run).collect::<Result<Vec<_>>>()?
    } else {
        series.iter().map(run).collect::<Result<Vec<_>>>()?
    };

    info!(
        profile = %profile.name,
        symbols = reports.len(),
        parallel,
        "universe analyzed"
    );

    Ok(UniverseReport {
        profile: profile.name.clone(),
        reports,
    })
}
