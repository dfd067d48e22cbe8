//! Report export: per-bar CSV, JSON, and the latest-verdict summary.
//!
//! CSV has one row per bar: timestamp, OHLCV, then `<indicator>_value`,
//! `<indicator>_verdict`, `<indicator>_rationale` for every active indicator
//! in profile order, then `consensus` and `strength`. Undefined values are
//! empty cells. JSON is the full `SymbolReport`, raw series included.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;
use verdict_core::domain::Verdict;
use verdict_core::engine::SymbolReport;

use crate::runner::UniverseReport;

// ─── CSV export ─────────────────────────────────────────────────────

/// Export one symbol's per-bar table as CSV.
pub fn report_csv(report: &SymbolReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<String> = ["timestamp", "open", "high", "low", "close", "volume"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    for kind in &report.indicators {
        header.push(format!("{kind}_value"));
        header.push(format!("{kind}_verdict"));
        header.push(format!("{kind}_rationale"));
    }
    header.push("consensus".into());
    header.push("strength".into());
    wtr.write_record(&header)?;

    for row in &report.bars {
        let mut record = vec![
            row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.6}", row.open),
            format!("{:.6}", row.high),
            format!("{:.6}", row.low),
            format!("{:.6}", row.close),
            row.volume.to_string(),
        ];
        for kind in &report.indicators {
            match row.verdict_for(*kind) {
                Some(v) => {
                    record.push(v.value.map(|x| format!("{x:.6}")).unwrap_or_default());
                    record.push(v.verdict.code().to_string());
                    record.push(v.rationale.clone());
                }
                None => record.extend([String::new(), String::new(), String::new()]),
            }
        }
        record.push(row.consensus.verdict.code().to_string());
        record.push(format!("{:.4}", row.consensus.strength));
        wtr.write_record(&record)?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SymbolReport` to pretty JSON.
pub fn report_json(report: &SymbolReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize SymbolReport to JSON")
}

// ─── Latest summary ─────────────────────────────────────────────────

/// The most recent consensus for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestVerdict {
    pub symbol: String,
    pub profile: String,
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub verdict: Verdict,
    pub strength: f64,
}

/// Last bar's consensus per symbol, in universe order. Empty series are
/// left out.
pub fn latest_summary(universe: &UniverseReport) -> Vec<LatestVerdict> {
    universe
        .reports
        .iter()
        .filter_map(|r| {
            let last = r.latest()?;
            Some(LatestVerdict {
                symbol: r.symbol.clone(),
                profile: r.profile.clone(),
                timestamp: last.timestamp,
                close: last.close,
                verdict: last.consensus.verdict,
                strength: last.consensus.strength,
            })
        })
        .collect()
}

// ─── Files ──────────────────────────────────────────────────────────

/// Write `<symbol>_<profile>.csv` and `.json` per symbol plus
/// `summary_<profile>.json` into `dir`. Returns the written paths.
pub fn save_reports(universe: &UniverseReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    for report in &universe.reports {
        let stem = format!("{}_{}", report.symbol, report.profile);

        let csv_path = dir.join(format!("{stem}.csv"));
        fs::write(&csv_path, report_csv(report)?)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        written.push(csv_path);

        let json_path = dir.join(format!("{stem}.json"));
        fs::write(&json_path, report_json(report)?)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        written.push(json_path);
    }

    let summary_path = dir.join(format!("summary_{}.json", universe.profile));
    let summary = serde_json::to_string_pretty(&latest_summary(universe))
        .context("failed to serialize summary")?;
    fs::write(&summary_path, summary)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;
    written.push(summary_path);

    info!(dir = %dir.display(), files = written.len(), "reports saved");
    Ok(written)
}
