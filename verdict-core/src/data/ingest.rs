//! Raw provider rows into a validated [`TimeSeries`].
//!
//! Rows arrive as strings in whatever order the source produced them.
//! Timestamps and numbers are parsed, rows are sorted ascending, exact
//! duplicate timestamps keep the last occurrence, and the result goes
//! through [`TimeSeries::new`].

use crate::domain::{Bar, SeriesError, TimeSeries};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One unparsed row, as read from CSV or a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBar {
    #[serde(alias = "date", alias = "timestamp")]
    pub datetime: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    #[serde(default)]
    pub volume: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error("{symbol}: unparseable timestamp '{value}' at row {row}")]
    BadTimestamp {
        symbol: String,
        row: usize,
        value: String,
    },

    #[error("{symbol}: unparseable {field} '{value}' at row {row}")]
    BadNumber {
        symbol: String,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Parse a timestamp in any accepted format. Plain dates map to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Normalize raw rows for `symbol` into a series.
pub fn ingest(symbol: &str, rows: Vec<RawBar>) -> Result<TimeSeries, IngestError> {
    let mut bars = rows
        .iter()
        .enumerate()
        .map(|(row, raw)| parse_row(symbol, row, raw))
        .collect::<Result<Vec<Bar>, IngestError>>()?;

    // Stable sort keeps source order among equal timestamps, so the last
    // occurrence in the input is the last in its run.
    bars.sort_by_key(|b| b.timestamp);

    let before = bars.len();
    let mut deduped: Vec<Bar> = Vec::with_capacity(before);
    for bar in bars {
        match deduped.last_mut() {
            Some(prev) if prev.timestamp == bar.timestamp => *prev = bar,
            _ => deduped.push(bar),
        }
    }
    let dropped = before - deduped.len();
    if dropped > 0 {
        warn!(symbol, dropped, "dropped duplicate timestamps");
    }

    Ok(TimeSeries::new(symbol, deduped)?)
}

fn parse_row(symbol: &str, row: usize, raw: &RawBar) -> Result<Bar, IngestError> {
    let timestamp = parse_timestamp(&raw.datetime).ok_or_else(|| IngestError::BadTimestamp {
        symbol: symbol.to_string(),
        row,
        value: raw.datetime.clone(),
    })?;

    let price = |field: &'static str, value: &str| -> Result<f64, IngestError> {
        value.trim().parse::<f64>().map_err(|_| IngestError::BadNumber {
            symbol: symbol.to_string(),
            row,
            field,
            value: value.to_string(),
        })
    };

    let volume = match raw.volume.trim() {
        "" => 0,
        v => v
            .parse::<u64>()
            .or_else(|_| v.parse::<f64>().map(|f| f.max(0.0).round() as u64))
            .map_err(|_| IngestError::BadNumber {
                symbol: symbol.to_string(),
                row,
                field: "volume",
                value: raw.volume.clone(),
            })?,
    };

    Ok(Bar {
        timestamp,
        open: price("open", &raw.open)?,
        high: price("high", &raw.high)?,
        low: price("low", &raw.low)?,
        close: price("close", &raw.close)?,
        volume,
    })
}
