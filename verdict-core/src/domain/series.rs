//! TimeSeries: the validated, immutable input boundary of the engine.

use super::bar::Bar;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

/// Why a series was rejected at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("{symbol}: non-finite {field} at bar {index}")]
    NonFinite {
        symbol: String,
        index: usize,
        field: &'static str,
    },

    #[error("{symbol}: bar {index} has high/low that do not bracket open and close")]
    InconsistentBar { symbol: String, index: usize },

    #[error("{symbol}: timestamp {current} at bar {index} is before {previous}")]
    OutOfOrder {
        symbol: String,
        index: usize,
        previous: NaiveDateTime,
        current: NaiveDateTime,
    },

    #[error("{symbol}: duplicate timestamp {timestamp} at bar {index}")]
    Duplicate {
        symbol: String,
        index: usize,
        timestamp: NaiveDateTime,
    },
}

/// Ordered OHLCV bars for one symbol.
///
/// Bars are strictly increasing by timestamp, every price field is finite,
/// and each bar's high/low bracket its open and close. The only way to build one is [`TimeSeries::new`], and there is no
/// mutable access afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl TimeSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SeriesError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(SeriesError::EmptySymbol);
        }

        for (index, bar) in bars.iter().enumerate() {
            let fields = [
                ("open", bar.open),
                ("high", bar.high),
                ("low", bar.low),
                ("close", bar.close),
            ];
            if let Some((field, _)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
                return Err(SeriesError::NonFinite {
                    symbol,
                    index,
                    field,
                });
            }
            if !bar.is_sane() {
                return Err(SeriesError::InconsistentBar { symbol, index });
            }
        }

        for (index, pair) in bars.windows(2).enumerate() {
            let (previous, current) = (pair[0].timestamp, pair[1].timestamp);
            if current == previous {
                return Err(SeriesError::Duplicate {
                    symbol,
                    index: index + 1,
                    timestamp: current,
                });
            }
            if current < previous {
                return Err(SeriesError::OutOfOrder {
                    symbol,
                    index: index + 1,
                    previous,
                    current,
                });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar, if any.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
