//! MACD: difference of two EMAs of close, with a signal EMA and histogram.
//!
//! Three lines (separate Indicator instances):
//! - Line: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(Line, signal)
//! - Histogram: Line - Signal
//!
//! Every EMA is seeded with its first input, so all three lines are defined
//! from bar 0. Lookback: 0.

use super::ema::ema_of_series;
use super::indicator::Indicator;
use crate::domain::Bar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    /// # Panics
    ///
    /// Panics if any of the three spans is zero.
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1, "MACD fast span must be >= 1");
        assert!(slow >= 1, "MACD slow span must be >= 1");
        assert!(signal >= 1, "MACD signal span must be >= 1");
        Self {
            fast,
            slow,
            signal,
            line,
            name: Self::key(fast, slow, signal, line),
        }
    }

    pub fn key(fast: usize, slow: usize, signal: usize, line: MacdLine) -> String {
        let prefix = match line {
            MacdLine::Line => "macd",
            MacdLine::Signal => "macd_signal",
            MacdLine::Histogram => "macd_hist",
        };
        format!("{prefix}_{fast}_{slow}_{signal}")
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

        if self.line == MacdLine::Line {
            return line;
        }

        let signal = ema_of_series(&line, self.signal);
        match self.line {
            MacdLine::Signal => signal,
            _ => line.iter().zip(&signal).map(|(m, s)| m - s).collect(),
        }
    }
}
