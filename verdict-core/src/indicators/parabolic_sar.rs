//! Parabolic SAR: Wilder's acceleration factor system.
//!
//! Inherently sequential: an explicit [`SarState`] (trend, SAR, extreme
//! point, acceleration factor) is advanced one bar at a time.
//!
//! Parameters: af_start (default 0.02), af_step (default 0.02), af_max (default 0.20).
//! Lookback: 1 (needs at least 2 bars to start).

use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

/// Acceleration factor schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarParams {
    pub af_start: f64,
    pub af_step: f64,
    pub af_max: f64,
}

impl Default for SarParams {
    fn default() -> Self {
        Self {
            af_start: 0.02,
            af_step: 0.02,
            af_max: 0.20,
        }
    }
}

/// State carried from one bar to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SarState {
    pub trend: Trend,
    pub sar: f64,
    pub extreme_point: f64,
    pub acceleration: f64,
}

impl SarState {
    /// Initial state from the first two bars. The trend is up when the
    /// second close is not below the first.
    pub fn start(first: &Bar, second: &Bar, params: &SarParams) -> Self {
        if second.close >= first.close {
            Self {
                trend: Trend::Up,
                sar: first.low,
                extreme_point: second.high,
                acceleration: params.af_start,
            }
        } else {
            Self {
                trend: Trend::Down,
                sar: first.high,
                extreme_point: second.low,
                acceleration: params.af_start,
            }
        }
    }

    /// Advance to `bar`, given the two bars before it.
    pub fn advance(&self, bar: &Bar, prev1: &Bar, prev2: &Bar, params: &SarParams) -> Self {
        let projected = self.sar + self.acceleration * (self.extreme_point - self.sar);

        match self.trend {
            Trend::Up => {
                // SAR may not sit above either of the two previous lows.
                let sar = projected.min(prev1.low).min(prev2.low);
                if bar.low < sar {
                    return Self {
                        trend: Trend::Down,
                        sar: self.extreme_point,
                        extreme_point: bar.low,
                        acceleration: params.af_start,
                    };
                }
                let (extreme_point, acceleration) = if bar.high > self.extreme_point {
                    (bar.high, (self.acceleration + params.af_step).min(params.af_max))
                } else {
                    (self.extreme_point, self.acceleration)
                };
                Self {
                    trend: Trend::Up,
                    sar,
                    extreme_point,
                    acceleration,
                }
            }
            Trend::Down => {
                // SAR may not sit below either of the two previous highs.
                let sar = projected.max(prev1.high).max(prev2.high);
                if bar.high > sar {
                    return Self {
                        trend: Trend::Up,
                        sar: self.extreme_point,
                        extreme_point: bar.high,
                        acceleration: params.af_start,
                    };
                }
                let (extreme_point, acceleration) = if bar.low < self.extreme_point {
                    (bar.low, (self.acceleration + params.af_step).min(params.af_max))
                } else {
                    (self.extreme_point, self.acceleration)
                };
                Self {
                    trend: Trend::Down,
                    sar,
                    extreme_point,
                    acceleration,
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    params: SarParams,
    name: String,
}

impl ParabolicSar {
    /// # Panics
    ///
    /// Panics if `af_start` or `af_step` is not positive, or `af_max` is
    /// below `af_start`.
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Self {
        Self::from_params(SarParams {
            af_start,
            af_step,
            af_max,
        })
    }

    /// # Panics
    ///
    /// Same conditions as [`ParabolicSar::new`].
    pub fn from_params(params: SarParams) -> Self {
        assert!(params.af_start > 0.0, "AF start must be > 0");
        assert!(params.af_step > 0.0, "AF step must be > 0");
        assert!(params.af_max >= params.af_start, "AF max must be >= AF start");
        Self {
            name: Self::key(params.af_start, params.af_step, params.af_max),
            params,
        }
    }

    pub fn key(af_start: f64, af_step: f64, af_max: f64) -> String {
        format!("psar_{af_start}_{af_step}_{af_max}")
    }

    /// Default parameters: 0.02, 0.02, 0.20
    pub fn default_params() -> Self {
        let p = SarParams::default();
        Self::new(p.af_start, p.af_step, p.af_max)
    }

    /// Full state trail, one entry per bar from bar 1 on.
    pub fn states(&self, bars: &[Bar]) -> Vec<Option<SarState>> {
        let n = bars.len();
        let mut states = vec![None; n];
        if n < 2 {
            return states;
        }

        let mut state = SarState::start(&bars[0], &bars[1], &self.params);
        states[1] = Some(state);
        for i in 2..n {
            state = state.advance(&bars[i], &bars[i - 1], &bars[i - 2], &self.params);
            states[i] = Some(state);
        }

        states
    }
}

impl Indicator for ParabolicSar {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.states(bars)
            .into_iter()
            .map(|s| s.map_or(f64::NAN, |s| s.sar))
            .collect()
    }
}
