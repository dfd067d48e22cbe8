//! Ichimoku Kinko Hyo.
//!
//! Five lines (separate Indicator instances):
//! - Tenkan (conversion): (HH + LL) / 2 over `conversion` bars
//! - Kijun (base): (HH + LL) / 2 over `base` bars
//! - Senkou A: (Tenkan + Kijun) / 2, shifted forward by `displacement`
//! - Senkou B: (HH + LL) / 2 over `span_b` bars, shifted forward by `displacement`
//! - Chikou: close shifted back by `displacement`
//!
//! Chikou[t] = close[t + displacement], so it reads future bars by
//! definition; it is the only non-causal series in the library.

use super::indicator::Indicator;
use super::rolling::midpoint;
use crate::domain::Bar;

/// Which Ichimoku line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IchimokuLine {
    Tenkan,
    Kijun,
    SenkouA,
    SenkouB,
    Chikou,
}

/// Period set shared by every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IchimokuParams {
    pub conversion: usize,
    pub base: usize,
    pub span_b: usize,
    pub displacement: usize,
}

impl Default for IchimokuParams {
    fn default() -> Self {
        Self {
            conversion: 9,
            base: 26,
            span_b: 52,
            displacement: 26,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    params: IchimokuParams,
    line: IchimokuLine,
    name: String,
}

impl Ichimoku {
    /// # Panics
    ///
    /// Panics if the conversion, base or span B period is zero.
    pub fn new(params: IchimokuParams, line: IchimokuLine) -> Self {
        assert!(params.conversion >= 1, "Ichimoku conversion period must be >= 1");
        assert!(params.base >= 1, "Ichimoku base period must be >= 1");
        assert!(params.span_b >= 1, "Ichimoku span B period must be >= 1");
        Self {
            params,
            line,
            name: Self::key(&params, line),
        }
    }

    pub fn key(p: &IchimokuParams, line: IchimokuLine) -> String {
        match line {
            IchimokuLine::Tenkan => format!("ichimoku_tenkan_{}", p.conversion),
            IchimokuLine::Kijun => format!("ichimoku_kijun_{}", p.base),
            IchimokuLine::SenkouA => format!(
                "ichimoku_senkou_a_{}_{}_{}",
                p.conversion, p.base, p.displacement
            ),
            IchimokuLine::SenkouB => {
                format!("ichimoku_senkou_b_{}_{}", p.span_b, p.displacement)
            }
            IchimokuLine::Chikou => format!("ichimoku_chikou_{}", p.displacement),
        }
    }
}

/// Shift a series forward: out[t] = values[t - by].
fn shift_forward(values: &[f64], by: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![f64::NAN; n];
    for t in by..n {
        out[t] = values[t - by];
    }
    out
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        let p = &self.params;
        match self.line {
            IchimokuLine::Tenkan => p.conversion - 1,
            IchimokuLine::Kijun => p.base - 1,
            IchimokuLine::SenkouA => p.conversion.max(p.base) - 1 + p.displacement,
            IchimokuLine::SenkouB => p.span_b - 1 + p.displacement,
            IchimokuLine::Chikou => 0,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let p = &self.params;
        match self.line {
            IchimokuLine::Tenkan => midpoint(bars, p.conversion),
            IchimokuLine::Kijun => midpoint(bars, p.base),
            IchimokuLine::SenkouA => {
                let tenkan = midpoint(bars, p.conversion);
                let kijun = midpoint(bars, p.base);
                let span_a: Vec<f64> = tenkan
                    .iter()
                    .zip(&kijun)
                    .map(|(t, k)| (t + k) / 2.0)
                    .collect();
                shift_forward(&span_a, p.displacement)
            }
            IchimokuLine::SenkouB => shift_forward(&midpoint(bars, p.span_b), p.displacement),
            IchimokuLine::Chikou => {
                let n = bars.len();
                (0..n)
                    .map(|t| bars.get(t + p.displacement).map_or(f64::NAN, |b| b.close))
                    .collect()
            }
        }
    }
}
