//! Consensus aggregation: combines the active indicators' verdicts for one
//! bar into a single verdict and a strength score.
//!
//! With n verdicts:
//! - buy wins when buy weight > sell weight and buy weight >= 0.4 n; it is a
//!   strong buy when 2 * count(strong buys) >= 0.3 n
//! - sell mirrors buy
//! - otherwise hold
//!
//! strength = Σ weights / (2 n), in [-1, 1].
//!
//! Ratios are compared in exact integer arithmetic (10 w >= 4 n), so a
//! boundary like w = 2.4 for n = 6 never flips on rounding.

use crate::domain::{ConsensusVerdict, Verdict};
use thiserror::Error;

/// Minimum winning weight, as a fraction of n: 4/10.
pub const WIN_RATIO: (u32, u32) = (4, 10);
/// Minimum doubled strong-vote count for a strong verdict, as a fraction of n: 3/10.
pub const STRONG_RATIO: (u32, u32) = (3, 10);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    #[error("cannot aggregate an empty verdict set")]
    EmptyVerdictSet,
}

/// `value >= (num/den) * n`, exactly.
fn meets_ratio(value: u32, n: u32, (num, den): (u32, u32)) -> bool {
    u64::from(value) * u64::from(den) >= u64::from(num) * u64::from(n)
}

/// Aggregate one bar's verdicts.
pub fn aggregate(verdicts: &[Verdict]) -> Result<ConsensusVerdict, ConsensusError> {
    if verdicts.is_empty() {
        return Err(ConsensusError::EmptyVerdictSet);
    }
    let n = u32::try_from(verdicts.len()).unwrap_or(u32::MAX);

    let mut buy_weight = 0u32;
    let mut sell_weight = 0u32;
    let mut strong_buys = 0u32;
    let mut strong_sells = 0u32;
    let mut total = 0i64;

    for v in verdicts {
        total += i64::from(v.weight());
        match v {
            Verdict::StrongBuy => {
                buy_weight += 2;
                strong_buys += 1;
            }
            Verdict::Buy => buy_weight += 1,
            Verdict::Hold => {}
            Verdict::Sell => sell_weight += 1,
            Verdict::StrongSell => {
                sell_weight += 2;
                strong_sells += 1;
            }
        }
    }

    let verdict = if buy_weight > sell_weight && meets_ratio(buy_weight, n, WIN_RATIO) {
        if meets_ratio(2 * strong_buys, n, STRONG_RATIO) {
            Verdict::StrongBuy
        } else {
            Verdict::Buy
        }
    } else if sell_weight > buy_weight && meets_ratio(sell_weight, n, WIN_RATIO) {
        if meets_ratio(2 * strong_sells, n, STRONG_RATIO) {
            Verdict::StrongSell
        } else {
            Verdict::Sell
        }
    } else {
        Verdict::Hold
    };

    Ok(ConsensusVerdict {
        verdict,
        strength: total as f64 / (2.0 * f64::from(n)),
        buy_weight,
        sell_weight,
    })
}
