//! Synthetic series for demos and benchmarks.
//!
//! A random walk from 100.0, seeded from the symbol name, so the same
//! symbol always produces the same bars. Weekends are skipped.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use verdict_core::domain::{Bar, SeriesError, TimeSeries};

/// First session of every synthetic series.
pub fn synthetic_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 2)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// `n` deterministic daily bars for `symbol`.
pub fn synthetic_bars(symbol: &str, n: usize) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0_f64;
    let mut current = synthetic_start();

    while bars.len() < n {
        let weekday = current.weekday();
        if weekday == Weekday::Sat || weekday == Weekday::Sun {
            current += chrono::Duration::days(1);
            continue;
        }

        let daily_return: f64 = rng.gen_range(-0.03..0.03);
        let open = price;
        let close = price * (1.0 + daily_return);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(500_000..5_000_000u64);

        bars.push(Bar {
            timestamp: current,
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    bars
}

pub fn synthetic_series(symbol: &str, n: usize) -> Result<TimeSeries, SeriesError> {
    TimeSeries::new(symbol, synthetic_bars(symbol, n))
}

/// One synthetic series per symbol, in the given order.
pub fn synthetic_universe<S: AsRef<str>>(
    symbols: &[S],
    n: usize,
) -> Result<Vec<TimeSeries>, SeriesError> {
    symbols
        .iter()
        .map(|s| synthetic_series(s.as_ref(), n))
        .collect()
}
