//! Criterion benchmarks for the analysis hot paths.
//!
//! Benchmarks:
//! 1. Indicator precompute (single series and the full ten-indicator stack)
//! 2. Consensus aggregation
//! 3. Full `analyze` per profile

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use verdict_core::consensus::aggregate;
use verdict_core::domain::{Bar, TimeSeries, Verdict};
use verdict_core::engine::{analyze, precompute_indicators};
use verdict_core::factory::required_indicators;
use verdict_core::indicators::{Indicator, Rsi};
use verdict_core::profile::ProfileBook;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

// ── 1. Indicator Precompute ──────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_precompute");
    let book = ProfileBook::builtin();
    let full = book.get("agresivo").unwrap();

    for &bar_count in &[252, 1260, 2520] {
        let bars = make_bars(bar_count);

        let rsi: Vec<Box<dyn Indicator>> = vec![Box::new(Rsi::new(14))];
        group.bench_with_input(BenchmarkId::new("rsi_14", bar_count), &bar_count, |b, _| {
            b.iter(|| precompute_indicators(black_box(&bars), black_box(&rsi)));
        });

        let stack = required_indicators(&full);
        group.bench_with_input(
            BenchmarkId::new("all_indicators", bar_count),
            &bar_count,
            |b, _| {
                b.iter(|| precompute_indicators(black_box(&bars), black_box(&stack)));
            },
        );
    }

    group.finish();
}

// ── 2. Consensus ─────────────────────────────────────────────────────

fn bench_consensus(c: &mut Criterion) {
    let votes = [
        Verdict::StrongBuy,
        Verdict::Buy,
        Verdict::Hold,
        Verdict::Sell,
        Verdict::Buy,
        Verdict::Hold,
        Verdict::StrongSell,
        Verdict::Buy,
        Verdict::Hold,
        Verdict::Buy,
    ];
    c.bench_function("aggregate_10_votes", |b| {
        b.iter(|| aggregate(black_box(&votes)));
    });
}

// ── 3. Full Analysis ─────────────────────────────────────────────────

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let series = TimeSeries::new("BENCH", make_bars(1260)).unwrap();
    let book = ProfileBook::builtin();

    for name in book.names() {
        let profile = book.get(name).unwrap();
        group.bench_function(BenchmarkId::new("1260_bars", name), |b| {
            b.iter(|| analyze(black_box(&series), black_box(&profile)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_indicators, bench_consensus, bench_analyze);
criterion_main!(benches);
