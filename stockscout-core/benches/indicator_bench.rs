//! Criterion benchmarks for the per-ticker hot path.
//!
//! Benchmarks:
//! 1. Individual indicators (SMA, EMA, RSI, MACD, volatility)
//! 2. Full indicator set plus every heuristic for one ticker

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use stockscout_core::analyze;
use stockscout_core::domain::{PriceBar, PriceSeries};
use stockscout_core::indicators::{compute_indicators, Ema, Indicator, Macd, Rsi, Sma, Volatility};
use stockscout_core::risk::RiskSettings;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<PriceBar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 1000.0 + (i as f64 * 0.1).sin() * 50.0 + i as f64 * 0.2;
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 1.0,
                high: close + 5.0,
                low: close - 5.0,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect()
}

fn bench_indicators(c: &mut Criterion) {
    let bars = make_bars(1250);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Sma::new(50)),
        Box::new(Ema::new(26)),
        Box::new(Rsi::new(14)),
        Box::new(Macd::standard()),
        Box::new(Volatility::new(20)),
    ];

    let mut group = c.benchmark_group("indicator");
    for ind in &indicators {
        group.bench_function(ind.name(), |b| b.iter(|| ind.compute(black_box(&bars))));
    }
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let settings = RiskSettings::default();
    let mut group = c.benchmark_group("analysis");
    for n in [63, 252, 1260] {
        let series = PriceSeries::new("BENCH.NS", make_bars(n)).unwrap();
        group.bench_with_input(BenchmarkId::new("compute_indicators", n), &series, |b, s| {
            b.iter(|| compute_indicators(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("analyze", n), &series, |b, s| {
            b.iter(|| analyze(black_box(s), &settings))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_indicators, bench_analysis);
criterion_main!(benches);
