//! Property tests for the indicator engine and heuristics.
//!
//! Uses proptest to verify:
//! 1. RSI stays within [0, 100] and is 100 exactly when no bar loses
//! 2. Trend strength is a sum of 0/10/20 parts within [0, 100]
//! 3. The historical high only ever lowers the growth estimate
//! 4. Indicator computation is idempotent and free of look-ahead
//! 5. Fewer than 50 bars is always "unavailable"

use chrono::NaiveDate;
use proptest::prelude::*;
use stockscout_core::domain::{PriceBar, PriceSeries};
use stockscout_core::growth::{growth_potential, heuristic_growth_percent};
use stockscout_core::indicators::{compute_indicators, MIN_HISTORY_BARS};
use stockscout_core::scoring::{trend_breakdown, trend_strength};

// ── Helpers ──────────────────────────────────────────────────────────

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: base + chrono::Duration::days(i as i64),
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume: 10_000,
        })
        .collect();
    PriceSeries::new("PROP.NS", bars).unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

/// Random walk of closes, each step within ±5%.
fn arb_closes(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (
        50.0..5000.0_f64,
        prop::collection::vec(-0.05..0.05_f64, min_len..max_len),
    )
        .prop_map(|(start, steps)| {
            let mut price = start;
            steps
                .into_iter()
                .map(|r| {
                    price *= 1.0 + r;
                    (price * 100.0).round() / 100.0
                })
                .collect()
        })
}

/// Non-decreasing closes (flat or rising).
fn arb_rising_closes() -> impl Strategy<Value = Vec<f64>> {
    (10.0..1000.0_f64, prop::collection::vec(0.0..2.0_f64, 50..120)).prop_map(|(start, steps)| {
        let mut price = start;
        steps
            .into_iter()
            .map(|s| {
                price += s;
                price
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn rsi_is_bounded(closes in arb_closes(50, 200)) {
        let set = compute_indicators(&series_from_closes(&closes)).unwrap();
        for row in set.rows() {
            if let Some(rsi) = row.rsi14 {
                prop_assert!((0.0..=100.0).contains(&rsi), "rsi {}", rsi);
            }
        }
    }

    #[test]
    fn rsi_is_100_without_losses(closes in arb_rising_closes()) {
        let set = compute_indicators(&series_from_closes(&closes)).unwrap();
        prop_assert_eq!(set.latest().rsi14, Some(100.0));
    }

    #[test]
    fn trend_strength_is_sum_of_parts(closes in arb_closes(50, 250)) {
        let snap = compute_indicators(&series_from_closes(&closes)).unwrap().snapshot();
        let parts = trend_breakdown(&snap);
        for p in [parts.close_above_ma20, parts.close_above_ma50, parts.ma20_above_ma50, parts.macd_above_signal] {
            prop_assert!(p == 0 || p == 20);
        }
        prop_assert!([0, 10, 20].contains(&parts.rsi_band));
        let score = trend_strength(&snap);
        prop_assert_eq!(score, parts.total());
        prop_assert!(score <= 100);
        prop_assert_eq!(score % 10, 0);
    }

    #[test]
    fn historical_high_never_raises_growth(closes in arb_closes(50, 200)) {
        let snap = compute_indicators(&series_from_closes(&closes)).unwrap().snapshot();
        let est = growth_potential(&snap);
        prop_assert!(est.growth_percent <= heuristic_growth_percent(&snap) + 1e-12);
        prop_assert!(est.growth_percent >= 0.0);
        if snap.historical_high > snap.close {
            let headroom = (snap.historical_high / snap.close - 1.0) * 100.0;
            prop_assert!(est.growth_percent <= headroom + 1e-9);
        }
        if est.capped_by_high {
            prop_assert!(snap.historical_high > snap.close);
            prop_assert_eq!(est.target_price, snap.historical_high);
        }
    }

    #[test]
    fn indicators_are_idempotent(closes in arb_closes(50, 150)) {
        let series = series_from_closes(&closes);
        prop_assert_eq!(compute_indicators(&series), compute_indicators(&series));
    }

    #[test]
    fn indicators_do_not_look_ahead(closes in arb_closes(80, 160), cut in 50usize..80) {
        let full = compute_indicators(&series_from_closes(&closes)).unwrap();
        let prefix = compute_indicators(&series_from_closes(&closes[..cut])).unwrap();
        for (a, b) in prefix.rows().iter().zip(full.rows()) {
            prop_assert_eq!(a.date, b.date);
            prop_assert_eq!(a.ma20, b.ma20);
            prop_assert_eq!(a.rsi14, b.rsi14);
            prop_assert_eq!(a.macd, b.macd);
            prop_assert_eq!(a.signal, b.signal);
            prop_assert_eq!(a.volatility20, b.volatility20);
        }
    }

    #[test]
    fn short_history_is_unavailable(closes in arb_closes(0, MIN_HISTORY_BARS)) {
        prop_assert!(compute_indicators(&series_from_closes(&closes)).is_none());
    }
}
