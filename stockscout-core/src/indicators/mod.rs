//! Indicator engine.
//!
//! Each indicator is a pure function from bar history to a numeric series of
//! the same length, with NaN during warmup. `compute_indicators` runs the full
//! set once per series and converts the raw series into typed rows where an
//! undefined value is `None`, never zero.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volatility;

pub use ema::Ema;
pub use macd::{Macd, MacdLines};
pub use rsi::Rsi;
pub use sma::Sma;
pub use volatility::Volatility;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PriceBar, PriceSeries};

/// Minimum bars for a full indicator set. Shorter series are "unavailable".
pub const MIN_HISTORY_BARS: usize = 50;

/// Trait for indicators.
///
/// # Look-ahead guard
/// No value at bar t may depend on bars after t. Computing on a truncated
/// series must reproduce the prefix of the full-series output.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of leading bars that are NaN.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64>;
}

/// Indicator values for one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub daily_return: Option<f64>,
    pub volatility20: Option<f64>,
}

/// Per-bar indicators aligned 1:1 with the source series. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    ticker: String,
    rows: Vec<IndicatorRow>,
    historical_high: f64,
}

impl IndicatorSet {
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for the most recent bar.
    pub fn latest(&self) -> &IndicatorRow {
        // compute_indicators never builds an empty set
        &self.rows[self.rows.len() - 1]
    }

    /// Highest close across the whole series.
    pub fn historical_high(&self) -> f64 {
        self.historical_high
    }

    /// Last-bar view consumed by scoring, growth and risk.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        let row = self.latest();
        IndicatorSnapshot {
            bar_count: self.rows.len(),
            close: row.close,
            ma20: row.ma20,
            ma50: row.ma50,
            ma200: row.ma200,
            rsi14: row.rsi14,
            macd: row.macd,
            signal: row.signal,
            volatility20: row.volatility20,
            historical_high: self.historical_high,
        }
    }
}

/// Indicator state at the latest bar, plus the series-wide facts that the
/// heuristics need (bar count, historical high close).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub bar_count: usize,
    pub close: f64,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub volatility20: Option<f64>,
    pub historical_high: f64,
}

/// Compute the full indicator set, or `None` when the series holds fewer than
/// [`MIN_HISTORY_BARS`] bars.
pub fn compute_indicators(series: &PriceSeries) -> Option<IndicatorSet> {
    let bars = series.bars();
    if bars.len() < MIN_HISTORY_BARS {
        return None;
    }

    let closes = series.closes();
    let ma20 = Sma::new(20).compute(bars);
    let ma50 = Sma::new(50).compute(bars);
    let ma200 = Sma::new(200).compute(bars);
    let rsi14 = Rsi::new(14).compute(bars);
    let macd = Macd::standard().compute_lines(bars);
    let returns = volatility::daily_returns(&closes);
    let volatility20 = Volatility::new(20).compute(bars);

    let rows = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            ma20: defined(ma20[i]),
            ma50: defined(ma50[i]),
            ma200: defined(ma200[i]),
            rsi14: defined(rsi14[i]),
            ema12: defined(macd.fast_ema[i]),
            ema26: defined(macd.slow_ema[i]),
            macd: defined(macd.macd[i]),
            signal: defined(macd.signal[i]),
            daily_return: defined(returns[i]),
            volatility20: defined(volatility20[i]),
        })
        .collect();

    Some(IndicatorSet {
        ticker: series.ticker().to_string(),
        rows,
        historical_high: series.historical_high().unwrap_or(f64::NAN),
    })
}

fn defined(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<PriceBar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Series helper for tests.
#[cfg(test)]
pub fn make_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new("TEST.NS", make_bars(closes)).unwrap()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
