//! Deterministic synthetic price data for offline runs and tests.
//!
//! Each ticker gets its own random walk, seeded from a BLAKE3 hash of the
//! ticker, so the same ticker and end date always give the same bars.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{DataError, DataProvider, HistoryPeriod};
use crate::domain::{display_ticker, PriceBar, PriceSeries};

/// Offline provider generating a reproducible random walk per ticker.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    end: NaiveDate,
    suffix: String,
}

impl SyntheticProvider {
    /// Histories end at `end` (inclusive).
    pub fn new(end: NaiveDate, suffix: impl Into<String>) -> Self {
        Self {
            end,
            suffix: suffix.into(),
        }
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

fn rng_for(ticker: &str) -> StdRng {
    let seed: [u8; 32] = *blake3::hash(ticker.as_bytes()).as_bytes();
    StdRng::from_seed(seed)
}

/// Weekday-only bars for `ticker` between `start` and `end`.
pub fn generate_synthetic_bars(ticker: &str, start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
    let mut rng = rng_for(ticker);

    // Spread starting prices so a budget filter has something to do
    let mut price: f64 = rng.gen_range(50.0..5000.0);
    let drift: f64 = rng.gen_range(-0.002..0.003);
    let mut bars = Vec::new();
    let mut current = start;

    while current <= end {
        if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            current += Duration::days(1);
            continue;
        }

        let daily_return: f64 = drift + rng.gen_range(-0.025..0.025);
        let open = price;
        let close = (price * (1.0 + daily_return)).max(1.0);
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
        let volume = rng.gen_range(100_000..5_000_000u64);

        bars.push(PriceBar {
            date: current,
            open,
            high,
            low,
            close,
            volume,
        });

        price = close;
        current += Duration::days(1);
    }

    bars
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch_history(&self, ticker: &str, period: HistoryPeriod) -> Result<PriceSeries, DataError> {
        let start = self.end - Duration::days(period.calendar_days());
        let bars = generate_synthetic_bars(ticker, start, self.end);
        if bars.is_empty() {
            return Err(DataError::EmptySeries {
                symbol: ticker.to_string(),
            });
        }
        Ok(PriceSeries::new(ticker, bars)?)
    }

    fn fetch_display_name(&self, ticker: &str) -> Result<String, DataError> {
        Ok(format!("{} (synthetic)", display_ticker(ticker, &self.suffix)))
    }
}
