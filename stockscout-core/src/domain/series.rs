//! PriceSeries: the chronologically ordered bar history of one ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PriceBar;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar dates must be strictly increasing: {previous} is followed by {next}")]
    OutOfOrder { previous: NaiveDate, next: NaiveDate },
}

/// Daily bars for one ticker, oldest first.
///
/// Order is load-bearing: rolling windows and exponential smoothing run over
/// the bars in storage order and "latest" always means the last element.
/// Missing trading days are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series, rejecting bars whose dates are not strictly increasing.
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }
        Ok(Self {
            ticker: ticker.into(),
            bars,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Close prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Highest close over the whole series, `None` when empty.
    pub fn historical_high(&self) -> Option<f64> {
        self.bars
            .iter()
            .map(|b| b.close)
            .filter(|c| !c.is_nan())
            .fold(None, |acc, c| Some(acc.map_or(c, |m: f64| m.max(c))))
    }
}
