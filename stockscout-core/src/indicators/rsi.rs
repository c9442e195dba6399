//! Relative Strength Index (RSI).
//!
//! Simple rolling means (not Wilder smoothing) of gains and losses:
//! gain = mean of positive close-to-close changes over the window,
//! loss = mean of absolute negative changes over the window,
//! RSI = 100 - 100 / (1 + gain / loss).
//!
//! The first bar has no prior close; its change counts as 0 so the first
//! value lands at index period-1.
//! Edge case: loss == 0 → RSI = 100 (no division is performed).

use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let n = bars.len();
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];

        for i in 1..n {
            let change = bars[i].close - bars[i - 1].close;
            if change.is_nan() {
                gains[i] = f64::NAN;
                losses[i] = f64::NAN;
            } else if change > 0.0 {
                gains[i] = change;
            } else if change < 0.0 {
                losses[i] = -change;
            }
        }

        let avg_gain = rolling_mean(&gains, self.period);
        let avg_loss = rolling_mean(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&gain, &loss)| rsi_from_averages(gain, loss))
            .collect()
    }
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_gain.is_nan() || avg_loss.is_nan() {
        f64::NAN
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
