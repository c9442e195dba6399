//! Opportunity: one affordable ticker with its recommendation.

use serde::{Deserialize, Serialize};
use stockscout_core::risk::HoldingPeriod;
use stockscout_core::scoring::Signal;
use stockscout_core::TickerAnalysis;

/// A ticker that passed the budget filter, with everything the report shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub shares_affordable: u64,
    pub investment_amount: f64,
    pub trend_score: u8,
    pub signal: Signal,
    pub growth_percent: f64,
    pub target_price: f64,
    pub stop_loss_price: f64,
    pub holding_time: HoldingPeriod,
    pub exit_strategy: String,
}

/// Whole shares of `price` that fit in `budget`.
pub fn shares_affordable(budget: f64, price: f64) -> u64 {
    if price.is_nan() || price <= 0.0 || !budget.is_finite() {
        return 0;
    }
    (budget / price).floor() as u64
}

impl Opportunity {
    /// Build from an analysis, or `None` when not a single share is affordable.
    pub fn from_analysis(analysis: &TickerAnalysis, name: String, budget: f64) -> Option<Self> {
        let price = analysis.close();
        if price > budget {
            return None;
        }
        let shares = shares_affordable(budget, price);
        if shares < 1 {
            return None;
        }

        Some(Self {
            ticker: analysis.ticker.clone(),
            name,
            price,
            shares_affordable: shares,
            investment_amount: shares as f64 * price,
            trend_score: analysis.trend_score,
            signal: analysis.signal,
            growth_percent: analysis.growth.growth_percent,
            target_price: analysis.growth.target_price,
            stop_loss_price: analysis.stop_loss_price,
            holding_time: analysis.holding_period,
            exit_strategy: analysis.exit_strategy.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_floored() {
        assert_eq!(shares_affordable(10_000.0, 2_400.0), 4);
        assert_eq!(shares_affordable(10_000.0, 10_000.0), 1);
        assert_eq!(shares_affordable(10_000.0, 12_000.0), 0);
    }

    #[test]
    fn degenerate_prices_buy_nothing() {
        assert_eq!(shares_affordable(10_000.0, 0.0), 0);
        assert_eq!(shares_affordable(10_000.0, f64::NAN), 0);
        assert_eq!(shares_affordable(f64::INFINITY, 10.0), 0);
    }
}
