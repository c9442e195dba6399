//! Single-ticker analysis: every heuristic applied to one price series.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PriceSeries;
use crate::growth::{growth_potential, GrowthEstimate};
use crate::indicators::{compute_indicators, IndicatorSet, IndicatorSnapshot, MIN_HISTORY_BARS};
use crate::risk::{
    exit_strategy, holding_time, risk_reward_target, stop_loss, ExitStrategy, HoldingPeriod,
    RiskSettings,
};
use crate::scoring::{buy_signal, trend_breakdown, Signal, TrendBreakdown};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("not enough history: {bars} bars, need at least {MIN_HISTORY_BARS}")]
    InsufficientHistory { bars: usize },
}

/// Trade recommendation for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerAnalysis {
    pub ticker: String,
    pub snapshot: IndicatorSnapshot,
    pub trend_score: u8,
    pub trend_breakdown: TrendBreakdown,
    pub signal: Signal,
    pub growth: GrowthEstimate,
    pub stop_loss_price: f64,
    pub holding_period: HoldingPeriod,
    pub exit_strategy: ExitStrategy,
    pub risk_reward_target: f64,
}

impl TickerAnalysis {
    pub fn close(&self) -> f64 {
        self.snapshot.close
    }
}

/// Compute indicators for `series` and derive the full recommendation.
pub fn analyze(series: &PriceSeries, settings: &RiskSettings) -> Result<TickerAnalysis, AnalysisError> {
    let indicators = compute_indicators(series).ok_or(AnalysisError::InsufficientHistory {
        bars: series.len(),
    })?;
    Ok(analyze_indicators(&indicators, settings))
}

/// Derive the recommendation from an already computed indicator set.
pub fn analyze_indicators(indicators: &IndicatorSet, settings: &RiskSettings) -> TickerAnalysis {
    let snap = indicators.snapshot();
    let breakdown = trend_breakdown(&snap);
    let trend_score = breakdown.total();
    let growth = growth_potential(&snap);
    let stop_loss_price = stop_loss(snap.close, settings.stop_loss_percent);

    TickerAnalysis {
        ticker: indicators.ticker().to_string(),
        snapshot: snap,
        trend_score,
        trend_breakdown: breakdown,
        signal: buy_signal(&snap),
        growth,
        stop_loss_price,
        holding_period: holding_time(snap.volatility20, trend_score),
        exit_strategy: exit_strategy(
            snap.close,
            growth.growth_percent,
            stop_loss_price,
            snap.volatility20,
        ),
        risk_reward_target: risk_reward_target(snap.close, settings),
    }
}
