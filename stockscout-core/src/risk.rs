//! Risk advice: stop-loss level, holding period and exit rules.
//!
//! [`RiskSettings`] is a plain value. The core only reads it; changing it goes
//! through [`RiskSettings::update`], which validates both fields together and
//! leaves the current settings untouched on rejection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const STOP_LOSS_RANGE: RangeInclusive<f64> = 1.0..=20.0;
pub const PROFIT_MULTIPLIER_RANGE: RangeInclusive<f64> = 0.5..=5.0;

/// Volatility (percent) above which conditions count as high-volatility.
const HIGH_VOLATILITY: f64 = 3.0;
/// Volatility (percent) above which conditions count as medium-volatility.
const MEDIUM_VOLATILITY: f64 = 2.0;
/// Trend score above which a trend counts as strong.
const STRONG_TREND: u8 = 70;
/// Share of the growth estimate taken as profit trigger in volatile markets.
const VOLATILE_PROFIT_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("stop-loss percentage must be between 1 and 20 (got {0})")]
    StopLossOutOfRange(f64),

    #[error("profit target multiplier must be between 0.5 and 5 (got {0})")]
    MultiplierOutOfRange(f64),
}

/// User-adjustable risk parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    pub stop_loss_percent: f64,
    pub profit_target_multiplier: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            stop_loss_percent: 5.0,
            profit_target_multiplier: 2.0,
        }
    }
}

impl RiskSettings {
    /// Validated constructor.
    pub fn new(stop_loss_percent: f64, profit_target_multiplier: f64) -> Result<Self, SettingsError> {
        let settings = Self {
            stop_loss_percent,
            profit_target_multiplier,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !STOP_LOSS_RANGE.contains(&self.stop_loss_percent) {
            return Err(SettingsError::StopLossOutOfRange(self.stop_loss_percent));
        }
        if !PROFIT_MULTIPLIER_RANGE.contains(&self.profit_target_multiplier) {
            return Err(SettingsError::MultiplierOutOfRange(
                self.profit_target_multiplier,
            ));
        }
        Ok(())
    }

    /// Replace both values, or neither.
    pub fn update(
        &mut self,
        stop_loss_percent: f64,
        profit_target_multiplier: f64,
    ) -> Result<(), SettingsError> {
        *self = Self::new(stop_loss_percent, profit_target_multiplier)?;
        Ok(())
    }
}

/// Stop-loss price `stop_loss_percent` below `close`.
pub fn stop_loss(close: f64, stop_loss_percent: f64) -> f64 {
    close * (1.0 - stop_loss_percent / 100.0)
}

/// Price target at `profit_target_multiplier` times the stop-loss distance.
pub fn risk_reward_target(close: f64, settings: &RiskSettings) -> f64 {
    close * (1.0 + settings.stop_loss_percent * settings.profit_target_multiplier / 100.0)
}

/// Recommended holding period bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldingPeriod {
    FourToSixWeeks,
    OneToThreeWeeks,
    TwoToFourMonths,
    OneToTwoMonths,
    FourToSixMonths,
    TwoToThreeMonths,
}

impl HoldingPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            HoldingPeriod::FourToSixWeeks => "4-6 weeks (Short-term)",
            HoldingPeriod::OneToThreeWeeks => "1-3 weeks (Very short-term)",
            HoldingPeriod::TwoToFourMonths => "2-4 months (Medium-term)",
            HoldingPeriod::OneToTwoMonths => "1-2 months (Short-term)",
            HoldingPeriod::FourToSixMonths => "4-6 months (Medium-term)",
            HoldingPeriod::TwoToThreeMonths => "2-3 months (Medium-term)",
        }
    }

    /// Duration part of the label, e.g. "4-6 weeks".
    pub fn duration(&self) -> &'static str {
        let label = self.label();
        label.split(" (").next().unwrap_or(label)
    }
}

impl fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Holding period from volatility (percent) and trend score.
///
/// Undefined volatility falls in the low-volatility row.
pub fn holding_time(volatility: Option<f64>, trend_score: u8) -> HoldingPeriod {
    let strong = trend_score > STRONG_TREND;
    match volatility {
        Some(v) if v > HIGH_VOLATILITY => {
            if strong {
                HoldingPeriod::FourToSixWeeks
            } else {
                HoldingPeriod::OneToThreeWeeks
            }
        }
        Some(v) if v > MEDIUM_VOLATILITY => {
            if strong {
                HoldingPeriod::TwoToFourMonths
            } else {
                HoldingPeriod::OneToTwoMonths
            }
        }
        _ => {
            if strong {
                HoldingPeriod::FourToSixMonths
            } else {
                HoldingPeriod::TwoToThreeMonths
            }
        }
    }
}

/// Profit-booking and loss-cutting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitStrategy {
    /// Whole-percent profit trigger (fraction discarded).
    pub profit_trigger_percent: i64,
    /// Distance from close to the stop-loss, in percent.
    pub loss_percent: f64,
    /// Whole-percent loss trigger (fraction discarded).
    pub loss_trigger_percent: i64,
    /// Close lifted by the full growth estimate.
    pub profit_target_price: f64,
}

impl fmt::Display for ExitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exit if profit reaches +{}% or loss exceeds -{}%",
            self.profit_trigger_percent, self.loss_trigger_percent
        )
    }
}

/// Exit rules. In high volatility the profit trigger is 70% of the growth estimate.
pub fn exit_strategy(
    close: f64,
    growth_percent: f64,
    stop_loss_price: f64,
    volatility: Option<f64>,
) -> ExitStrategy {
    let loss_percent = (close - stop_loss_price) / close * 100.0;
    let trigger = if volatility.is_some_and(|v| v > HIGH_VOLATILITY) {
        growth_percent * VOLATILE_PROFIT_FACTOR
    } else {
        growth_percent
    };

    ExitStrategy {
        profit_trigger_percent: trigger.trunc() as i64,
        loss_percent,
        loss_trigger_percent: loss_percent.trunc() as i64,
        profit_target_price: close * (1.0 + growth_percent / 100.0),
    }
}
