//! Trend-strength score and BUY/HOLD/SELL signal.
//!
//! Both read only the latest-bar [`IndicatorSnapshot`]. An undefined value
//! fails every comparison it takes part in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::IndicatorSnapshot;

/// Bars required before a signal is produced.
pub const MIN_SIGNAL_BARS: usize = 20;

/// Discrete trade signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Signal {
    /// Map a raw signal score. The asymmetric thresholds (3 and -1) are intended.
    pub fn from_score(score: i32) -> Self {
        if score >= 3 {
            Signal::Buy
        } else if score <= -1 {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Hold => "HOLD",
            Signal::Sell => "SELL",
            Signal::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The five sub-scores behind a trend-strength score. Each is 0, 10 or 20.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendBreakdown {
    pub close_above_ma20: u8,
    pub close_above_ma50: u8,
    pub ma20_above_ma50: u8,
    pub rsi_band: u8,
    pub macd_above_signal: u8,
}

impl TrendBreakdown {
    pub fn total(&self) -> u8 {
        self.close_above_ma20
            + self.close_above_ma50
            + self.ma20_above_ma50
            + self.rsi_band
            + self.macd_above_signal
    }
}

/// Sub-scores of the trend-strength score. All zero when MA20 or MA50 is undefined.
pub fn trend_breakdown(snap: &IndicatorSnapshot) -> TrendBreakdown {
    let (Some(ma20), Some(ma50)) = (snap.ma20, snap.ma50) else {
        return TrendBreakdown::default();
    };
    let close = snap.close;

    let rsi_band = match snap.rsi14 {
        Some(rsi) if (50.0..=70.0).contains(&rsi) => 20,
        Some(rsi) if (40.0..50.0).contains(&rsi) => 10,
        _ => 0,
    };

    TrendBreakdown {
        close_above_ma20: points(close > ma20),
        close_above_ma50: points(close > ma50),
        ma20_above_ma50: points(ma20 > ma50),
        rsi_band,
        macd_above_signal: points(macd_above_signal(snap)),
    }
}

/// Trend-strength score in [0, 100].
pub fn trend_strength(snap: &IndicatorSnapshot) -> u8 {
    trend_breakdown(snap).total()
}

/// Raw signal score, `None` with fewer than [`MIN_SIGNAL_BARS`] bars.
pub fn signal_score(snap: &IndicatorSnapshot) -> Option<i32> {
    if snap.bar_count < MIN_SIGNAL_BARS {
        return None;
    }

    let close = snap.close;
    let mut score = 0;

    if snap.ma20.is_some_and(|ma20| close > ma20) {
        score += 1;
    }
    if snap.ma50.is_some_and(|ma50| close > ma50) {
        score += 1;
    }
    if matches!((snap.ma20, snap.ma50), (Some(ma20), Some(ma50)) if ma20 > ma50) {
        score += 1;
    }

    match snap.rsi14 {
        Some(rsi) if rsi < 30.0 => score += 1,
        Some(rsi) if rsi > 70.0 => score -= 1,
        _ => {}
    }

    if macd_above_signal(snap) {
        score += 1;
    } else {
        score -= 1;
    }

    Some(score)
}

/// BUY / HOLD / SELL, or N/A with too little history.
pub fn buy_signal(snap: &IndicatorSnapshot) -> Signal {
    signal_score(snap).map_or(Signal::NotAvailable, Signal::from_score)
}

fn macd_above_signal(snap: &IndicatorSnapshot) -> bool {
    matches!((snap.macd, snap.signal), (Some(macd), Some(signal)) if macd > signal)
}

fn points(hit: bool) -> u8 {
    if hit {
        20
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullish() -> IndicatorSnapshot {
        IndicatorSnapshot {
            bar_count: 60,
            close: 100.0,
            ma20: Some(95.0),
            ma50: Some(90.0),
            rsi14: Some(60.0),
            macd: Some(1.5),
            signal: Some(1.0),
            volatility20: Some(1.2),
            historical_high: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn fully_bullish_scores_100() {
        let snap = bullish();
        assert_eq!(trend_strength(&snap), 100);
        assert_eq!(buy_signal(&snap), Signal::Buy);
    }

    #[test]
    fn missing_moving_average_scores_zero() {
        let mut snap = bullish();
        snap.ma50 = None;
        assert_eq!(trend_strength(&snap), 0);
        assert_eq!(trend_breakdown(&snap), TrendBreakdown::default());
    }

    #[test]
    fn rsi_bands() {
        let mut snap = bullish();
        for (rsi, expected) in [
            (50.0, 20),
            (70.0, 20),
            (70.01, 0),
            (49.99, 10),
            (40.0, 10),
            (39.99, 0),
        ] {
            snap.rsi14 = Some(rsi);
            assert_eq!(trend_breakdown(&snap).rsi_band, expected, "rsi {rsi}");
        }
        snap.rsi14 = None;
        assert_eq!(trend_breakdown(&snap).rsi_band, 0);
    }

    #[test]
    fn breakdown_sums_to_total() {
        let mut snap = bullish();
        snap.close = 92.0;
        snap.rsi14 = Some(45.0);
        let b = trend_breakdown(&snap);
        assert_eq!(b.close_above_ma20, 0);
        assert_eq!(b.close_above_ma50, 20);
        assert_eq!(b.ma20_above_ma50, 20);
        assert_eq!(b.rsi_band, 10);
        assert_eq!(b.macd_above_signal, 20);
        assert_eq!(trend_strength(&snap), 70);
    }

    #[test]
    fn signal_needs_twenty_bars() {
        let mut snap = bullish();
        snap.bar_count = 19;
        assert_eq!(buy_signal(&snap), Signal::NotAvailable);
        assert_eq!(signal_score(&snap), None);
        snap.bar_count = 20;
        assert_eq!(buy_signal(&snap), Signal::Buy);
    }

    #[test]
    fn rsi_extremes_move_signal_score() {
        let mut snap = bullish();
        snap.rsi14 = Some(25.0);
        assert_eq!(signal_score(&snap), Some(5));
        snap.rsi14 = Some(75.0);
        assert_eq!(signal_score(&snap), Some(3));
        snap.rsi14 = Some(30.0);
        assert_eq!(signal_score(&snap), Some(4));
    }

    #[test]
    fn undefined_macd_counts_against() {
        let mut snap = bullish();
        snap.macd = None;
        assert_eq!(signal_score(&snap), Some(2));
        assert_eq!(buy_signal(&snap), Signal::Hold);
    }

    #[test]
    fn score_mapping() {
        assert_eq!(Signal::from_score(5), Signal::Buy);
        assert_eq!(Signal::from_score(3), Signal::Buy);
        assert_eq!(Signal::from_score(2), Signal::Hold);
        assert_eq!(Signal::from_score(0), Signal::Hold);
        assert_eq!(Signal::from_score(-1), Signal::Sell);
        assert_eq!(Signal::from_score(-2), Signal::Sell);
    }

    #[test]
    fn signal_display() {
        assert_eq!(Signal::Buy.to_string(), "BUY");
        assert_eq!(Signal::NotAvailable.to_string(), "N/A");
        assert_eq!(format!("{:<5}|", Signal::Sell), "SELL |");
        assert_eq!(serde_json::to_string(&Signal::NotAvailable).unwrap(), "\"N/A\"");
        assert_eq!(serde_json::to_string(&Signal::Buy).unwrap(), "\"BUY\"");
    }
}
