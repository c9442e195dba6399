//! Growth-potential heuristic.
//!
//! A primary estimate comes from the RSI band, falling back to the
//! price/moving-average arrangement when RSI sits outside every band. The
//! historical high close then acts as a ceiling: it can lower the estimate,
//! never raise it.

use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSnapshot;

/// Estimated upside and the price it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthEstimate {
    pub growth_percent: f64,
    pub target_price: f64,
    /// True when the historical high replaced the heuristic estimate.
    pub capped_by_high: bool,
}

/// Heuristic growth percent before the historical-high cap.
pub fn heuristic_growth_percent(snap: &IndicatorSnapshot) -> f64 {
    match snap.rsi14 {
        Some(rsi) if (30.0..=45.0).contains(&rsi) => 10.0,
        Some(rsi) if rsi > 45.0 && rsi <= 55.0 => 7.0,
        Some(rsi) if rsi > 55.0 && rsi <= 65.0 => 12.0,
        _ => moving_average_growth(snap),
    }
}

fn moving_average_growth(snap: &IndicatorSnapshot) -> f64 {
    let close = snap.close;
    let above = |ma: Option<f64>| ma.is_some_and(|m| close > m);
    let below = |ma: Option<f64>| ma.is_some_and(|m| close < m);
    let ma20_above_ma50 = matches!((snap.ma20, snap.ma50), (Some(a), Some(b)) if a > b);

    if above(snap.ma20) && ma20_above_ma50 {
        15.0
    } else if below(snap.ma20) && above(snap.ma50) {
        8.0
    } else if above(snap.ma50) {
        5.0
    } else {
        0.0
    }
}

/// Growth percent and target price, with the historical-high ceiling applied.
pub fn growth_potential(snap: &IndicatorSnapshot) -> GrowthEstimate {
    let close = snap.close;
    let growth_percent = heuristic_growth_percent(snap);
    let estimate = GrowthEstimate {
        growth_percent,
        target_price: close * (1.0 + growth_percent / 100.0),
        capped_by_high: false,
    };

    let high = snap.historical_high;
    if high > close {
        let implied = (high / close - 1.0) * 100.0;
        if implied < growth_percent {
            return GrowthEstimate {
                growth_percent: implied,
                target_price: high,
                capped_by_high: true,
            };
        }
    }

    estimate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn snap(rsi: Option<f64>, close: f64, ma20: f64, ma50: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            bar_count: 60,
            close,
            ma20: Some(ma20),
            ma50: Some(ma50),
            rsi14: rsi,
            historical_high: close,
            ..Default::default()
        }
    }

    #[test]
    fn rsi_buckets() {
        for (rsi, expected) in [
            (30.0, 10.0),
            (35.0, 10.0),
            (45.0, 10.0),
            (45.5, 7.0),
            (55.0, 7.0),
            (55.1, 12.0),
            (65.0, 12.0),
        ] {
            let s = snap(Some(rsi), 100.0, 120.0, 130.0);
            assert_eq!(heuristic_growth_percent(&s), expected, "rsi {rsi}");
        }
    }

    #[test]
    fn moving_average_fallback() {
        // RSI outside every band → MA arrangement decides
        let rsi = Some(80.0);
        assert_eq!(heuristic_growth_percent(&snap(rsi, 110.0, 105.0, 100.0)), 15.0);
        assert_eq!(heuristic_growth_percent(&snap(rsi, 102.0, 105.0, 100.0)), 8.0);
        assert_eq!(heuristic_growth_percent(&snap(rsi, 110.0, 100.0, 105.0)), 5.0);
        assert_eq!(heuristic_growth_percent(&snap(rsi, 90.0, 100.0, 105.0)), 0.0);
        assert_eq!(heuristic_growth_percent(&snap(Some(20.0), 90.0, 100.0, 105.0)), 0.0);
    }

    #[test]
    fn undefined_rsi_uses_fallback() {
        assert_eq!(heuristic_growth_percent(&snap(None, 110.0, 105.0, 100.0)), 15.0);
    }

    #[test]
    fn target_follows_growth() {
        let est = growth_potential(&snap(Some(35.0), 200.0, 190.0, 180.0));
        assert_eq!(est.growth_percent, 10.0);
        assert_approx(est.target_price, 220.0, DEFAULT_EPSILON);
        assert!(!est.capped_by_high);
    }

    #[test]
    fn lower_historical_high_caps_growth() {
        let mut s = snap(Some(60.0), 100.0, 95.0, 90.0);
        s.historical_high = 105.0;
        let est = growth_potential(&s);
        assert_approx(est.growth_percent, 5.0, 1e-9);
        assert_eq!(est.target_price, 105.0);
        assert!(est.capped_by_high);
    }

    #[test]
    fn higher_historical_high_never_raises_growth() {
        let mut s = snap(Some(60.0), 100.0, 95.0, 90.0);
        s.historical_high = 150.0;
        let est = growth_potential(&s);
        assert_eq!(est.growth_percent, 12.0);
        assert_approx(est.target_price, 112.0, 1e-9);
        assert!(!est.capped_by_high);
    }

    #[test]
    fn zero_growth_is_never_capped() {
        let mut s = snap(Some(80.0), 90.0, 100.0, 105.0);
        s.historical_high = 95.0;
        let est = growth_potential(&s);
        assert_eq!(est.growth_percent, 0.0);
        assert_eq!(est.target_price, 90.0);
    }
}
