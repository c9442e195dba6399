//! Daily returns and rolling return volatility.
//!
//! DailyReturn[t] = close[t] / close[t-1] - 1 (undefined at t = 0).
//! Volatility[t] = sample standard deviation (n - 1) of the last `period`
//! daily returns, times 100. A window touching an undefined return is
//! undefined, so the first value lands at index `period`.

use super::Indicator;
use crate::domain::PriceBar;

/// Rolling volatility of daily returns, expressed in percent.
#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    name: String,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "volatility period must be >= 2");
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rolling_std(&daily_returns(&closes), self.period)
            .into_iter()
            .map(|sd| sd * 100.0)
            .collect()
    }
}

/// Fractional bar-to-bar change of a series. Index 0 is NaN.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    let mut result = vec![f64::NAN; closes.len()];
    for i in 1..closes.len() {
        result[i] = closes[i] / closes[i - 1] - 1.0;
    }
    result
}

/// Rolling sample standard deviation. A window holding any NaN yields NaN.
pub fn rolling_std(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period < 2 || n < period {
        return result;
    }

    for (i, window) in values.windows(period).enumerate() {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let mean = window.iter().sum::<f64>() / period as f64;
        let sum_sq: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
        result[i + period - 1] = (sum_sq / (period - 1) as f64).sqrt();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn daily_returns_known_values() {
        let r = daily_returns(&[100.0, 110.0, 99.0]);
        assert!(r[0].is_nan());
        assert_approx(r[1], 0.10, DEFAULT_EPSILON);
        assert_approx(r[2], -0.10, DEFAULT_EPSILON);
    }

    #[test]
    fn rolling_std_is_sample_std() {
        // values 2, 4, 4, 4, 5, 5, 7, 9: mean 5, sum sq 32, sample var 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let result = rolling_std(&values, 8);
        assert!(result[6].is_nan());
        assert_approx(result[7], (32.0_f64 / 7.0).sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn volatility_first_value_after_full_return_window() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + (i % 3) as f64).collect();
        let bars = make_bars(&closes);
        let vol = Volatility::new(20).compute(&bars);
        for (i, v) in vol.iter().enumerate().take(20) {
            assert!(v.is_nan(), "expected undefined volatility at {i}");
        }
        assert!(vol[20] > 0.0);
    }

    #[test]
    fn constant_prices_have_zero_volatility() {
        let bars = make_bars(&[250.0; 30]);
        let vol = Volatility::new(20).compute(&bars);
        assert_eq!(vol[29], 0.0);
    }

    #[test]
    fn volatility_is_percent() {
        // alternating +1% / -1% style moves give a std near 1 (percent), not 0.01
        let mut closes = vec![100.0];
        for i in 0..30 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last * 1.01 } else { last * 0.99 });
        }
        let vol = Volatility::new(20).compute(&make_bars(&closes));
        let last = vol[vol.len() - 1];
        assert!(last > 0.5 && last < 1.5, "unexpected volatility {last}");
    }
}
