//! MACD (Moving Average Convergence Divergence).
//!
//! MACD = EMA(fast) - EMA(slow); Signal = EMA(signal span) of MACD.
//! All three lines use the first-value seed, so they are defined from bar 0.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::PriceBar;

/// The two MACD output series, aligned with the input bars.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdLines {
    pub fast_ema: Vec<f64>,
    pub slow_ema: Vec<f64>,
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
}

impl MacdLines {
    /// MACD minus signal at `index` (the histogram bar).
    pub fn histogram(&self, index: usize) -> Option<f64> {
        let h = self.macd.get(index)? - self.signal.get(index)?;
        (!h.is_nan()).then_some(h)
    }
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD spans must be >= 1");
        assert!(fast < slow, "MACD fast span must be shorter than slow span");
        Self { fast, slow, signal }
    }

    /// Classic 12/26/9 configuration.
    pub fn standard() -> Self {
        Self::new(12, 26, 9)
    }

    pub fn compute_lines(&self, bars: &[PriceBar]) -> MacdLines {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast_ema = ema_of_series(&closes, self.fast);
        let slow_ema = ema_of_series(&closes, self.slow);
        let macd: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&macd, self.signal);
        MacdLines {
            fast_ema,
            slow_ema,
            macd,
            signal,
        }
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        "macd"
    }

    fn lookback(&self) -> usize {
        0
    }

    /// The MACD line only; use [`Macd::compute_lines`] for the signal line.
    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        self.compute_lines(bars).macd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn constant_prices_have_zero_macd() {
        let bars = make_bars(&[100.0; 40]);
        let lines = Macd::standard().compute_lines(&bars);
        for i in 0..bars.len() {
            assert_approx(lines.macd[i], 0.0, 1e-9);
            assert_approx(lines.signal[i], 0.0, 1e-9);
        }
    }

    #[test]
    fn rising_prices_push_macd_above_signal() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let lines = Macd::standard().compute_lines(&bars);
        let last = closes.len() - 1;
        assert!(lines.macd[last] > 0.0);
        assert!(lines.macd[last] > lines.signal[last]);
        assert!(lines.histogram(last).unwrap() > 0.0);
    }

    #[test]
    fn first_bar_matches_seed() {
        // fast and slow EMAs both seed at the first close → MACD[0] = 0
        let bars = make_bars(&[50.0, 55.0]);
        let lines = Macd::new(2, 4, 3).compute_lines(&bars);
        assert_approx(lines.macd[0], 0.0, DEFAULT_EPSILON);
        // fast alpha 2/3, slow alpha 2/5
        // fast[1] = 2/3*55 + 1/3*50 = 53.3333..., slow[1] = 0.4*55 + 0.6*50 = 52
        assert_approx(lines.macd[1], 53.333_333_333_333_336 - 52.0, 1e-9);
        // signal alpha 0.5: 0.5*macd[1] + 0.5*0
        assert_approx(lines.signal[1], lines.macd[1] / 2.0, 1e-9);
    }

    #[test]
    fn histogram_out_of_range_is_none() {
        let bars = make_bars(&[50.0, 55.0]);
        let lines = Macd::standard().compute_lines(&bars);
        assert!(lines.histogram(5).is_none());
    }
}
