//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over market-data sources (Yahoo Finance,
//! synthetic data) so the screener can swap implementations and mock them in
//! tests. Timeouts and retries are the provider's business.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{display_ticker, PriceSeries, SeriesError};

/// Structured error types for data operations.
///
/// Every variant means "no usable data for this ticker"; callers screening a
/// universe skip the ticker and carry on.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no price history returned for {symbol}")]
    EmptySeries { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("invalid price series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("data error: {0}")]
    Other(String),
}

/// Look-back window requested from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1mo")]
    OneMonth,
    #[default]
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 6] = [
        HistoryPeriod::OneMonth,
        HistoryPeriod::ThreeMonths,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::TwoYears,
        HistoryPeriod::FiveYears,
    ];

    /// Range code as used by Yahoo's chart API.
    pub fn code(&self) -> &'static str {
        match self {
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
            HistoryPeriod::TwoYears => "2y",
            HistoryPeriod::FiveYears => "5y",
        }
    }

    pub fn calendar_days(&self) -> i64 {
        match self {
            HistoryPeriod::OneMonth => 30,
            HistoryPeriod::ThreeMonths => 91,
            HistoryPeriod::SixMonths => 182,
            HistoryPeriod::OneYear => 365,
            HistoryPeriod::TwoYears => 730,
            HistoryPeriod::FiveYears => 1826,
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HistoryPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.code() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|p| p.code()).collect();
                format!("unknown period '{s}'. Valid: {}", valid.join(", "))
            })
    }
}

/// Trait for market-data providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Daily bars for `ticker` covering `period`, oldest first.
    ///
    /// An empty history is reported as [`DataError::EmptySeries`].
    fn fetch_history(&self, ticker: &str, period: HistoryPeriod) -> Result<PriceSeries, DataError>;

    /// Company name for display.
    fn fetch_display_name(&self, ticker: &str) -> Result<String, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool {
        true
    }
}

/// Company name, or the ticker without its exchange suffix when the provider has none.
pub fn display_name_or_ticker(provider: &dyn DataProvider, ticker: &str, suffix: &str) -> String {
    match provider.fetch_display_name(ticker) {
        Ok(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => display_ticker(ticker, suffix).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NSE_SUFFIX;

    struct NamelessProvider;

    impl DataProvider for NamelessProvider {
        fn name(&self) -> &str {
            "nameless"
        }

        fn fetch_history(&self, ticker: &str, _: HistoryPeriod) -> Result<PriceSeries, DataError> {
            Err(DataError::SymbolNotFound {
                symbol: ticker.to_string(),
            })
        }

        fn fetch_display_name(&self, ticker: &str) -> Result<String, DataError> {
            if ticker == "BLANK.NS" {
                Ok("  ".into())
            } else {
                Err(DataError::Other("no quote".into()))
            }
        }
    }

    #[test]
    fn period_parse_and_display() {
        assert_eq!("3mo".parse::<HistoryPeriod>(), Ok(HistoryPeriod::ThreeMonths));
        assert_eq!("1Y".parse::<HistoryPeriod>(), Ok(HistoryPeriod::OneYear));
        assert!("10y".parse::<HistoryPeriod>().is_err());
        assert_eq!(HistoryPeriod::default().to_string(), "3mo");
    }

    #[test]
    fn period_serde_uses_codes() {
        let json = serde_json::to_string(&HistoryPeriod::SixMonths).unwrap();
        assert_eq!(json, "\"6mo\"");
        let parsed: HistoryPeriod = serde_json::from_str("\"2y\"").unwrap();
        assert_eq!(parsed, HistoryPeriod::TwoYears);
    }

    #[test]
    fn name_falls_back_to_ticker() {
        let p = NamelessProvider;
        assert_eq!(display_name_or_ticker(&p, "SBIN.NS", NSE_SUFFIX), "SBIN");
        assert_eq!(display_name_or_ticker(&p, "BLANK.NS", NSE_SUFFIX), "BLANK");
        assert!(p.is_available());
    }
}
