//! Validation of user-supplied values (budget, ticker symbols).
//!
//! Nothing here mutates state: a rejected value is reported and the caller
//! can simply prompt again.

use thiserror::Error;

/// Exchange suffix for NSE listings on Yahoo Finance.
pub const NSE_SUFFIX: &str = ".NS";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("budget '{0}' is not a number")]
    BudgetNotNumeric(String),

    #[error("budget must be greater than zero (got {0})")]
    BudgetNotPositive(f64),

    #[error("ticker symbol is empty")]
    EmptyTicker,

    #[error("ticker '{0}' contains characters outside A-Z, 0-9, '.', '&', '-', '^'")]
    MalformedTicker(String),
}

/// Parse a budget amount. Rejects non-numeric, non-finite and non-positive values.
pub fn parse_budget(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::BudgetNotNumeric(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::BudgetNotNumeric(trimmed.to_string()));
    }
    if value <= 0.0 {
        return Err(InputError::BudgetNotPositive(value));
    }
    Ok(value)
}

/// Uppercase a ticker and append `suffix` unless it is already present.
///
/// Index symbols (leading `^`) and tickers that already carry an exchange
/// suffix are left unsuffixed.
pub fn normalize_ticker(raw: &str, suffix: &str) -> Result<String, InputError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(InputError::EmptyTicker);
    }
    let valid = symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '&' | '-' | '^'));
    if !valid {
        return Err(InputError::MalformedTicker(raw.trim().to_string()));
    }

    let suffix = suffix.to_ascii_uppercase();
    if suffix.is_empty() || symbol.starts_with('^') || symbol.ends_with(&suffix) {
        Ok(symbol)
    } else {
        Ok(format!("{symbol}{suffix}"))
    }
}

/// Ticker without its exchange suffix, for tables and fallback display names.
pub fn display_ticker<'a>(ticker: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return ticker;
    }
    ticker.strip_suffix(suffix).unwrap_or(ticker)
}
