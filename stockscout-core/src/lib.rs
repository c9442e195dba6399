//! StockScout Core: price series, indicators and the screening heuristics.
//!
//! This crate holds everything that looks at a single ticker:
//! - Domain types (bars, series, user input parsing)
//! - Technical indicators (SMA, EMA, RSI, MACD, rolling volatility)
//! - Trend-strength score and BUY/HOLD/SELL signal
//! - Growth-potential estimate capped by the historical high
//! - Risk advice (stop-loss, holding period, exit strategy)
//! - Data providers (Yahoo Finance, synthetic) and the ticker universe
//!
//! Screening a whole universe lives in `stockscout-runner`.

pub mod analysis;
pub mod data;
pub mod domain;
pub mod growth;
pub mod indicators;
pub mod risk;
pub mod scoring;

pub use analysis::{analyze, analyze_indicators, AnalysisError, TickerAnalysis};
