//! StockScout Runner: universe screening, ranking, reports and export.
//!
//! This crate builds on `stockscout-core` to provide:
//! - The screening pipeline (sequential or on a rayon pool, cancellable)
//! - Progress observers
//! - Screening configuration (TOML)
//! - Text reports and CSV/JSON export

pub mod config;
pub mod export;
pub mod observer;
pub mod opportunity;
pub mod report;
pub mod screener;

pub use config::{ConfigError, ScreenConfig};
pub use export::{export_json, export_opportunities_csv, save_csv, save_json};
pub use observer::{NullObserver, ScreenObserver, TickerOutcome};
pub use opportunity::{shares_affordable, Opportunity};
pub use report::{
    render_detailed_analysis, render_opportunity_table, render_skip_summary, render_summary,
};
pub use screener::{screen, ScreenError, ScreenOptions, ScreenReport, SkipReason, SkippedTicker};
