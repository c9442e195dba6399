//! Progress reporting for screening runs.
//!
//! The screener never prints. It reports to a [`ScreenObserver`], which may be
//! called from several worker threads at once.

use crate::screener::{ScreenReport, SkipReason};

/// What happened to one ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    /// Passed every filter and became an opportunity.
    Qualified { trend_score: u8 },
    Skipped(SkipReason),
}

pub trait ScreenObserver: Send + Sync {
    fn on_start(&self, _total: usize) {}

    /// Called once per ticker. `completed` counts finished tickers, this one included.
    fn on_ticker(&self, _ticker: &str, _outcome: &TickerOutcome, _completed: usize, _total: usize) {}

    fn on_finish(&self, _report: &ScreenReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ScreenObserver for NullObserver {}
