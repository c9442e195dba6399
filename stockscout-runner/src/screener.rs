//! Screening pipeline: every ticker in a universe through fetch, indicators,
//! budget filter and analysis, ranked by trend strength.
//!
//! # Ordering
//! Results are collected in universe order (indexed parallel iteration keeps
//! it even on a thread pool), then stably sorted by trend score, so equal
//! scores keep their universe order.
//!
//! # Failure isolation
//! A ticker that cannot be fetched or analysed is recorded as skipped; it never
//! aborts the run. Cancellation is cooperative: tickers not yet started when the
//! flag is raised are skipped as `Cancelled` and the partial report is returned.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockscout_core::analyze_indicators;
use stockscout_core::data::{display_name_or_ticker, DataProvider, HistoryPeriod};
use stockscout_core::domain::{display_ticker, NSE_SUFFIX};
use stockscout_core::indicators::compute_indicators;
use stockscout_core::risk::RiskSettings;

use crate::observer::{ScreenObserver, TickerOutcome};
use crate::opportunity::Opportunity;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("budget must be a positive amount (got {0})")]
    InvalidBudget(f64),

    #[error("failed to build screening thread pool: {0}")]
    ThreadPool(String),
}

/// Knobs for one screening run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOptions {
    pub period: HistoryPeriod,
    /// 1 = sequential; more runs a private rayon pool of that size.
    pub concurrency: usize,
    pub risk: RiskSettings,
    pub exchange_suffix: String,
    /// Look up company names for qualifying tickers.
    pub fetch_names: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            period: HistoryPeriod::default(),
            concurrency: 1,
            risk: RiskSettings::default(),
            exchange_suffix: NSE_SUFFIX.to_string(),
            fetch_names: true,
        }
    }
}

/// Why a ticker produced no opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    DataUnavailable,
    InsufficientHistory,
    OverBudget,
    Cancelled,
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::DataUnavailable => "data unavailable",
            SkipReason::InsufficientHistory => "insufficient history",
            SkipReason::OverBudget => "over budget",
            SkipReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of a screening run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub budget: f64,
    pub period: HistoryPeriod,
    pub total_tickers: usize,
    /// Sorted by trend score, highest first.
    pub opportunities: Vec<Opportunity>,
    /// In universe order.
    pub skipped: Vec<SkippedTicker>,
    pub cancelled: bool,
}

impl ScreenReport {
    pub fn top(&self, n: usize) -> &[Opportunity] {
        &self.opportunities[..n.min(self.opportunities.len())]
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    pub fn skip_counts(&self) -> BTreeMap<SkipReason, usize> {
        let mut counts = BTreeMap::new();
        for s in &self.skipped {
            *counts.entry(s.reason).or_insert(0) += 1;
        }
        counts
    }
}

/// Screen `tickers` for opportunities affordable within `budget`.
pub fn screen(
    tickers: &[&str],
    budget: f64,
    provider: &dyn DataProvider,
    options: &ScreenOptions,
    observer: &dyn ScreenObserver,
    cancel: Option<&AtomicBool>,
) -> Result<ScreenReport, ScreenError> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(ScreenError::InvalidBudget(budget));
    }

    let total = tickers.len();
    tracing::info!(
        total,
        budget,
        period = %options.period,
        concurrency = options.concurrency,
        provider = provider.name(),
        "screening started"
    );
    observer.on_start(total);

    let completed = AtomicUsize::new(0);
    let run = |ticker: &str| {
        let result = screen_ticker(ticker, budget, provider, options, cancel);
        let outcome = match &result {
            Ok(opp) => TickerOutcome::Qualified {
                trend_score: opp.trend_score,
            },
            Err(skipped) => {
                tracing::debug!(
                    ticker,
                    reason = %skipped.reason,
                    detail = skipped.detail.as_deref().unwrap_or(""),
                    "ticker skipped"
                );
                TickerOutcome::Skipped(skipped.reason)
            }
        };
        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        observer.on_ticker(ticker, &outcome, done, total);
        result
    };

    let outcomes: Vec<Result<Opportunity, SkippedTicker>> = if options.concurrency <= 1 {
        tickers.iter().map(|t| run(*t)).collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.concurrency)
            .build()
            .map_err(|e| ScreenError::ThreadPool(e.to_string()))?;
        pool.install(|| tickers.par_iter().map(|t| run(*t)).collect())
    };

    let mut opportunities = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(opp) => opportunities.push(opp),
            Err(skip) => skipped.push(skip),
        }
    }

    // sort_by is stable: equal scores keep universe order
    opportunities.sort_by(|a, b| b.trend_score.cmp(&a.trend_score));

    let report = ScreenReport {
        budget,
        period: options.period,
        total_tickers: total,
        cancelled: skipped.iter().any(|s| s.reason == SkipReason::Cancelled),
        opportunities,
        skipped,
    };

    tracing::info!(
        opportunities = report.opportunities.len(),
        skipped = report.skipped.len(),
        cancelled = report.cancelled,
        "screening finished"
    );
    observer.on_finish(&report);
    Ok(report)
}

fn screen_ticker(
    ticker: &str,
    budget: f64,
    provider: &dyn DataProvider,
    options: &ScreenOptions,
    cancel: Option<&AtomicBool>,
) -> Result<Opportunity, SkippedTicker> {
    let skip = |reason: SkipReason, detail: Option<String>| SkippedTicker {
        ticker: ticker.to_string(),
        reason,
        detail,
    };

    if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
        return Err(skip(SkipReason::Cancelled, None));
    }

    let series = provider
        .fetch_history(ticker, options.period)
        .map_err(|e| skip(SkipReason::DataUnavailable, Some(e.to_string())))?;
    if series.is_empty() {
        return Err(skip(SkipReason::DataUnavailable, Some("empty history".into())));
    }

    let indicators = compute_indicators(&series).ok_or_else(|| {
        skip(
            SkipReason::InsufficientHistory,
            Some(format!("{} bars", series.len())),
        )
    })?;

    let close = indicators.latest().close;
    if close > budget {
        return Err(skip(
            SkipReason::OverBudget,
            Some(format!("price {close:.2} above budget")),
        ));
    }

    let analysis = analyze_indicators(&indicators, &options.risk);
    let name = if options.fetch_names {
        display_name_or_ticker(provider, ticker, &options.exchange_suffix)
    } else {
        display_ticker(ticker, &options.exchange_suffix).to_string()
    };

    Opportunity::from_analysis(&analysis, name, budget)
        .ok_or_else(|| skip(SkipReason::OverBudget, Some("not a single share affordable".into())))
}
