//! Export: CSV and JSON files for screening results.
//!
//! CSV holds the opportunity table for spreadsheets; JSON holds the whole
//! report, skipped tickers included.

use std::path::Path;

use anyhow::{Context, Result};

use crate::opportunity::Opportunity;
use crate::screener::ScreenReport;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ScreenReport` to pretty JSON.
pub fn export_json(report: &ScreenReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize ScreenReport to JSON")
}

/// Deserialize a `ScreenReport` from JSON.
pub fn import_json(json: &str) -> Result<ScreenReport> {
    serde_json::from_str(json).context("failed to deserialize ScreenReport from JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export opportunities as CSV, in ranking order.
///
/// Columns: ticker, name, price, shares, investment, trend_score, signal,
/// growth_percent, target_price, stop_loss_price, holding_time, exit_strategy
pub fn export_opportunities_csv(opportunities: &[Opportunity]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "ticker",
        "name",
        "price",
        "shares",
        "investment",
        "trend_score",
        "signal",
        "growth_percent",
        "target_price",
        "stop_loss_price",
        "holding_time",
        "exit_strategy",
    ])?;

    for opp in opportunities {
        wtr.write_record(&[
            opp.ticker.clone(),
            opp.name.clone(),
            format!("{:.2}", opp.price),
            opp.shares_affordable.to_string(),
            format!("{:.2}", opp.investment_amount),
            opp.trend_score.to_string(),
            opp.signal.as_str().to_string(),
            format!("{:.2}", opp.growth_percent),
            format!("{:.2}", opp.target_price),
            format!("{:.2}", opp.stop_loss_price),
            opp.holding_time.label().to_string(),
            opp.exit_strategy.clone(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write the opportunity CSV to `path`.
pub fn save_csv(report: &ScreenReport, path: &Path) -> Result<()> {
    let csv = export_opportunities_csv(&report.opportunities)?;
    std::fs::write(path, csv).with_context(|| format!("failed to write {}", path.display()))
}

/// Write the full report as JSON to `path`.
pub fn save_json(report: &ScreenReport, path: &Path) -> Result<()> {
    let json = export_json(report)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
