//! Plain-text reports: the opportunity table, the detailed single-ticker
//! analysis and its summary block.

use stockscout_core::domain::display_ticker;
use stockscout_core::risk::RiskSettings;
use stockscout_core::TickerAnalysis;

use crate::opportunity::Opportunity;
use crate::screener::ScreenReport;

const TABLE_WIDTH: usize = 100;
const REPORT_WIDTH: usize = 80;
const NAME_WIDTH: usize = 20;

fn rule(c: char, width: usize) -> String {
    c.to_string().repeat(width)
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn money(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| format!("₹{v:.2}"))
}

fn number(v: Option<f64>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

/// Top-`limit` opportunities as a fixed-width table.
pub fn render_opportunity_table(opportunities: &[Opportunity], budget: f64, limit: usize, suffix: &str) -> String {
    if opportunities.is_empty() {
        return "No suitable stock opportunities found within your budget.\n".to_string();
    }

    let top = &opportunities[..limit.min(opportunities.len())];
    let mut out = String::new();
    out.push_str(&format!("{}\n", rule('=', TABLE_WIDTH)));
    out.push_str(&format!("TOP {} STOCK OPPORTUNITIES\n", top.len()));
    out.push_str(&format!("{}\n", rule('=', TABLE_WIDTH)));
    out.push_str(&format!(
        "{:<10} {:<20} {:<11} {:<8} {:<11} {:<6} {:<6} {:<8} {:<11} {:<11}\n",
        "STOCK", "NAME", "PRICE", "SHARES", "AMOUNT", "TREND", "SIGNAL", "GROWTH", "TARGET", "STOP-LOSS"
    ));
    out.push_str(&format!("{}\n", rule('-', TABLE_WIDTH)));

    for opp in top {
        out.push_str(&format!(
            "{:<10} {:<20} ₹{:<10.2} {:<8} ₹{:<10.2} {:<6} {:<6} {:<7.1}% ₹{:<10.2} ₹{:<10.2}\n",
            display_ticker(&opp.ticker, suffix),
            truncate(&opp.name, NAME_WIDTH),
            opp.price,
            opp.shares_affordable,
            opp.investment_amount,
            opp.trend_score,
            opp.signal,
            opp.growth_percent,
            opp.target_price,
            opp.stop_loss_price,
        ));
    }

    out.push_str(&format!("{}\n", rule('=', TABLE_WIDTH)));
    out.push_str(&format!(
        "Budget: ₹{budget:.2} | Trend Score: Higher is better (0-100) | Growth: Potential upside\n"
    ));
    out.push_str(&format!("{}\n", rule('=', TABLE_WIDTH)));
    out
}

/// One line per skip reason, e.g. "Skipped: 3 data unavailable, 1 over budget".
pub fn render_skip_summary(report: &ScreenReport) -> String {
    let counts = report.skip_counts();
    if counts.is_empty() {
        return format!("Screened {} tickers, none skipped.\n", report.total_tickers);
    }
    let parts: Vec<String> = counts
        .iter()
        .map(|(reason, n)| format!("{n} {reason}"))
        .collect();
    let mut line = format!(
        "Screened {} tickers. Skipped: {}",
        report.total_tickers,
        parts.join(", ")
    );
    if report.cancelled {
        line.push_str(" (run cancelled)");
    }
    line.push('\n');
    line
}

/// Detailed indicator and risk report for one ticker.
pub fn render_detailed_analysis(
    analysis: &TickerAnalysis,
    name: &str,
    settings: &RiskSettings,
) -> String {
    let snap = &analysis.snapshot;
    let close = analysis.close();
    let loss_percent = analysis.exit_strategy.loss_percent;

    let mut out = String::new();
    out.push_str(&format!("{}\n", rule('=', REPORT_WIDTH)));
    out.push_str(&format!("DETAILED ANALYSIS: {name} ({})\n", analysis.ticker));
    out.push_str(&format!("{}\n", rule('=', REPORT_WIDTH)));
    out.push_str(&format!("Current Price: ₹{close:.2}\n"));
    out.push_str(&format!("20-Day MA: {}\n", money(snap.ma20)));
    out.push_str(&format!("50-Day MA: {}\n", money(snap.ma50)));
    out.push_str(&format!("RSI (14-Day): {}\n", number(snap.rsi14)));
    out.push_str(&format!(
        "Volatility (20-Day): {}\n",
        snap.volatility20
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%"))
    ));
    out.push_str(&format!("Trend Strength Score: {}/100\n", analysis.trend_score));
    out.push_str(&format!("Signal: {}\n", analysis.signal));
    out.push_str(&format!("{}\n", rule('-', REPORT_WIDTH)));
    out.push_str("ADVANCED ANALYSIS:\n");
    out.push_str(&format!(
        "Growth Potential: ₹{:.2} (+{:.1}%){}\n",
        analysis.growth.target_price,
        analysis.growth.growth_percent,
        if analysis.growth.capped_by_high {
            " [capped at historical high]"
        } else {
            ""
        }
    ));
    out.push_str(&format!(
        "Stop-Loss Price: ₹{:.2} (-{loss_percent:.1}%)\n",
        analysis.stop_loss_price
    ));
    out.push_str(&format!(
        "Risk/Reward Target ({}x risk): ₹{:.2}\n",
        settings.profit_target_multiplier, analysis.risk_reward_target
    ));
    out.push_str(&format!("Recommended Holding Time: {}\n", analysis.holding_period));
    out.push_str(&format!("Exit Strategy: {}\n", analysis.exit_strategy));
    out.push_str(&format!("{}\n", rule('=', REPORT_WIDTH)));
    out
}

/// The short buy/target/stop summary shown after a detailed analysis.
pub fn render_summary(analysis: &TickerAnalysis, suffix: &str) -> String {
    let close = analysis.close();
    let growth = &analysis.growth;
    let loss_percent = analysis.exit_strategy.loss_percent;

    let mut out = String::new();
    out.push_str("SUMMARY:\n");
    out.push_str(&format!("Stock: {}\n", display_ticker(&analysis.ticker, suffix)));
    out.push_str(&format!("-> Buy Price: ₹{close:.2}\n"));
    out.push_str(&format!(
        "-> Growth Potential: ₹{:.2} (+{:.1}%) in {}\n",
        growth.target_price,
        growth.growth_percent,
        analysis.holding_period.duration()
    ));
    out.push_str(&format!(
        "-> Stop-Loss: ₹{:.2} (-{loss_percent:.1}%)\n",
        analysis.stop_loss_price
    ));
    out.push_str(&format!("-> Hold Time: {}\n", analysis.holding_period));
    out.push_str("-> Exit if:\n");
    out.push_str(&format!("   - Profit >{:.1}% OR\n", growth.growth_percent));
    out.push_str(&format!("   - Loss >{loss_percent:.1}%\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockscout_core::risk::HoldingPeriod;
    use stockscout_core::scoring::Signal;

    fn opportunity(ticker: &str, name: &str, score: u8) -> Opportunity {
        Opportunity {
            ticker: ticker.into(),
            name: name.into(),
            price: 2500.0,
            shares_affordable: 4,
            investment_amount: 10_000.0,
            trend_score: score,
            signal: Signal::Buy,
            growth_percent: 12.0,
            target_price: 2800.0,
            stop_loss_price: 2375.0,
            holding_time: HoldingPeriod::TwoToThreeMonths,
            exit_strategy: "Exit if profit reaches +12% or loss exceeds -5%".into(),
        }
    }

    #[test]
    fn empty_table_message() {
        let out = render_opportunity_table(&[], 10_000.0, 10, ".NS");
        assert!(out.contains("No suitable stock opportunities"));
    }

    #[test]
    fn table_limits_rows_and_strips_suffix() {
        let opps: Vec<Opportunity> = (0..5)
            .map(|i| opportunity(&format!("T{i}.NS"), "A very long company name indeed", 80))
            .collect();
        let out = render_opportunity_table(&opps, 10_000.0, 3, ".NS");
        assert!(out.contains("TOP 3 STOCK OPPORTUNITIES"));
        assert!(out.contains("T0 "));
        assert!(!out.contains("T3"));
        assert!(!out.contains(".NS"));
        assert!(out.contains("A very long company "));
        assert!(!out.contains("indeed"));
        assert!(out.contains("Budget: ₹10000.00"));
    }

    fn sample_analysis() -> TickerAnalysis {
        use chrono::NaiveDate;
        use stockscout_core::domain::{PriceBar, PriceSeries};

        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..60)
            .map(|i| {
                let close = 100.0 * 1.004_f64.powi(i);
                PriceBar {
                    date: base + chrono::Duration::days(i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1_000,
                }
            })
            .collect();
        let series = PriceSeries::new("LT.NS", bars).unwrap();
        stockscout_core::analyze(&series, &RiskSettings::new(7.5, 2.0).unwrap()).unwrap()
    }

    #[test]
    fn detailed_report_fills_every_value() {
        let analysis = sample_analysis();
        let settings = RiskSettings::new(7.5, 2.0).unwrap();
        let out = render_detailed_analysis(&analysis, "Larsen & Toubro", &settings);
        assert!(out.contains("DETAILED ANALYSIS: Larsen & Toubro (LT.NS)"));
        assert!(out.contains(&format!("Current Price: ₹{:.2}\n", analysis.close())));
        assert!(out.contains("(-7.5%)"));
        assert!(out.contains("loss exceeds -7%"));
        assert!(!out.contains('{'));
        assert!(out.ends_with("=\n"));
    }

    #[test]
    fn summary_block_lines() {
        let analysis = sample_analysis();
        let out = render_summary(&analysis, ".NS");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "SUMMARY:");
        assert_eq!(lines[1], "Stock: LT");
        assert_eq!(lines[2], format!("-> Buy Price: ₹{:.2}", analysis.close()));
        assert_eq!(lines.last().copied(), Some("   - Loss >7.5%"));
        assert!(!out.contains('{'));
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Bajaj Finserv Limited", 5), "Bajaj");
        assert_eq!(truncate("ab", 5), "ab");
    }
}
