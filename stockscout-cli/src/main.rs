//! StockScout CLI: budget-constrained stock screening.
//!
//! Commands:
//! - `screen`: rank a ticker universe by trend strength within a budget
//! - `analyze`: detailed indicator and risk report for one ticker
//! - `universe`: print the default (or a given) universe as TOML
//! - `settings`: validate and show risk settings

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use stockscout_core::analyze;
use stockscout_core::data::{
    display_name_or_ticker, CircuitBreaker, DataProvider, HistoryPeriod, SyntheticProvider,
    Universe, YahooProvider,
};
use stockscout_core::domain::{normalize_ticker, parse_budget};
use stockscout_core::risk::RiskSettings;
use stockscout_runner::{
    render_detailed_analysis, render_opportunity_table, render_skip_summary, render_summary,
    save_csv, save_json, screen, ScreenConfig, ScreenObserver, ScreenReport, TickerOutcome,
};

#[derive(Parser)]
#[command(
    name = "stockscout",
    about = "StockScout: find NSE stock opportunities within your budget"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by commands that fetch data.
#[derive(clap::Args)]
struct DataArgs {
    /// Path to a screening config TOML file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// History period: 1mo, 3mo, 6mo, 1y, 2y, 5y. Overrides the config file.
    #[arg(long)]
    period: Option<HistoryPeriod>,

    /// Use deterministic synthetic data instead of Yahoo Finance.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Stop-loss percentage (1-20). Overrides the config file.
    #[arg(long)]
    stop_loss: Option<f64>,

    /// Profit target multiplier (0.5-5). Overrides the config file.
    #[arg(long)]
    profit_multiplier: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a universe of tickers by trend strength within a budget.
    Screen {
        /// Budget in rupees.
        #[arg(long)]
        budget: String,

        /// Universe TOML file. Defaults to the built-in NSE list.
        #[arg(long, conflicts_with = "tickers")]
        universe: Option<PathBuf>,

        /// Explicit tickers to screen (e.g., TCS INFY SBIN).
        #[arg(long, num_args = 1..)]
        tickers: Vec<String>,

        /// Number of opportunities to show.
        #[arg(long)]
        top: Option<usize>,

        /// Worker threads (1 = sequential).
        #[arg(long)]
        threads: Option<usize>,

        /// Skip company-name lookups.
        #[arg(long, default_value_t = false)]
        no_names: bool,

        /// Write the opportunities as CSV.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the full report as JSON.
        #[arg(long)]
        json: Option<PathBuf>,

        /// No progress line on stderr.
        #[arg(long, default_value_t = false)]
        quiet: bool,

        #[command(flatten)]
        data: DataArgs,
    },
    /// Detailed analysis of a single ticker.
    Analyze {
        /// Ticker symbol (e.g., RELIANCE or RELIANCE.NS).
        ticker: String,

        /// Print the analysis as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        data: DataArgs,
    },
    /// Print a universe as TOML.
    Universe {
        /// Universe file to validate and print. Defaults to the built-in NSE list.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Validate and show risk settings.
    Settings {
        /// Path to a screening config TOML file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// New stop-loss percentage (1-20).
        #[arg(long)]
        stop_loss: Option<f64>,

        /// New profit target multiplier (0.5-5).
        #[arg(long)]
        profit_multiplier: Option<f64>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            budget,
            universe,
            tickers,
            top,
            threads,
            no_names,
            csv,
            json,
            quiet,
            data,
        } => {
            let budget = parse_budget(&budget)?;
            let mut config = load_config(&data)?;
            if let Some(top) = top {
                config.top_n = top;
            }
            if let Some(threads) = threads {
                config.concurrency = threads;
            }
            if no_names {
                config.fetch_names = false;
            }
            if universe.is_some() {
                config.universe = universe;
            }
            config.validate()?;
            run_screen(&config, budget, &tickers, data.synthetic, quiet, csv, json)
        }
        Commands::Analyze { ticker, json, data } => {
            let config = load_config(&data)?;
            run_analyze(&config, &ticker, data.synthetic, json)
        }
        Commands::Universe { file } => run_universe(file.as_deref()),
        Commands::Settings {
            config,
            stop_loss,
            profit_multiplier,
        } => run_settings(config.as_deref(), stop_loss, profit_multiplier),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file (or defaults) with command-line overrides applied.
fn load_config(data: &DataArgs) -> Result<ScreenConfig> {
    let mut config = match &data.config {
        Some(path) => ScreenConfig::from_file(path)?,
        None => ScreenConfig::default(),
    };
    if let Some(period) = data.period {
        config.period = period;
    }
    if data.stop_loss.is_some() || data.profit_multiplier.is_some() {
        let stop = data.stop_loss.unwrap_or(config.risk.stop_loss_percent);
        let mult = data
            .profit_multiplier
            .unwrap_or(config.risk.profit_target_multiplier);
        config.risk.update(stop, mult)?;
    }
    Ok(config)
}

fn build_provider(synthetic: bool, suffix: &str) -> Result<Box<dyn DataProvider>> {
    if synthetic {
        let today = chrono::Local::now().date_naive();
        return Ok(Box::new(SyntheticProvider::new(today, suffix)));
    }
    let breaker = Arc::new(CircuitBreaker::default_provider());
    Ok(Box::new(YahooProvider::new(breaker)?))
}

/// Progress bar on stderr, redrawn in place.
struct StderrProgress;

impl ScreenObserver for StderrProgress {
    fn on_start(&self, total: usize) {
        eprintln!("Analyzing {total} stocks for opportunities...");
    }

    fn on_ticker(&self, _ticker: &str, _outcome: &TickerOutcome, completed: usize, total: usize) {
        let pct = completed as f64 / total.max(1) as f64 * 100.0;
        let filled = (pct / 2.0) as usize;
        eprint!(
            "\rProgress: [{}{}] {pct:5.1}% ({completed}/{total})",
            "=".repeat(filled),
            " ".repeat(50 - filled.min(50))
        );
        let _ = std::io::stderr().flush();
    }

    fn on_finish(&self, _report: &ScreenReport) {
        eprintln!();
    }
}

struct Silent;

impl ScreenObserver for Silent {}

fn run_screen(
    config: &ScreenConfig,
    budget: f64,
    explicit: &[String],
    synthetic: bool,
    quiet: bool,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let suffix = config.exchange_suffix.as_str();
    let universe = if !explicit.is_empty() {
        let tickers = explicit
            .iter()
            .map(|t| normalize_ticker(t, suffix))
            .collect::<Result<Vec<_>, _>>()?;
        Universe::from_tickers("command line", tickers)
    } else if let Some(path) = &config.universe {
        Universe::from_file(path)?
    } else {
        Universe::default_nse()
    };

    let tickers = universe.all_tickers();
    if tickers.is_empty() {
        bail!("universe is empty");
    }

    let provider = build_provider(synthetic, suffix)?;
    tracing::info!(
        universe = %universe.name,
        tickers = tickers.len(),
        provider = provider.name(),
        "screening"
    );
    let observer: &dyn ScreenObserver = if quiet { &Silent } else { &StderrProgress };
    let report = screen(
        &tickers,
        budget,
        provider.as_ref(),
        &config.screen_options(),
        observer,
        None,
    )?;

    print!(
        "{}",
        render_opportunity_table(&report.opportunities, budget, config.top_n, suffix)
    );
    eprint!("{}", render_skip_summary(&report));

    if let Some(path) = csv {
        save_csv(&report, &path)?;
        eprintln!("CSV written to: {}", path.display());
    }
    if let Some(path) = json {
        save_json(&report, &path)?;
        eprintln!("JSON written to: {}", path.display());
    }
    Ok(())
}

fn run_analyze(config: &ScreenConfig, raw_ticker: &str, synthetic: bool, as_json: bool) -> Result<()> {
    let suffix = config.exchange_suffix.as_str();
    let ticker = normalize_ticker(raw_ticker, suffix)?;
    let provider = build_provider(synthetic, suffix)?;

    let series = provider
        .fetch_history(&ticker, config.period)
        .with_context(|| format!("could not retrieve data for {ticker}; check the ticker symbol"))?;
    let analysis = analyze(&series, &config.risk)
        .with_context(|| format!("not enough historical data for {ticker}"))?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let name = display_name_or_ticker(provider.as_ref(), &ticker, suffix);
    print!("{}", render_detailed_analysis(&analysis, &name, &config.risk));
    println!();
    print!("{}", render_summary(&analysis, suffix));
    Ok(())
}

fn run_universe(file: Option<&Path>) -> Result<()> {
    let universe = match file {
        Some(path) => Universe::from_file(path)?,
        None => Universe::default_nse(),
    };
    eprintln!(
        "{} sectors, {} tickers",
        universe.sectors.len(),
        universe.ticker_count()
    );
    print!("{}", universe.to_toml()?);
    Ok(())
}

fn run_settings(config: Option<&Path>, stop_loss: Option<f64>, profit_multiplier: Option<f64>) -> Result<()> {
    let mut settings = match config {
        Some(path) => ScreenConfig::from_file(path)?.risk,
        None => RiskSettings::default(),
    };

    if stop_loss.is_some() || profit_multiplier.is_some() {
        let stop = stop_loss.unwrap_or(settings.stop_loss_percent);
        let mult = profit_multiplier.unwrap_or(settings.profit_target_multiplier);
        settings
            .update(stop, mult)
            .context("settings unchanged: stop-loss must be 1-20% and profit multiplier 0.5-5x")?;
        println!("Settings updated.");
    }

    println!("Stop-loss: {}%", settings.stop_loss_percent);
    println!(
        "Profit target: {}x risk",
        settings.profit_target_multiplier
    );
    Ok(())
}
