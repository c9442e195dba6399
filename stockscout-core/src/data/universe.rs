//! Universe configuration: sector-organized ticker lists.
//!
//! The universe is stored as a TOML file with an ordered list of sectors:
//!
//! ```toml
//! name = "my watchlist"
//!
//! [[sectors]]
//! name = "IT"
//! tickers = ["TCS.NS", "INFY.NS"]
//! ```
//!
//! Order matters: screening ties are broken by universe position.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parse universe TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize universe: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A sector in the universe (e.g., IT, Pharma).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub tickers: Vec<String>,
}

/// The complete universe configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Universe {
    #[serde(default)]
    pub name: String,
    pub sectors: Vec<Sector>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|source| UniverseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        Ok(toml::from_str(content)?)
    }

    /// Single-sector universe from an explicit ticker list.
    pub fn from_tickers<I, S>(name: &str, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            sectors: vec![Sector {
                name: name.to_string(),
                tickers: tickers.into_iter().map(Into::into).collect(),
            }],
        }
    }

    /// All tickers in sector order, first occurrence wins.
    pub fn all_tickers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sectors
            .iter()
            .flat_map(|s| s.tickers.iter().map(String::as_str))
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Get tickers for a specific sector.
    pub fn sector_tickers(&self, sector: &str) -> Option<&[String]> {
        self.sectors
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(sector))
            .map(|s| s.tickers.as_slice())
    }

    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of distinct tickers.
    pub fn ticker_count(&self) -> usize {
        self.all_tickers().len()
    }

    /// The popular NSE large caps screened when no universe is given.
    pub fn default_nse() -> Self {
        let sector = |name: &str, tickers: &[&str]| Sector {
            name: name.to_string(),
            tickers: tickers.iter().map(|t| format!("{t}.NS")).collect(),
        };

        Self {
            name: "NSE popular".to_string(),
            sectors: vec![
                sector("Energy", &["RELIANCE", "ONGC", "BPCL", "NTPC", "POWERGRID"]),
                sector("IT", &["TCS", "INFY", "WIPRO", "HCLTECH", "TECHM"]),
                sector(
                    "Financials",
                    &[
                        "HDFCBANK", "ICICIBANK", "SBIN", "KOTAKBANK", "AXISBANK", "INDUSINDBK",
                        "BAJFINANCE", "BAJAJFINSV",
                    ],
                ),
                sector("Consumer", &["HINDUNILVR", "ITC", "ASIANPAINT", "TITAN"]),
                sector("Auto", &["MARUTI", "TATAMOTORS", "EICHERMOT"]),
                sector(
                    "Materials & Industrials",
                    &["TATASTEEL", "ULTRACEMCO", "GRASIM", "SHREECEM", "LT", "ADANIPORTS"],
                ),
                sector("Pharma", &["SUNPHARMA", "CIPLA", "DRREDDY", "DIVISLAB"]),
                sector("Telecom", &["BHARTIARTL"]),
            ],
        }
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, UniverseError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
