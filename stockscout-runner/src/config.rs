//! Serializable screening configuration.
//!
//! Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! period = "6mo"
//! concurrency = 4
//! top_n = 10
//! exchange_suffix = ".NS"
//! universe = "universe.toml"
//!
//! [risk]
//! stop_loss_percent = 7
//! profit_target_multiplier = 2.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use stockscout_core::data::HistoryPeriod;
use stockscout_core::domain::NSE_SUFFIX;
use stockscout_core::risk::{RiskSettings, SettingsError};

use crate::screener::ScreenOptions;

/// Upper bound on worker threads.
pub const MAX_CONCURRENCY: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid risk settings: {0}")]
    Risk(#[from] SettingsError),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub period: HistoryPeriod,
    pub concurrency: usize,
    /// Rows shown in the opportunity table.
    pub top_n: usize,
    pub exchange_suffix: String,
    pub fetch_names: bool,
    /// Universe file; the built-in NSE list when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universe: Option<PathBuf>,
    pub risk: RiskSettings,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            period: HistoryPeriod::default(),
            concurrency: 1,
            top_n: 10,
            exchange_suffix: NSE_SUFFIX.to_string(),
            fetch_names: true,
            universe: None,
            risk: RiskSettings::default(),
        }
    }
}

impl ScreenConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.risk.validate()?;
        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::Invalid(format!(
                "concurrency must be between 1 and {MAX_CONCURRENCY} (got {})",
                self.concurrency
            )));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if !self.exchange_suffix.is_empty() && !self.exchange_suffix.starts_with('.') {
            return Err(ConfigError::Invalid(format!(
                "exchange_suffix must start with '.' (got {:?})",
                self.exchange_suffix
            )));
        }
        Ok(())
    }

    pub fn screen_options(&self) -> ScreenOptions {
        ScreenOptions {
            period: self.period,
            concurrency: self.concurrency,
            risk: self.risk,
            exchange_suffix: self.exchange_suffix.clone(),
            fetch_names: self.fetch_names,
        }
    }
}
