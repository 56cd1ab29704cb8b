use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trade::Trade;

/// Environment variable overriding `dispatch.timeout_seconds`.
pub const TIMEOUT_ENV_KEY: &str = "TCES_DISPATCH_TIMEOUT_SECONDS";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("dispatch.timeout_seconds must be at least 1, got {0}")]
    InvalidTimeout(u64),
}

/// Top-level configuration for TCES.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TcesConfig {
    pub dispatch: DispatchConfig,
    pub services: ServicesConfig,
    pub scheduler: SchedulerConfig,
}

/// Configuration for the trade dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Per-trade call timeout in seconds. Each call owns its own clock.
    pub timeout_seconds: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

/// Trade service base URLs, keyed by trade.
///
/// Entries read from a config file are layered over the localhost defaults,
/// so a file only needs to name the services it moves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(
    from = "BTreeMap<Trade, String>",
    into = "BTreeMap<Trade, String>"
)]
pub struct ServicesConfig {
    urls: BTreeMap<Trade, String>,
}

impl ServicesConfig {
    /// Default base URL of each built-in trade service.
    pub fn default_url(trade: &Trade) -> Option<&'static str> {
        match trade {
            Trade::Carpentry => Some("http://localhost:8001"),
            Trade::Electrical => Some("http://localhost:8002"),
            Trade::Plumbing => Some("http://localhost:8003"),
            Trade::Painting => Some("http://localhost:8004"),
            Trade::Flooring => Some("http://localhost:8005"),
            Trade::Other(_) => None,
        }
    }

    /// A registry with no services at all.
    pub fn empty() -> Self {
        Self {
            urls: BTreeMap::new(),
        }
    }

    pub fn url(&self, trade: &Trade) -> Option<&str> {
        self.urls.get(trade).map(String::as_str)
    }

    pub fn set(&mut self, trade: Trade, url: impl Into<String>) {
        self.urls.insert(trade, url.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Trade, &str)> {
        self.urls.iter().map(|(t, u)| (t, u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        let urls = Trade::KNOWN
            .iter()
            .filter_map(|t| Self::default_url(t).map(|u| (t.clone(), u.to_string())))
            .collect();
        Self { urls }
    }
}

impl From<BTreeMap<Trade, String>> for ServicesConfig {
    fn from(entries: BTreeMap<Trade, String>) -> Self {
        let mut config = Self::default();
        config.urls.extend(entries);
        config
    }
}

impl From<ServicesConfig> for BTreeMap<Trade, String> {
    fn from(config: ServicesConfig) -> Self {
        config.urls
    }
}

/// How trades are laid out on the calendar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// One trade at a time, in precedence-table order.
    #[default]
    Sequential,
    /// Trades start the day after their latest dependency finishes.
    Parallel,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    pub mode: ScheduleMode,
}

impl TcesConfig {
    /// Apply environment-style overrides (`{TRADE}_SERVICE_URL`,
    /// `TCES_DISPATCH_TIMEOUT_SECONDS`). `lookup` is usually
    /// `|k| std::env::var(k).ok()`; tests pass a map instead.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut trades: Vec<Trade> = Trade::KNOWN.to_vec();
        for (trade, _) in self.services.iter() {
            if !trades.contains(trade) {
                trades.push(trade.clone());
            }
        }

        for trade in trades {
            if let Some(url) = lookup(&trade.service_url_env_key()) {
                let url = url.trim();
                if !url.is_empty() {
                    self.services.set(trade, url);
                }
            }
        }

        // Unparseable or zero values leave the configured timeout alone.
        if let Some(seconds) = lookup(TIMEOUT_ENV_KEY)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
        {
            self.dispatch.timeout_seconds = seconds;
        }

        self
    }

    /// Reject settings that cannot produce an estimate, such as a zero
    /// timeout that would expire every trade call immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dispatch.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(0));
        }
        Ok(())
    }
}
