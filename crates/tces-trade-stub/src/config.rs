use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tces_models::{ServicesConfig, Trade};

use crate::error::StubError;

/// Configuration for one reference trade service process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StubConfig {
    /// The trade this process estimates. Requests for other trades are rejected.
    pub trade: Trade,
    /// Defaults to the trade's conventional local port.
    pub bind_address: Option<String>,
    /// Labor rate applied to every estimated hour.
    pub hourly_rate: Decimal,
    /// Artificial delay before answering, for exercising dispatcher timeouts.
    pub response_delay_ms: u64,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self::for_trade(Trade::Carpentry)
    }
}

impl StubConfig {
    /// Defaults for `trade`, listening on the port the coordinator expects it on.
    pub fn for_trade(trade: Trade) -> Self {
        Self {
            trade,
            bind_address: None,
            hourly_rate: Decimal::from(75),
            response_delay_ms: 0,
        }
    }

    pub fn bind_address(&self) -> String {
        self.bind_address
            .clone()
            .unwrap_or_else(|| default_bind_address(&self.trade))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, StubError> {
        toml::from_str(raw).map_err(|e| StubError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StubError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

fn default_bind_address(trade: &Trade) -> String {
    let port = ServicesConfig::default_url(trade)
        .and_then(|url| url.rsplit(':').next())
        .unwrap_or("8000");
    format!("127.0.0.1:{port}")
}
