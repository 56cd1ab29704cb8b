//! TCES - Trade-Coordinated Estimate System
//!
//! Turns a free-text renovation description into a coordinated,
//! multi-trade cost and schedule estimate by fanning requests out to
//! independent trade estimation services and combining their answers.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use tces::models::ProjectHints;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = tces::load_config("config/tces.toml")?;
//! let coordinator = tces::build_coordinator(&config)?;
//! let response = tces::coordinate(&coordinator, "Remodel the kitchen", &ProjectHints::default()).await?;
//! println!("{}", response.estimates.combined_totals.total_cost);
//! # Ok(())
//! # }
//! ```

pub use tces_dispatch as dispatch;
pub use tces_models as models;
pub use tces_planner as planner;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tces_dispatch::http_client::build_client;
use tces_dispatch::{CoordinationError, Coordinator, TradeDispatcher, TradeServiceRegistry};
use tces_models::{EstimateResponse, ProjectHints, TcesConfig};
use tces_planner::DependencyScheduler;

/// Load configuration from `path`, then apply environment overrides.
/// A missing file means built-in defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<TcesConfig, anyhow::Error> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<TcesConfig, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let path = path.as_ref();
    let config = if path.exists() {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        TcesConfig::default()
    };

    let config = config.with_env_overrides(lookup);
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Build a Coordinator from configuration.
pub fn build_coordinator(config: &TcesConfig) -> Result<Coordinator, anyhow::Error> {
    let client = build_client().context("Failed to build HTTP client")?;
    let registry = Arc::new(TradeServiceRegistry::from_config(&config.services, client));
    let dispatcher = TradeDispatcher::from_config(registry, &config.dispatch);
    let scheduler = DependencyScheduler::standard(config.scheduler.mode);

    Ok(Coordinator::new(dispatcher, scheduler))
}

/// Produce a coordinated estimate using the given coordinator.
pub async fn coordinate(
    coordinator: &Coordinator,
    description: &str,
    hints: &ProjectHints,
) -> Result<EstimateResponse, CoordinationError> {
    coordinator.coordinate(description, hints).await
}
