use anyhow::{Context, Result};
use clap::Parser;
use rust_decimal::Decimal;
use tces_models::Trade;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use tces_trade_stub::StubConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tces-trade-stub",
    about = "Reference trade estimation service - answers POST /estimate for a single trade"
)]
struct Cli {
    /// Path to a stub configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Trade to serve (overrides the config file)
    #[arg(short, long)]
    trade: Option<String>,

    /// Address to listen on (overrides the config file)
    #[arg(short, long)]
    bind: Option<String>,

    /// Labor rate per hour (overrides the config file)
    #[arg(long)]
    hourly_rate: Option<Decimal>,

    /// Artificial response delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => StubConfig::load(path)
            .with_context(|| format!("Failed to load stub config: {path}"))?,
        None => StubConfig::default(),
    };
    if let Some(trade) = &cli.trade {
        config.trade = Trade::from(trade.as_str());
    }
    if let Some(bind) = cli.bind {
        config.bind_address = Some(bind);
    }
    if let Some(rate) = cli.hourly_rate {
        config.hourly_rate = rate;
    }
    if let Some(delay) = cli.delay_ms {
        config.response_delay_ms = delay;
    }

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();

    // Handle shutdown signals
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received shutdown signal");
        shutdown.cancel();
    });

    tces_trade_stub::serve(listener, config, cancel)
        .await
        .map_err(|e| anyhow::anyhow!("Trade service error: {e}"))?;

    Ok(())
}
