//! Reference trade service: one process per trade, answering the estimate
//! contract over HTTP.

pub mod api;
pub mod config;
pub mod error;
pub mod estimate;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tces_models::ESTIMATE_PATH;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub use config::StubConfig;
pub use error::StubError;
pub use state::StubState;

/// Build the Axum router with all routes
pub fn build_router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(ESTIMATE_PATH, post(api::estimate))
        .with_state(state)
}

/// Serve on an already-bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    config: StubConfig,
    cancel: CancellationToken,
) -> Result<(), StubError> {
    let addr = listener.local_addr()?;
    tracing::info!(trade = %config.trade, addr = %addr, "Trade service listening");

    let app = build_router(StubState::new(config));
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await?;

    tracing::info!("Trade service stopped");
    Ok(())
}
