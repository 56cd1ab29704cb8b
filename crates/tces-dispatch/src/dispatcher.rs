use std::sync::Arc;
use std::time::{Duration, Instant};

use tces_models::{DispatchConfig, Trade, TradeEstimate, TradeRequest, TradeResult};
use tracing::{error, info, warn};

use crate::error::DispatchError;
use crate::fallback::fallback_estimate;
use crate::registry::TradeServiceRegistry;
use crate::service::TradeService;

/// Fans trade requests out to their services and collects one result per
/// request, substituting fallbacks for anything that fails.
#[derive(Debug, Clone)]
pub struct TradeDispatcher {
    registry: Arc<TradeServiceRegistry>,
    timeout: Duration,
}

impl TradeDispatcher {
    pub fn new(registry: Arc<TradeServiceRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    pub fn from_config(registry: Arc<TradeServiceRegistry>, config: &DispatchConfig) -> Self {
        Self::new(registry, Duration::from_secs(config.timeout_seconds))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn registry(&self) -> &TradeServiceRegistry {
        &self.registry
    }

    /// Issue every request concurrently, one attempt each, and wait for all
    /// of them. The output has the same length and order as the input; a
    /// failing trade never affects its siblings.
    pub async fn dispatch(&self, requests: Vec<(Trade, TradeRequest)>) -> Vec<TradeResult> {
        let start = Instant::now();
        info!(trades = requests.len(), timeout_ms = self.timeout.as_millis(), "Dispatching trade requests");

        // 1. Fan-out, one task per trade
        let mut handles = Vec::with_capacity(requests.len());
        for (trade, request) in requests {
            let service = self.registry.get(&trade);
            let timeout = self.timeout;
            let task_trade = trade.clone();

            let handle = tokio::spawn(async move {
                let call_start = Instant::now();
                let result = call_service(service, &task_trade, &request, timeout).await;
                (result, call_start.elapsed())
            });
            handles.push((trade, handle));
        }

        // 2. Fan-in, positionally
        let mut results = Vec::with_capacity(handles.len());
        for (trade, handle) in handles {
            let result = match handle.await {
                Ok((Ok(estimate), elapsed)) => {
                    info!(trade = %trade, elapsed_ms = elapsed.as_millis(), "Trade estimate received");
                    TradeResult::success(trade, estimate)
                }
                Ok((Err(e), elapsed)) => {
                    warn!(trade = %trade, error = %e, elapsed_ms = elapsed.as_millis(), "Trade failed, using fallback");
                    TradeResult::failed(trade.clone(), fallback_estimate(&trade), e.to_string())
                }
                Err(e) => {
                    error!(trade = %trade, error = %e, "Trade task panicked, using fallback");
                    let failure = DispatchError::TaskFailed(e.to_string());
                    TradeResult::failed(trade.clone(), fallback_estimate(&trade), failure.to_string())
                }
            };
            results.push(result);
        }

        let failed = results.iter().filter(|r| r.is_failed()).count();
        info!(
            trades = results.len(),
            failed,
            elapsed_ms = start.elapsed().as_millis(),
            "Dispatch complete"
        );

        results
    }
}

async fn call_service(
    service: Option<Arc<dyn TradeService>>,
    trade: &Trade,
    request: &TradeRequest,
    timeout: Duration,
) -> Result<TradeEstimate, DispatchError> {
    let service = service.ok_or_else(|| DispatchError::UnconfiguredTrade(trade.clone()))?;
    tokio::time::timeout(timeout, service.estimate(request))
        .await
        .map_err(|_| DispatchError::ServiceTimeout(timeout))?
}
