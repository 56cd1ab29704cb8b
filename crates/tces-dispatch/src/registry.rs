use std::collections::HashMap;
use std::sync::Arc;

use tces_models::{ServicesConfig, Trade};

use crate::service::{HttpTradeService, TradeService};

/// Immutable map from trade to the service that estimates it. Built once
/// and shared read-only across every dispatch.
#[derive(Clone, Default)]
pub struct TradeServiceRegistry {
    services: HashMap<Trade, Arc<dyn TradeService>>,
}

impl TradeServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One HTTP service per configured base URL.
    pub fn from_config(config: &ServicesConfig, client: reqwest::Client) -> Self {
        config.iter().fold(Self::new(), |registry, (trade, url)| {
            registry.with_service(Arc::new(HttpTradeService::new(
                trade.clone(),
                url,
                client.clone(),
            )))
        })
    }

    /// Add (or replace) the service for its trade.
    pub fn with_service(mut self, service: Arc<dyn TradeService>) -> Self {
        self.services.insert(service.trade().clone(), service);
        self
    }

    pub fn get(&self, trade: &Trade) -> Option<Arc<dyn TradeService>> {
        self.services.get(trade).cloned()
    }

    pub fn contains(&self, trade: &Trade) -> bool {
        self.services.contains_key(trade)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for TradeServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut trades: Vec<&str> = self.services.keys().map(Trade::as_str).collect();
        trades.sort_unstable();
        f.debug_struct("TradeServiceRegistry")
            .field("trades", &trades)
            .finish()
    }
}
