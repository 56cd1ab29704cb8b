use async_trait::async_trait;
use tces_models::{Trade, TradeEstimate, TradeRequest};

use crate::error::DispatchError;
use crate::http_client::post_estimate;

/// A trade estimation service. Mockable for testing.
#[async_trait]
pub trait TradeService: Send + Sync {
    fn trade(&self) -> &Trade;

    async fn estimate(&self, request: &TradeRequest) -> Result<TradeEstimate, DispatchError>;
}

/// A trade service reached over HTTP at a configured base URL.
pub struct HttpTradeService {
    pub trade: Trade,
    pub base_url: String,
    client: reqwest::Client,
}

impl HttpTradeService {
    pub fn new(trade: Trade, base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            trade,
            base_url: base_url.into(),
            client,
        }
    }
}

#[async_trait]
impl TradeService for HttpTradeService {
    fn trade(&self) -> &Trade {
        &self.trade
    }

    async fn estimate(&self, request: &TradeRequest) -> Result<TradeEstimate, DispatchError> {
        post_estimate(&self.client, &self.base_url, request).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tces_models::{CoordinationRequirements, LaborEstimate, MaterialsEstimate};

    /// Canned-response service that counts how often it is called.
    pub struct MockTradeService {
        pub trade: Trade,
        pub calls: Arc<AtomicUsize>,
        pub should_fail: bool,
    }

    impl MockTradeService {
        pub fn new(trade: Trade) -> Self {
            Self {
                trade,
                calls: Arc::new(AtomicUsize::new(0)),
                should_fail: false,
            }
        }

        pub fn failing(trade: Trade) -> Self {
            let mut mock = Self::new(trade);
            mock.should_fail = true;
            mock
        }
    }

    #[async_trait]
    impl TradeService for MockTradeService {
        fn trade(&self) -> &Trade {
            &self.trade
        }

        async fn estimate(&self, request: &TradeRequest) -> Result<TradeEstimate, DispatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.should_fail {
                return Err(DispatchError::ServiceUnavailable(
                    "Mock failure".to_string(),
                ));
            }
            Ok(TradeEstimate {
                phases: request.trade_scope.phases.clone(),
                labor: LaborEstimate {
                    total_hours: 10.0,
                    timeline_days: Some(2),
                    cost: None,
                    hourly_rate: None,
                },
                materials: MaterialsEstimate {
                    line_items: vec![],
                    total_cost: None,
                    pricing_status: None,
                },
                total_cost: None,
                confidence: Some(0.9),
                complications: vec![],
                coordination_requirements: CoordinationRequirements::default(),
                note: None,
            })
        }
    }

    #[test]
    fn http_service_reports_its_trade() {
        let service = HttpTradeService::new(
            Trade::Flooring,
            "http://localhost:8005",
            reqwest::Client::new(),
        );
        assert_eq!(service.trade(), &Trade::Flooring);
        assert_eq!(service.base_url, "http://localhost:8005");
    }

    #[tokio::test]
    async fn unreachable_http_service_is_unavailable() {
        // Bind then drop, leaving a port nothing listens on.
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let service = HttpTradeService::new(
            Trade::Plumbing,
            format!("http://{addr}"),
            reqwest::Client::new(),
        );
        let request = crate::test_support::sample_request(Trade::Plumbing);
        let err = service.estimate(&request).await.unwrap_err();
        assert!(matches!(err, DispatchError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn mock_service_echoes_phases() {
        let mock = MockTradeService::new(Trade::Electrical);
        let request = crate::test_support::sample_request(Trade::Electrical);
        let estimate = mock.estimate(&request).await.unwrap();
        assert_eq!(estimate.phases, request.trade_scope.phases);
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }
}
