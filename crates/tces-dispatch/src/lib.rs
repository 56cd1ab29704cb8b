pub mod coordinator;
pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod http_client;
pub mod parser;
pub mod registry;
pub mod service;

pub mod test_support;

pub use coordinator::{CoordinationReport, Coordinator, RequestPlan};
pub use dispatcher::TradeDispatcher;
pub use error::{CoordinationError, DispatchError};
pub use fallback::fallback_estimate;
pub use registry::TradeServiceRegistry;
pub use service::{HttpTradeService, TradeService};
