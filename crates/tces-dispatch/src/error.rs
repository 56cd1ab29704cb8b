use std::time::Duration;

use tces_models::Trade;
use thiserror::Error;

/// Why a single trade call failed. Never escapes the dispatcher; each one
/// becomes the `error` text of a failed `TradeResult`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("No service address configured for trade {0}")]
    UnconfiguredTrade(Trade),

    #[error("Trade service timed out after {0:?}")]
    ServiceTimeout(Duration),

    #[error("Trade service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Trade service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Trade service rejected the request: {0}")]
    ValidationError(String),

    #[error("Trade service returned status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Trade task failed: {0}")]
    TaskFailed(String),
}

/// Failures of an orchestration request as a whole.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis produced no trades")]
    NoTrades,
}
