use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use tces_models::{validate_request_payload, Trade, TradeEstimate, TradeRequest};
use tracing::{info, warn};

use crate::error::StubError;
use crate::estimate::build_estimate;
use crate::state::StubState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub trade: Trade,
}

pub async fn health(State(state): State<Arc<StubState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        trade: state.config.trade.clone(),
    })
}

#[derive(Serialize)]
pub struct EstimateEnvelope {
    pub status: String,
    pub estimate: TradeEstimate,
}

pub async fn estimate(
    State(state): State<Arc<StubState>>,
    body: Bytes,
) -> Result<Json<EstimateEnvelope>, StubError> {
    let request = parse_request(&state, &body).inspect_err(|e| {
        warn!(trade = %state.config.trade, error = %e, "Rejected estimate request");
    })?;

    if state.config.response_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.response_delay_ms)).await;
    }

    let estimate = build_estimate(&request, &state.config);
    info!(
        trade = %request.trade,
        request_id = %request.request_id,
        hours = estimate.labor.total_hours,
        "Estimate produced"
    );

    Ok(Json(EstimateEnvelope {
        status: "success".to_string(),
        estimate,
    }))
}

/// Contract check first, so a missing field is reported by name rather than
/// as a deserialization error.
fn parse_request(state: &StubState, body: &[u8]) -> Result<TradeRequest, StubError> {
    let payload: serde_json::Value = serde_json::from_slice(body)?;
    validate_request_payload(&payload)?;
    let request: TradeRequest = serde_json::from_value(payload)?;

    if request.trade != state.config.trade {
        return Err(StubError::WrongTrade {
            expected: state.config.trade.clone(),
            requested: request.trade,
        });
    }
    Ok(request)
}
