use tces_models::TradeEstimate;

use crate::error::DispatchError;

/// Parse and validate a trade service response body.
///
/// Accepts the estimate either as the top-level object or wrapped in an
/// `{"estimate": {...}}` envelope.
pub fn parse_trade_estimate(body: &str) -> Result<TradeEstimate, DispatchError> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).map_err(|e| {
        DispatchError::InvalidResponse(format!("body is not JSON ({e}, length={})", body.len()))
    })?;

    let payload = match value.get("estimate") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => value,
    };

    let estimate: TradeEstimate = serde_json::from_value(payload)
        .map_err(|e| DispatchError::InvalidResponse(format!("unexpected shape: {e}")))?;

    estimate
        .validate()
        .map_err(|e| DispatchError::InvalidResponse(e.to_string()))?;

    Ok(estimate)
}

/// Pull a human-readable message out of an error body, which services send
/// as `{"error": "..."}` but proxies may send as plain text.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
