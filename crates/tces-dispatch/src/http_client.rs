use reqwest::StatusCode;
use tces_models::{TradeEstimate, TradeRequest, ESTIMATE_PATH};
use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::parser::{error_message, parse_trade_estimate};

/// Build the shared HTTP client for trade services. Timeouts are enforced
/// per call by the dispatcher, not here.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("tces/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// `{base_url}/estimate`, tolerating a trailing slash on the base.
pub fn estimate_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ESTIMATE_PATH)
}

/// POST a request to a trade service's estimate operation. One attempt,
/// no retries.
pub async fn post_estimate(
    client: &reqwest::Client,
    base_url: &str,
    request: &TradeRequest,
) -> Result<TradeEstimate, DispatchError> {
    let url = estimate_url(base_url);
    debug!(trade = %request.trade, url = %url, request_id = %request.request_id, "Posting estimate request");

    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        warn!(trade = %request.trade, status = %status, "Trade service returned error status");
        return Err(status_error(status, &body));
    }

    parse_trade_estimate(&body)
}

fn transport_error(e: reqwest::Error) -> DispatchError {
    if e.is_decode() || e.is_body() {
        DispatchError::InvalidResponse(e.to_string())
    } else {
        DispatchError::ServiceUnavailable(e.to_string())
    }
}

fn status_error(status: StatusCode, body: &str) -> DispatchError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            DispatchError::ValidationError(error_message(body))
        }
        _ => DispatchError::ServiceStatus {
            status: status.as_u16(),
            body: error_message(body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_url_handles_trailing_slash() {
        assert_eq!(
            estimate_url("http://localhost:8001"),
            "http://localhost:8001/estimate"
        );
        assert_eq!(
            estimate_url("http://localhost:8001/"),
            "http://localhost:8001/estimate"
        );
    }

    #[test]
    fn validation_statuses_map_to_validation_error() {
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, r#"{"error": "Missing required field: project"}"#),
            DispatchError::ValidationError("Missing required field: project".to_string())
        );
        assert!(matches!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, "bad"),
            DispatchError::ValidationError(_)
        ));
    }

    #[test]
    fn other_statuses_keep_code() {
        assert_eq!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "maintenance"),
            DispatchError::ServiceStatus {
                status: 503,
                body: "maintenance".to_string()
            }
        );
    }

    #[test]
    fn client_builds() {
        assert!(build_client().is_ok());
    }
}
