use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tces_models::{ContractError, Trade};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StubError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("This service estimates {expected}, not {requested}")]
    WrongTrade { expected: Trade, requested: Trade },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StubError {
    pub fn status(&self) -> StatusCode {
        match self {
            StubError::Contract(_) | StubError::Json(_) => StatusCode::BAD_REQUEST,
            StubError::WrongTrade { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StubError::Config(_) | StubError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors leave the service as `{"error": "..."}` with a matching status.
impl IntoResponse for StubError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
