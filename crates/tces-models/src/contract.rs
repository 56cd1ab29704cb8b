//! The Trade Service Contract.
//!
//! Every trade service accepts a [`TradeRequest`](crate::TradeRequest)-shaped
//! JSON body on `POST {base_url}/estimate` and answers with a
//! [`TradeEstimate`]. Both sides of that exchange are checked here: services
//! call [`validate_request_payload`] before running any estimate logic, and
//! the dispatcher calls [`TradeEstimate::validate`] on every response body.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::trade_estimate::TradeEstimate;

/// Path of the estimate operation, relative to a service's base URL.
pub const ESTIMATE_PATH: &str = "/estimate";

/// Fields a request body must carry for a service to accept it.
pub const REQUIRED_REQUEST_FIELDS: [&str; 3] = ["request_id", "project", "trade_scope"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid field {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

/// Reject a request payload that lacks any of the required top-level fields.
pub fn validate_request_payload(payload: &serde_json::Value) -> Result<(), ContractError> {
    let object = payload.as_object().ok_or(ContractError::NotAnObject)?;
    for field in REQUIRED_REQUEST_FIELDS {
        match object.get(field) {
            None | Some(serde_json::Value::Null) => return Err(ContractError::MissingField(field)),
            Some(_) => {}
        }
    }
    Ok(())
}

impl TradeEstimate {
    /// Check the response-shape invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.phases.is_empty() {
            return Err(ContractError::InvalidField {
                field: "phases",
                message: "must list at least one phase".to_string(),
            });
        }

        if !self.labor.total_hours.is_finite() || self.labor.total_hours < 0.0 {
            return Err(ContractError::InvalidField {
                field: "labor.total_hours",
                message: format!("{} is not a non-negative number", self.labor.total_hours),
            });
        }

        if let Some(confidence) = self.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ContractError::InvalidField {
                    field: "confidence",
                    message: format!("{confidence} is outside [0, 1]"),
                });
            }
        }

        let costs = [
            ("labor.cost", self.labor.cost),
            ("materials.total_cost", self.materials.total_cost),
            ("total_cost", self.total_cost),
        ];
        for (field, cost) in costs {
            if cost.is_some_and(|c| c < Decimal::ZERO) {
                return Err(ContractError::InvalidField {
                    field,
                    message: "must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}
