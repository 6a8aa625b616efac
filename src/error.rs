use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::ProviderError;
use crate::models::ErrorResponse;

/// Why a plan request was turned away. Every variant is terminal.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("submission matched the safety denylist")]
    SafetyBlocked,

    #[error("client exceeded its request quota")]
    RateLimitExceeded,

    #[error("no goals provided")]
    EmptyInput,

    #[error("request body is not a goals object")]
    MalformedBody,

    #[error("completion provider failed: {0}")]
    ProviderFailure(#[from] ProviderError),
}

impl GateError {
    /// Short label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            GateError::SafetyBlocked => "safety_blocked",
            GateError::RateLimitExceeded => "rate_limited",
            GateError::EmptyInput => "empty_input",
            GateError::MalformedBody => "malformed_body",
            GateError::ProviderFailure(_) => "provider_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GateError::SafetyBlocked | GateError::EmptyInput | GateError::MalformedBody => {
                StatusCode::BAD_REQUEST
            }
            GateError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            GateError::ProviderFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // What the client sees. Empty input keeps its human message, the rest are codes.
    pub fn public_message(&self) -> &'static str {
        match self {
            GateError::SafetyBlocked => "SAFETY_BLOCKED",
            GateError::RateLimitExceeded => "RATE_LIMIT_IP",
            GateError::EmptyInput => "No goals provided.",
            GateError::MalformedBody => "INVALID_REQUEST",
            GateError::ProviderFailure(_) => "GENERIC_ERROR",
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
