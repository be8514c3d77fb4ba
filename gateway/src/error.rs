//! Gateway error handling
//!
//! Converts proxying failures to the HTTP responses a reverse proxy is
//! expected to produce: an unreachable upstream is `502 Bad Gateway`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Gateway error type
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("upstream request failed")]
    Upstream(#[from] reqwest::Error),

    #[error("request body too large")]
    BodyTooLarge,

    #[error("internal gateway error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            GatewayError::Upstream(err) => {
                error!("Upstream request failed: {:?}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    "BAD_GATEWAY",
                    "The application server could not be reached".to_string(),
                )
            }
            GatewayError::BodyTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Request body too large".to_string(),
            ),
            GatewayError::Internal(err) => {
                error!("Internal gateway error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
