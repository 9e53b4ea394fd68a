//! API error types and handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use realty::RealtyError;
use serde::Serialize;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<RealtyError> for ApiError {
    fn from(err: RealtyError) -> Self {
        match err {
            RealtyError::NotFound(msg) => ApiError::NotFound(msg),
            err if err.is_client_error() => ApiError::BadRequest(err.to_string()),
            err => {
                log::error!("Query failed: {}", err);
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (RealtyError::NotFound("gone".into()), StatusCode::NOT_FOUND),
            (RealtyError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                RealtyError::SchemaMismatch { column: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                RealtyError::EmptyData("none".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
