//! Error types for the Pricing API.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use printshop_core::PricingError;
use serde_json::json;

/// Pricing API errors.
///
/// Field-level problems never reach here; they are coerced by the core.
/// Only a body that cannot be read as a JSON object is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body could not be read, e.g. over the configured size limit.
    #[error("{0}")]
    Body(#[from] BytesRejection),

    #[error("Request body is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidInput(#[from] PricingError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Body(rejection) => rejection.status(),
            ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidInput(PricingError::NotAnObject { .. }) => StatusCode::BAD_REQUEST,
            ApiError::InvalidInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Body(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "payload_too_large"
            }
            ApiError::Body(_) => "unreadable_body",
            ApiError::MalformedJson(_) => "malformed_json",
            ApiError::InvalidInput(PricingError::NotAnObject { .. }) => "invalid_input",
            ApiError::InvalidInput(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "quote failed");
        } else {
            tracing::warn!(code = self.code(), error = %message, "rejected quote request");
        }

        let body = Json(json!({
            "message": message,
            "error": self.code(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_object_is_bad_request() {
        let err = ApiError::from(PricingError::NotAnObject { found: "array" });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn test_malformed_json_is_bad_request() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ApiError::from(parse_err);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "malformed_json");
        assert!(err.to_string().starts_with("Request body is not valid JSON"));
    }

    #[test]
    fn test_fee_error_is_internal() {
        let err = ApiError::from(PricingError::InvalidFee {
            fee: "inside_label".to_string(),
            amount: -1.0,
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
