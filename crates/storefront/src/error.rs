//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream shop API operation failed.
    #[error("Shop API error: {0}")]
    Api(#[from] ApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Api(err) => match err {
                // The upstream being down or broken is a gateway problem
                // from the shopper's point of view.
                ApiError::Network(_) | ApiError::Unknown(_) => StatusCode::BAD_GATEWAY,
                ApiError::Http { status, .. } => {
                    if *status >= 500 {
                        StatusCode::BAD_GATEWAY
                    } else {
                        match StatusCode::from_u16(*status) {
                            Ok(code) => code,
                            Err(_) => StatusCode::BAD_GATEWAY,
                        }
                    }
                }
                ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
                ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client; internal detail stays in logs.
    fn client_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Internal(_) => "Internal server error".to_string(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        let is_server_error = matches!(
            &self,
            Self::Internal(_)
                | Self::Api(ApiError::Network(_) | ApiError::Unknown(_) | ApiError::Http { .. })
        );
        if is_server_error {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = Json(json!({ "error": self.client_message() }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Resource;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "Not found: product 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_api_error_status_mapping() {
        assert_eq!(
            AppError::Api(ApiError::http(429)).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::Api(ApiError::http(500)).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Api(ApiError::validation("product_id", "must be positive")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Api(ApiError::NotFound {
                resource: Resource::Product,
                id: 7
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Api(ApiError::Unknown("bad body".to_string())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let err = AppError::Internal("connection pool exhausted".to_string());
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_api_error_uses_user_message() {
        let err = AppError::Api(ApiError::Unknown("serde: trailing comma".to_string()));
        assert_eq!(
            err.client_message(),
            "Something went wrong. Please try again."
        );
    }
}
