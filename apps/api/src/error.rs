//! Error types for the HTTP API.
//!
//! Every failure leaves the process as a status code plus the wire payload
//! `{"errore": "<message>"}`. Client-caused failures carry a descriptive
//! message; internal failures carry a generic one (details go to the log,
//! not the client).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use bottega_core::error::CoreError;
use bottega_store::StoreError;

/// Generic message for failures the client cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Errore interno del server";

/// HTTP API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete input: 400.
    #[error("{0}")]
    Validation(String),

    /// Failed authentication: 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Missing entity: 404.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness conflict (username, email, newsletter): 409.
    #[error("{0}")]
    Conflict(String),

    /// Internal failure: 500 with a generic message, details logged.
    #[error("Internal error: {0}")]
    Internal(String),

    /// An outbound collaborator misbehaved: 502.
    #[error("{0}")]
    Upstream(String),

    /// An outbound collaborator is not configured: 503.
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    /// The status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(%detail, "Internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(json!({ "errore": message }))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            CoreError::EmptyCart | CoreError::Validation(_) => {
                ApiError::Validation(err.to_string())
            }
            // Consistency failure: a defect signal, never shown verbatim
            CoreError::FinalBelowGross { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Unavailable("x".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_core_error_mapping() {
        let not_found: ApiError = CoreError::ProductNotFound("p1".into()).into();
        assert!(matches!(not_found, ApiError::NotFound(_)));

        let empty: ApiError = CoreError::EmptyCart.into();
        assert!(matches!(empty, ApiError::Validation(_)));

        let guard: ApiError = CoreError::FinalBelowGross {
            product: "Micro".into(),
            final_price: "€0.00".into(),
            gross_price: "€0.03".into(),
        }
        .into();
        assert!(matches!(guard, ApiError::Internal(_)));
    }

    #[test]
    fn test_store_error_mapping() {
        let dup: ApiError = StoreError::duplicate("email", "a@b.it").into();
        assert!(matches!(dup, ApiError::Conflict(_)));
    }
}
