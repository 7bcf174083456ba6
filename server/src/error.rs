//! Unified error handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] shape_engine::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Engine(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, details) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ("Database error".to_string(), None)
            }
            AppError::Engine(e) if e.is_client_error() => {
                tracing::warn!("Rejected request: {}", e);
                (e.to_string(), None)
            }
            AppError::Engine(e) => {
                tracing::error!("Engine configuration error: {}", e);
                ("Internal server error".to_string(), Some(e.to_string()))
            }
            AppError::NotFound(msg) => (msg.clone(), None),
            AppError::Validation(msg) => {
                tracing::warn!("Validation failed: {}", msg);
                ("Validation failed".to_string(), Some(msg.clone()))
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal server error".to_string(), Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_engine_errors_are_bad_requests() {
        let err = AppError::from(shape_engine::Error::UnknownSortField("age".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(shape_engine::Error::EmptyFieldName);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn configuration_engine_errors_are_internal() {
        let err = AppError::from(shape_engine::Error::MappingNotFound {
            external: "ContactDto".into(),
            internal: "Contact".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn other_statuses() {
        assert_eq!(
            AppError::NotFound("contact 9".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("phone".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound("contact 9".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
