//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.
//! Services return `Result<T, AppError>`; the status code mapping lives here and nowhere else.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: Missing or malformed input, schema constraint violations
/// - **Authentication Errors**: Bad credentials or a missing, invalid or expired token
/// - **Resource Errors**: Requested resource absent or owned by someone else
/// - **Conflict Errors**: Duplicate unique field (e.g. email)
/// - **Infrastructure Errors**: Database or other internal failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains the first violated constraint.
    #[error("{0}")]
    Validation(String),

    /// Credentials or bearer token rejected.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("{0}")]
    Unauthorized(String),

    /// Resource does not exist or doesn't belong to the authenticated user.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// A unique field is already taken.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("{0}")]
    Conflict(String),

    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other infrastructure failure (hashing, token signing, task join).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn transaction_not_found() -> Self {
        Self::NotFound("Transaction not found".to_string())
    }

    pub fn invalid_token() -> Self {
        Self::Unauthorized("Invalid or expired token. Please log in again".to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Database(_) | Self::Internal(_) => "internal_error",
        }
    }
}

/// Malformed JSON bodies are reported like any other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Unparseable query strings too, e.g. a repeated `type` parameter.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "status": "fail",
///   "code": "validation_error",
///   "message": "Passwords do not match"
/// }
/// ```
///
/// `status` is `"fail"` for client errors and `"error"` for server errors.
/// Server error details are logged but never sent to the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (discriminator, message) = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            ("error", "An internal error occurred".to_string())
        } else {
            ("fail", self.to_string())
        };

        let body = Json(json!({
            "status": discriminator,
            "code": self.code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn client_errors_carry_their_message() {
        let error = AppError::Validation("Passwords do not match".into());
        assert_eq!(error.to_string(), "Passwords do not match");
        assert_eq!(error.code(), "validation_error");
    }
}
