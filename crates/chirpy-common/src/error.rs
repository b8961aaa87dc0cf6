//! Centralized error types for Chirpy.
//!
//! Uses `thiserror` for ergonomic error definitions and provides HTTP-friendly
//! error variants that can be directly converted to API responses.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth::AuthError;

/// Core application error type used across all Chirpy services.
#[derive(Debug, thiserror::Error)]
pub enum ChirpyError {
    // === Auth errors ===
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    // === Resource errors ===
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{resource} already exists")]
    AlreadyExists { resource: String },

    // === Validation errors ===
    #[error("{message}")]
    Validation { message: String },

    // === Infrastructure errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    error: String,
    message: String,
}

impl ChirpyError {
    /// Shorthand for a missing resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Turn a unique-constraint violation into `AlreadyExists`; any other
    /// database error passes through unchanged.
    pub fn from_unique_violation(err: sqlx::Error, resource: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::AlreadyExists {
                resource: resource.into(),
            },
            _ => Self::Database(err),
        }
    }

    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(e) if e.is_credential_failure() => StatusCode::UNAUTHORIZED,
            Self::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists { .. } => StatusCode::CONFLICT,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code string for programmatic handling by clients.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Auth(AuthError::MissingHeader) => "MISSING_AUTHORIZATION",
            Self::Auth(AuthError::MalformedHeader) => "MALFORMED_AUTHORIZATION",
            Self::Auth(AuthError::InvalidToken) => "INVALID_TOKEN",
            Self::Auth(AuthError::PasswordMismatch) => "INVALID_CREDENTIALS",
            Self::Auth(_) => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ChirpyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't leak internal details to clients
        let message = match &self {
            ChirpyError::Auth(e) if !e.is_credential_failure() => {
                tracing::error!("Auth primitive failure: {e}");
                "An internal error occurred".to_string()
            }
            ChirpyError::Database(e) => {
                tracing::error!("Database error: {e}");
                "An internal error occurred".to_string()
            }
            ChirpyError::Internal(e) => {
                tracing::error!("Internal error: {e}");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            error: self.error_code().to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for ChirpyError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ChirpyError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation {
            message: rejection.body_text(),
        }
    }
}

/// Convenience type alias for Results using ChirpyError.
pub type ChirpyResult<T> = Result<T, ChirpyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_unauthorized() {
        for e in [
            AuthError::MissingHeader,
            AuthError::MalformedHeader,
            AuthError::InvalidToken,
            AuthError::PasswordMismatch,
        ] {
            assert_eq!(ChirpyError::from(e).status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn primitive_failures_are_internal() {
        let err = ChirpyError::from(AuthError::Hashing(argon2::password_hash::Error::Password));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn internal_details_are_hidden() {
        let response = ChirpyError::Internal(anyhow::anyhow!("secret pool state")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[derive(Debug)]
    struct UniqueViolation;

    impl std::fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"users_email_key\"")
        }
    }

    impl std::error::Error for UniqueViolation {}

    impl sqlx::error::DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn unique_violation_becomes_conflict() {
        let err = ChirpyError::from_unique_violation(
            sqlx::Error::Database(Box::new(UniqueViolation)),
            "Email",
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Email already exists");

        let other = ChirpyError::from_unique_violation(sqlx::Error::RowNotFound, "Email");
        assert_eq!(other.error_code(), "DATABASE_ERROR");
    }

    #[test]
    fn resource_errors_map_to_http() {
        assert_eq!(ChirpyError::not_found("Chirp").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ChirpyError::not_found("Chirp").to_string(), "Chirp not found");
        let conflict = ChirpyError::AlreadyExists {
            resource: "Email".into(),
        };
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(ChirpyError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }
}
