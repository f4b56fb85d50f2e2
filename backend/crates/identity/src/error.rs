//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The variants cover the failure
//! taxonomy of the identity flows: validation, uniqueness, missing
//! records, credential mismatch, and upstream failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Provider id already linked to another account
    #[error("Provider identity already linked")]
    ProviderIdTaken,

    /// Credential proof rejected
    ///
    /// Covers a wrong password, a wrong one-time code, and a login for a
    /// user name that does not exist; the response never distinguishes
    /// them, so a failed login reveals nothing about which names are registered.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No pending challenge for this phone number
    #[error("No pending verification for this phone number")]
    ChallengeNotFound,

    /// Pending challenge expired
    #[error("Verification code expired")]
    ChallengeExpired,

    /// Session not found, malformed, or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Input failed shape validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// OAuth provider exchange failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Challenge delivery (SMS) failed
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::UserNameTaken | IdentityError::ProviderIdTaken => StatusCode::CONFLICT,
            IdentityError::InvalidCredentials | IdentityError::SessionInvalid => {
                StatusCode::UNAUTHORIZED
            }
            IdentityError::ChallengeExpired => StatusCode::GONE,
            IdentityError::ChallengeNotFound | IdentityError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            IdentityError::Provider(_) | IdentityError::Delivery(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::UserNameTaken | IdentityError::ProviderIdTaken => ErrorKind::Conflict,
            IdentityError::InvalidCredentials | IdentityError::SessionInvalid => {
                ErrorKind::Unauthorized
            }
            IdentityError::ChallengeExpired => ErrorKind::Gone,
            IdentityError::ChallengeNotFound | IdentityError::Validation(_) => {
                ErrorKind::BadRequest
            }
            IdentityError::Provider(_) | IdentityError::Delivery(_) => {
                ErrorKind::ServiceUnavailable
            }
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::Provider(msg) => {
                tracing::error!(message = %msg, "OAuth provider exchange failed");
            }
            IdentityError::Delivery(msg) => {
                tracing::error!(message = %msg, "Challenge delivery failed");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid credential attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
