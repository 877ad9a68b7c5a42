//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Every message here is shown to the
//! user as-is, so none of them may reveal a password or a 2FA code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::identifier::IdentifierKind;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Required field left blank
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Invalid CPF")]
    InvalidCpf,

    #[error("Invalid e-mail")]
    InvalidEmail,

    #[error("Invalid user name")]
    InvalidUserName,

    /// No account for the identifier
    #[error("{kind} not found")]
    UserNotFound { kind: IdentifierKind },

    /// Wrong password, account still open
    #[error("Wrong password. You have {remaining} attempt(s) left.")]
    WrongPassword { remaining: u32 },

    /// This failure triggered the lockout
    #[error("After {attempts} failed attempts your account was locked for {minutes} minutes.")]
    LockedOut { attempts: u32, minutes: i64 },

    /// Attempt while a lockout is running
    #[error("Account temporarily locked. Please wait a few minutes.")]
    AccountLocked { retry_after_secs: i64 },

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("CPF already registered")]
    CpfTaken,

    #[error("E-mail already registered")]
    EmailTaken,

    /// Unknown, consumed or expired challenge
    #[error("Token expired. Please sign in again.")]
    TwoFactorExpired,

    #[error("Invalid code")]
    InvalidTwoFactorCode,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::InvalidCpf
            | AuthError::InvalidEmail
            | AuthError::InvalidUserName
            | AuthError::PasswordMismatch
            | AuthError::WeakPassword { .. } => ErrorKind::BadRequest,
            AuthError::UserNotFound { .. } => ErrorKind::NotFound,
            AuthError::WrongPassword { .. }
            | AuthError::TwoFactorExpired
            | AuthError::InvalidTwoFactorCode => ErrorKind::Unauthorized,
            AuthError::LockedOut { .. } | AuthError::AccountLocked { .. } => ErrorKind::Locked,
            AuthError::CpfTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::AccountLocked { retry_after_secs } => err.with_action(format!(
                "Try again in {} minute(s)",
                (retry_after_secs + 59) / 60
            )),
            AuthError::TwoFactorExpired => err.with_action("Sign in again to get a new token"),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::WrongPassword { remaining } => {
                tracing::warn!(remaining, "Invalid login attempt");
            }
            AuthError::UserNotFound { kind } => {
                tracing::warn!(%kind, "Login attempt for unknown account");
            }
            AuthError::LockedOut { attempts, minutes } => {
                tracing::warn!(attempts, minutes, "Account locked after failed attempts");
            }
            AuthError::AccountLocked { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Login attempt on locked account");
            }
            AuthError::InvalidTwoFactorCode => {
                tracing::warn!("Invalid two-factor code");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCpf.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::UserNotFound { kind: IdentifierKind::Cpf }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::WrongPassword { remaining: 2 }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthError::LockedOut { attempts: 3, minutes: 5 }.status_code(),
            StatusCode::LOCKED
        );
        assert_eq!(
            AuthError::AccountLocked { retry_after_secs: 10 }.status_code(),
            StatusCode::LOCKED
        );
        assert_eq!(AuthError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthError::UserNotFound { kind: IdentifierKind::Email }.to_string(),
            "E-mail not found"
        );
        assert_eq!(
            AuthError::WrongPassword { remaining: 1 }.to_string(),
            "Wrong password. You have 1 attempt(s) left."
        );
        assert_eq!(
            AuthError::LockedOut { attempts: 3, minutes: 5 }.to_string(),
            "After 3 failed attempts your account was locked for 5 minutes."
        );
    }

    #[test]
    fn test_locked_action_rounds_up_minutes() {
        let app = AuthError::AccountLocked { retry_after_secs: 61 }.to_app_error();
        assert_eq!(app.action(), Some("Try again in 2 minute(s)"));
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = AuthError::Internal("mutex poisoned".into()).to_app_error();
        assert!(!app.message().contains("mutex"));
    }
}
