//! Ledger Error Types
//!
//! This module provides ledger-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Required field missing from the request
    #[error("Missing required fields")]
    MissingFields,

    /// Zero, negative or non-numeric amount
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("User not found")]
    AccountNotFound,

    #[error("Unknown transfer type: {0}")]
    UnknownTransferKind(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Unknown crypto asset: {0}")]
    UnknownAsset(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::MissingFields
            | LedgerError::InvalidAmount
            | LedgerError::InsufficientFunds
            | LedgerError::UnknownTransferKind(_)
            | LedgerError::UnsupportedCurrency(_)
            | LedgerError::UnknownAsset(_) => ErrorKind::BadRequest,
            LedgerError::AccountNotFound => ErrorKind::NotFound,
            LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            LedgerError::InsufficientFunds => {
                tracing::warn!("Transfer rejected: insufficient balance");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
