//! Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Accounts, transactions, fee rules, crypto market, repository traits
//! - `application/` - Use cases
//! - `infra/` - In-memory store and demo data
//! - `presentation/` - HTTP handlers
//!
//! ## Money Model
//! - Amounts are integer cents; fees are basis points rounded half-up
//! - A debit and its ledger entry are applied under one lock
//! - Simulation never changes balances

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use infra::memory::InMemoryLedger;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
