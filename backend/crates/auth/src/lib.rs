//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - In-memory store and demo seed data
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - CPF validation (checksum plus a configurable allow-list)
//! - Sign-in with CPF, e-mail or user name, then a 6-digit second factor
//! - Sign-up and password reset validation
//!
//! ## Security Model
//! - Three failed attempts lock an account for five minutes
//! - Lockout expiry is checked lazily against an injected clock
//! - Responses never carry passwords or 2FA codes

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
