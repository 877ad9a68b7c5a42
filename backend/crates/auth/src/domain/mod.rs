//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{login_guard::LoginGuard, two_factor_challenge::TwoFactorChallenge, user::User};
pub use repository::{LoginGuardRepository, TwoFactorChallengeRepository, UserRepository};
