//! Domain Entities

pub mod login_guard;
pub mod two_factor_challenge;
pub mod user;

pub use login_guard::{FailureOutcome, GuardState, LockoutPolicy, LoginGuard};
pub use two_factor_challenge::TwoFactorChallenge;
pub use user::User;
