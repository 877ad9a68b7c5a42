//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod password_reset;
pub mod sign_in;
pub mod sign_up;
pub mod two_factor;

// Re-exports
pub use config::AuthConfig;
pub use password_reset::{ResetPasswordInput, password_strength, validate_reset};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{NoopRegistrationHook, RegistrationHook, SignUpInput, SignUpUseCase};
pub use two_factor::{VerifyTwoFactorInput, VerifyTwoFactorUseCase};
