//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::{
    LoginGuardRepository, TwoFactorChallengeRepository, UserRepository,
};
use crate::presentation::handlers::{self, AuthAppState};

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    Router::new()
        .route("/login", post(handlers::sign_in::<R>))
        .route("/2fa", post(handlers::verify_two_factor::<R>))
        .route("/register", post(handlers::sign_up::<R>))
        .route("/password/reset", post(handlers::reset_password::<R>))
        .route("/password/strength", post(handlers::check_password_strength))
        .route("/cpf/validate", post(handlers::validate_cpf::<R>))
        .with_state(state)
}
