//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::clock::{Clock, SystemClock};

use crate::application::config::AuthConfig;
use crate::application::{
    NoopRegistrationHook, RegistrationHook, ResetPasswordInput, SignInInput, SignInUseCase,
    SignUpInput, SignUpUseCase, VerifyTwoFactorInput, VerifyTwoFactorUseCase, password_strength,
    validate_reset,
};
use crate::domain::repository::{
    LoginGuardRepository, TwoFactorChallengeRepository, UserRepository,
};
use crate::domain::value_object::cpf::Cpf;
use crate::error::AuthResult;
use crate::presentation::dto::{
    CpfValidateRequest, CpfValidateResponse, PasswordStrengthRequest, ResetPasswordRequest,
    SignInRequest, SignInResponse, SignUpRequest, SignUpResponse, TwoFactorRequest,
    TwoFactorResponse, UserView,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub clock: Arc<dyn Clock>,
    pub registration_hook: Arc<dyn RegistrationHook>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    /// State with the system clock and no registration hook
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
            registration_hook: Arc::new(NoopRegistrationHook),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_registration_hook(mut self, hook: Arc<dyn RegistrationHook>) -> Self {
        self.registration_hook = hook;
        self
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<Json<SignInResponse>>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            identifier: req.identifier,
            password: req.password,
        })
        .await?;

    Ok(Json(SignInResponse {
        user: UserView::from(&output.user),
        requires_2fa: output.requires_2fa,
        token: output.challenge.challenge_id.to_string(),
        expires_at: output.challenge.expires_at,
    }))
}

// ============================================================================
// Two-Factor
// ============================================================================

/// POST /api/auth/2fa
pub async fn verify_two_factor<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<TwoFactorRequest>,
) -> AuthResult<Json<TwoFactorResponse>>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = VerifyTwoFactorUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let user = use_case
        .execute(VerifyTwoFactorInput {
            token: req.token,
            code: req.code,
        })
        .await?;

    Ok(Json(TwoFactorResponse {
        user: UserView::from(&user),
    }))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/register
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
        state.registration_hook.clone(),
    );

    let user = use_case
        .execute(SignUpInput {
            name: req.name,
            cpf: req.cpf,
            email: req.email,
            phone: req.phone,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user: UserView::from(&user),
        }),
    ))
}

// ============================================================================
// Password
// ============================================================================

/// POST /api/auth/password/reset
pub async fn reset_password<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let input = ResetPasswordInput {
        new_password: req.new_password,
        confirm_password: req.confirm_password,
    };
    validate_reset(&input, state.config.password_min_length)?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/password/strength
pub async fn check_password_strength(Json(req): Json<PasswordStrengthRequest>) -> impl IntoResponse {
    Json(password_strength(&req.password))
}

// ============================================================================
// CPF
// ============================================================================

/// POST /api/auth/cpf/validate
pub async fn validate_cpf<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<CpfValidateRequest>,
) -> Json<CpfValidateResponse>
where
    R: UserRepository
        + LoginGuardRepository
        + TwoFactorChallengeRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let formatted = Cpf::parse(&req.cpf, &state.config.known_cpfs)
        .ok()
        .map(|cpf| cpf.formatted());

    Json(CpfValidateResponse {
        valid: formatted.is_some(),
        formatted,
    })
}
