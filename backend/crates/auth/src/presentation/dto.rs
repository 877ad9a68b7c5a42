//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty so a missing field reaches the use case
//! and is reported as "fill in all fields" rather than a JSON rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

// ============================================================================
// User view
// ============================================================================

/// Account as returned to clients; never carries the password or 2FA code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub user_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            name: user.name.clone(),
            cpf: user.cpf.as_str().to_string(),
            email: user.email.as_str().to_string(),
            user_name: user.user_name.as_str().to_string(),
            phone: user.phone.clone(),
            role: user.role.code().to_string(),
            last_login_at: user.last_login_at,
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInRequest {
    /// CPF, e-mail or user name
    pub identifier: String,
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user: UserView,
    /// Always true: the 2FA step follows
    pub requires_2fa: bool,
    /// Challenge token for `POST /2fa`
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Two-Factor
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwoFactorRequest {
    pub token: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorResponse {
    pub user: UserView,
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignUpRequest {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user: UserView,
}

// ============================================================================
// Password
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordStrengthRequest {
    pub password: String,
}

// ============================================================================
// CPF
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpfValidateRequest {
    pub cpf: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CpfValidateResponse {
    pub valid: bool,
    /// `000.000.000-00` when valid
    pub formatted: Option<String>,
}
