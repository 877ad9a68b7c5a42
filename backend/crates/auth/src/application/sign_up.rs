//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{cpf::Cpf, email::Email, password::Password};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

/// Called once a new account is stored, e.g. to open its ledger account
pub trait RegistrationHook: Send + Sync {
    fn on_registered(&self, user: &User);
}

/// Hook that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegistrationHook;

impl RegistrationHook for NoopRegistrationHook {
    fn on_registered(&self, _user: &User) {}
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
    hook: Arc<dyn RegistrationHook>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
        hook: Arc<dyn RegistrationHook>,
    ) -> Self {
        Self {
            user_repo,
            config,
            clock,
            hook,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<User> {
        let required = [
            &input.name,
            &input.cpf,
            &input.email,
            &input.phone,
            &input.password,
            &input.confirm_password,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AuthError::MissingFields);
        }

        let cpf = Cpf::parse(&input.cpf, &self.config.known_cpfs)
            .map_err(|_| AuthError::InvalidCpf)?;
        let email = Email::new(input.email.as_str()).map_err(|_| AuthError::InvalidEmail)?;

        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        let password = Password::new(&input.password, self.config.password_min_length).map_err(
            |_| AuthError::WeakPassword {
                min: self.config.password_min_length,
            },
        )?;

        if self.user_repo.exists_by_cpf(&cpf).await? {
            return Err(AuthError::CpfTaken);
        }
        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let user = User::register(
            input.name.trim().to_string(),
            cpf,
            email,
            Some(input.phone.trim().to_string()),
            password,
            self.clock.now(),
        );

        // Persist
        self.user_repo.create(&user).await?;
        self.hook.on_registered(&user);

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );
        tracing::info!(email = %user.email, "Welcome e-mail queued");

        Ok(user)
    }
}
