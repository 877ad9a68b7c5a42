//! Sign In Use Case
//!
//! Checks the identifier and password against the account store, runs the
//! attempt through the login guard and issues a second-factor challenge.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    login_guard::FailureOutcome, two_factor_challenge::TwoFactorChallenge, user::User,
};
use crate::domain::repository::{
    LoginGuardRepository, TwoFactorChallengeRepository, UserRepository,
};
use crate::domain::value_object::{
    cpf::validate_cpf, email::Email, identifier::Identifier, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// CPF, e-mail or user name
    pub identifier: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Authenticated account; callers must not expose its credentials
    pub user: User,
    /// The caller still has to pass the second factor
    pub requires_2fa: bool,
    /// Pending challenge to answer on the 2FA step
    pub challenge: TwoFactorChallenge,
}

/// Guard decision for one attempt
enum Verdict {
    Blocked(Option<Duration>),
    Rejected(FailureOutcome),
    Accepted,
}

/// Sign in use case
pub struct SignInUseCase<U, G, C>
where
    U: UserRepository,
    G: LoginGuardRepository,
    C: TwoFactorChallengeRepository,
{
    user_repo: Arc<U>,
    guard_repo: Arc<G>,
    challenge_repo: Arc<C>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, G, C> SignInUseCase<U, G, C>
where
    U: UserRepository,
    G: LoginGuardRepository,
    C: TwoFactorChallengeRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        guard_repo: Arc<G>,
        challenge_repo: Arc<C>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            guard_repo,
            challenge_repo,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.identifier.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let identifier = Identifier::classify(&input.identifier);
        self.check_format(&identifier)?;

        let user = self.user_repo.find_by_identifier(&identifier).await?;
        let key = match &user {
            Some(user) => user.guard_key(),
            None => identifier.guard_key(),
        };

        let now = self.clock.now();
        let policy = self.config.lockout;
        let password = input.password.as_str();

        // Block check, password check and counter update happen under one
        // guard lock so concurrent attempts cannot interleave.
        let verdict = self
            .guard_repo
            .with_guard(&key, policy, |guard| {
                if guard.is_blocked(now) {
                    return Verdict::Blocked(guard.remaining_lock(now));
                }
                match &user {
                    Some(user) if user.password.matches(password) => {
                        guard.record_success();
                        Verdict::Accepted
                    }
                    _ => Verdict::Rejected(guard.record_failure(now)),
                }
            })
            .await?;

        match verdict {
            Verdict::Blocked(remaining) => {
                let retry_after_secs = remaining
                    .map(|left| (left.num_milliseconds() + 999) / 1000)
                    .unwrap_or(0);
                Err(AuthError::AccountLocked { retry_after_secs })
            }
            Verdict::Rejected(outcome) if outcome.locked => Err(AuthError::LockedOut {
                attempts: policy.max_attempts(),
                minutes: policy.lockout_minutes(),
            }),
            Verdict::Rejected(outcome) => match user {
                Some(_) => Err(AuthError::WrongPassword {
                    remaining: outcome.remaining_attempts,
                }),
                None => Err(AuthError::UserNotFound {
                    kind: identifier.kind(),
                }),
            },
            Verdict::Accepted => {
                let Some(mut user) = user else {
                    return Err(AuthError::Internal("accepted without account".into()));
                };
                self.complete(&mut user, now).await
            }
        }
    }

    /// Format errors are rejected before any attempt is counted
    fn check_format(&self, identifier: &Identifier) -> AuthResult<()> {
        match identifier {
            Identifier::Cpf(digits) => {
                if !validate_cpf(digits, &self.config.known_cpfs) {
                    return Err(AuthError::InvalidCpf);
                }
            }
            Identifier::Email(raw) => {
                Email::new(raw.as_str()).map_err(|_| AuthError::InvalidEmail)?;
            }
            Identifier::UserName(raw) => {
                UserName::with_min_length(raw, self.config.user_name_min_length)
                    .map_err(|_| AuthError::InvalidUserName)?;
            }
        }
        Ok(())
    }

    async fn complete(&self, user: &mut User, now: DateTime<Utc>) -> AuthResult<SignInOutput> {
        user.record_login(now);
        self.user_repo.update(user).await?;

        let challenge = TwoFactorChallenge::new(
            user.user_id,
            user.two_factor_code.clone(),
            now,
            self.config.two_factor_ttl,
        );
        self.challenge_repo.issue(&challenge).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "Password accepted, second factor pending"
        );

        Ok(SignInOutput {
            user: user.clone(),
            requires_2fa: true,
            challenge,
        })
    }
}
