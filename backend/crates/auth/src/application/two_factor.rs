//! Two-Factor Verification Use Case
//!
//! Second step of the sign-in flow: answers the challenge issued after a
//! successful password check.

use std::sync::Arc;

use kernel::id::TwoFactorChallengeId;
use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{TwoFactorChallengeRepository, UserRepository};
use crate::domain::value_object::two_factor_code::TwoFactorCode;
use crate::error::{AuthError, AuthResult};

pub struct VerifyTwoFactorInput {
    /// Challenge token returned by sign-in
    pub token: String,
    pub code: String,
}

pub struct VerifyTwoFactorUseCase<U, C>
where
    U: UserRepository,
    C: TwoFactorChallengeRepository,
{
    user_repo: Arc<U>,
    challenge_repo: Arc<C>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<U, C> VerifyTwoFactorUseCase<U, C>
where
    U: UserRepository,
    C: TwoFactorChallengeRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        challenge_repo: Arc<C>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            challenge_repo,
            config,
            clock,
        }
    }

    /// Returns the verified account.
    ///
    /// A wrong code keeps the challenge open until
    /// `two_factor_max_attempts` wrong codes have been submitted; the one
    /// that uses up the budget removes it and reports it as expired.
    pub async fn execute(&self, input: VerifyTwoFactorInput) -> AuthResult<User> {
        if input.token.trim().is_empty() || input.code.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }

        let challenge_id: TwoFactorChallengeId = input
            .token
            .trim()
            .parse()
            .map_err(|_| AuthError::TwoFactorExpired)?;

        let challenge = self
            .challenge_repo
            .find_challenge(&challenge_id)
            .await?
            .ok_or(AuthError::TwoFactorExpired)?;

        if challenge.is_expired(self.clock.now()) {
            self.challenge_repo.consume(&challenge_id).await?;
            return Err(AuthError::TwoFactorExpired);
        }

        let accepted = TwoFactorCode::parse(&input.code)
            .map(|code| challenge.code.matches(&code))
            .unwrap_or(false);
        if !accepted {
            let burned = self
                .challenge_repo
                .record_wrong_code(&challenge_id, self.config.two_factor_max_attempts)
                .await?;
            if burned {
                tracing::warn!(
                    user_id = %challenge.user_id,
                    "Second factor challenge revoked after repeated wrong codes"
                );
                return Err(AuthError::TwoFactorExpired);
            }
            return Err(AuthError::InvalidTwoFactorCode);
        }

        // A concurrent verification may have consumed it first
        if !self.challenge_repo.consume(&challenge_id).await? {
            return Err(AuthError::TwoFactorExpired);
        }

        let user = self
            .user_repo
            .find_by_id(&challenge.user_id)
            .await?
            .ok_or(AuthError::TwoFactorExpired)?;

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(user)
    }
}
