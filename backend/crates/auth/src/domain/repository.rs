//! Repository Traits
//!
//! Storage interfaces. The in-memory implementation lives in `infra`.

use chrono::{DateTime, Utc};
use kernel::id::{TwoFactorChallengeId, UserId};

use crate::domain::entity::{
    login_guard::{LockoutPolicy, LoginGuard},
    two_factor_challenge::TwoFactorChallenge,
    user::User,
};
use crate::domain::value_object::{cpf::Cpf, email::Email, identifier::Identifier};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find the account a login identifier names
    async fn find_by_identifier(&self, identifier: &Identifier) -> AuthResult<Option<User>>;

    async fn exists_by_cpf(&self, cpf: &Cpf) -> AuthResult<bool>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Keyed login guards
///
/// Implementations must run `f` for a given key while no other call for
/// that key is in progress.
#[trait_variant::make(LoginGuardRepository: Send)]
pub trait LocalLoginGuardRepository {
    /// Run `f` against the guard stored under `key`, creating one from
    /// `policy` when absent, and persist the result
    async fn with_guard<F, T>(&self, key: &str, policy: LockoutPolicy, f: F) -> AuthResult<T>
    where
        F: FnOnce(&mut LoginGuard) -> T + Send,
        T: Send;

    /// Drop guards that are stale at `now`; returns how many were removed
    async fn prune(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}

/// Pending second-factor challenges
#[trait_variant::make(TwoFactorChallengeRepository: Send)]
pub trait LocalTwoFactorChallengeRepository {
    async fn issue(&self, challenge: &TwoFactorChallenge) -> AuthResult<()>;

    async fn find_challenge(
        &self,
        challenge_id: &TwoFactorChallengeId,
    ) -> AuthResult<Option<TwoFactorChallenge>>;

    /// Remove a challenge; returns whether it existed
    async fn consume(&self, challenge_id: &TwoFactorChallengeId) -> AuthResult<bool>;

    /// Count a wrong code against the challenge and remove it once
    /// `max_attempts` are used up. Returns `true` when it was removed.
    async fn record_wrong_code(
        &self,
        challenge_id: &TwoFactorChallengeId,
        max_attempts: u32,
    ) -> AuthResult<bool>;

    /// Drop challenges expired at `now`
    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;
}
