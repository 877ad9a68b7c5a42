//! In-Memory Repository Implementations
//!
//! Process-local store for users, login guards and 2FA challenges. Data
//! lives as long as the server process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use kernel::id::{TwoFactorChallengeId, UserId};

use crate::domain::entity::{
    login_guard::{LockoutPolicy, LoginGuard},
    two_factor_challenge::TwoFactorChallenge,
    user::User,
};
use crate::domain::repository::{
    LoginGuardRepository, TwoFactorChallengeRepository, UserRepository,
};
use crate::domain::value_object::{cpf::Cpf, email::Email, identifier::Identifier};
use crate::error::{AuthError, AuthResult};
use crate::infra::seed;

#[derive(Default)]
struct Stores {
    users: RwLock<HashMap<UserId, User>>,
    /// One mutex for every guard key; each `with_guard` call runs alone
    guards: Mutex<HashMap<String, LoginGuard>>,
    challenges: Mutex<HashMap<TwoFactorChallengeId, TwoFactorChallenge>>,
}

/// In-memory auth repository
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    stores: Arc<Stores>,
}

fn poisoned<T>(_: PoisonError<T>) -> AuthError {
    AuthError::Internal("auth store lock poisoned".to_string())
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the demo accounts
    pub fn with_demo_users() -> AuthResult<Self> {
        let repo = Self::new();
        {
            let mut users = repo.stores.users.write().map_err(poisoned)?;
            for user in seed::demo_users()? {
                users.insert(user.user_id, user);
            }
        }
        tracing::info!("Seeded demo users");
        Ok(repo)
    }

    /// Number of keys with a non-pristine guard
    pub fn tracked_guards(&self) -> AuthResult<usize> {
        Ok(self.guards().len())
    }

    /// The guard map stays consistent even if a closure panicked while
    /// holding it, so poisoning is ignored here.
    fn guards(&self) -> MutexGuard<'_, HashMap<String, LoginGuard>> {
        self.stores
            .guards
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.stores.users.write().map_err(poisoned)?;

        // Re-checked under the write lock; two sign-ups may race past the
        // use case's existence checks.
        if users.values().any(|u| u.cpf == user.cpf) {
            return Err(AuthError::CpfTaken);
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.stores.users.read().map_err(poisoned)?;
        Ok(users.get(user_id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &Identifier) -> AuthResult<Option<User>> {
        let users = self.stores.users.read().map_err(poisoned)?;
        Ok(users
            .values()
            .find(|u| u.is_identified_by(identifier))
            .cloned())
    }

    async fn exists_by_cpf(&self, cpf: &Cpf) -> AuthResult<bool> {
        let users = self.stores.users.read().map_err(poisoned)?;
        Ok(users.values().any(|u| &u.cpf == cpf))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.stores.users.read().map_err(poisoned)?;
        Ok(users.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.stores.users.write().map_err(poisoned)?;
        match users.get_mut(&user.user_id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AuthError::Internal(format!("user {} not found", user.user_id))),
        }
    }
}

// ============================================================================
// Login Guard Repository Implementation
// ============================================================================

impl LoginGuardRepository for InMemoryAuthRepository {
    async fn with_guard<F, T>(&self, key: &str, policy: LockoutPolicy, f: F) -> AuthResult<T>
    where
        F: FnOnce(&mut LoginGuard) -> T + Send,
        T: Send,
    {
        let mut guards = self.guards();
        let guard = guards
            .entry(key.to_string())
            .or_insert_with(|| LoginGuard::new(policy));

        let result = f(guard);

        // Pristine guards carry no information
        let pristine = guard.is_pristine();
        if pristine {
            guards.remove(key);
        }
        Ok(result)
    }

    async fn prune(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut guards = self.guards();
        let before = guards.len();
        guards.retain(|_, guard| !guard.is_stale(now));
        let deleted = (before - guards.len()) as u64;

        tracing::debug!(guards_deleted = deleted, "Pruned stale login guards");

        Ok(deleted)
    }
}

// ============================================================================
// Two-Factor Challenge Repository Implementation
// ============================================================================

impl TwoFactorChallengeRepository for InMemoryAuthRepository {
    async fn issue(&self, challenge: &TwoFactorChallenge) -> AuthResult<()> {
        let mut challenges = self.stores.challenges.lock().map_err(poisoned)?;
        challenges.insert(challenge.challenge_id, challenge.clone());
        Ok(())
    }

    async fn find_challenge(
        &self,
        challenge_id: &TwoFactorChallengeId,
    ) -> AuthResult<Option<TwoFactorChallenge>> {
        let challenges = self.stores.challenges.lock().map_err(poisoned)?;
        Ok(challenges.get(challenge_id).cloned())
    }

    async fn consume(&self, challenge_id: &TwoFactorChallengeId) -> AuthResult<bool> {
        let mut challenges = self.stores.challenges.lock().map_err(poisoned)?;
        Ok(challenges.remove(challenge_id).is_some())
    }

    async fn record_wrong_code(
        &self,
        challenge_id: &TwoFactorChallengeId,
        max_attempts: u32,
    ) -> AuthResult<bool> {
        let mut challenges = self.stores.challenges.lock().map_err(poisoned)?;
        let exhausted = match challenges.get_mut(challenge_id) {
            Some(challenge) => challenge.record_wrong_code(max_attempts),
            None => return Ok(true),
        };
        if exhausted {
            challenges.remove(challenge_id);
        }
        Ok(exhausted)
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut challenges = self.stores.challenges.lock().map_err(poisoned)?;
        let before = challenges.len();
        challenges.retain(|_, c| !c.is_expired(now));
        let deleted = (before - challenges.len()) as u64;

        tracing::debug!(challenges_deleted = deleted, "Cleaned up expired 2FA challenges");

        Ok(deleted)
    }
}
