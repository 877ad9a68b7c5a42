//! Two-Factor Challenge Entity
//!
//! Issued after a correct password; redeemed once with the account's
//! six-digit code before it expires. Too many wrong codes burn it.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{TwoFactorChallengeId, UserId};
use platform::clock::deadline;

use crate::domain::value_object::two_factor_code::TwoFactorCode;

#[derive(Debug, Clone)]
pub struct TwoFactorChallenge {
    pub challenge_id: TwoFactorChallengeId,
    pub user_id: UserId,
    pub code: TwoFactorCode,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Wrong codes submitted so far
    pub failed_attempts: u32,
}

impl TwoFactorChallenge {
    pub fn new(user_id: UserId, code: TwoFactorCode, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            challenge_id: TwoFactorChallengeId::new(),
            user_id,
            code,
            expires_at: deadline(now, ttl),
            created_at: now,
            failed_attempts: 0,
        }
    }

    /// Valid up to and including `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Count a wrong code; `true` once `max_attempts` have been used up
    pub fn record_wrong_code(&mut self, max_attempts: u32) -> bool {
        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.failed_attempts >= max_attempts.max(1)
    }
}
