//! Login Guard Entity
//!
//! Failed-attempt counter with a temporary lockout.
//!
//! ```text
//!            record_failure (count reaches max_attempts)
//!   ┌──────┐ ─────────────────────────────────────────▶ ┌────────┐
//!   │ Open │                                            │ Locked │
//!   └──────┘ ◀───────────────────────────────────────── └────────┘
//!            now >= locked_until (checked lazily by
//!            is_blocked / record_failure)
//! ```
//!
//! The guard never reads the clock; callers pass `now`. While locked,
//! failures are reported but not counted. `record_success` returns to a
//! clean Open state from anywhere. No input makes it panic: the lock
//! deadline saturates at the latest representable instant.

use chrono::{DateTime, Duration, Utc};
use platform::clock::deadline;
use serde::Serialize;

// ============================================================================
// Policy
// ============================================================================

/// How many failures are tolerated and how long the lockout lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    max_attempts: u32,
    lockout_duration: Duration,
}

impl LockoutPolicy {
    /// Failures before lockout
    pub const MAX_ATTEMPTS: u32 = 3;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 5;

    /// `max_attempts` is clamped to at least 1, a negative duration to zero
    pub fn new(max_attempts: u32, lockout_duration: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            lockout_duration: lockout_duration.max(Duration::zero()),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn lockout_duration(&self) -> Duration {
        self.lockout_duration
    }

    /// Lockout duration rounded up to whole minutes, for messages
    pub fn lockout_minutes(&self) -> i64 {
        let secs = self.lockout_duration.num_seconds();
        secs.div_euclid(60) + i64::from(secs.rem_euclid(60) > 0)
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::new(
            Self::MAX_ATTEMPTS,
            Duration::minutes(Self::LOCKOUT_MINUTES),
        )
    }
}

// ============================================================================
// Guard
// ============================================================================

/// Observable state at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Open,
    Locked { until: DateTime<Utc> },
}

/// Result of [`LoginGuard::record_failure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureOutcome {
    /// The guard is (now) locked
    pub locked: bool,
    /// Attempts left before lockout; 0 when locked
    pub remaining_attempts: u32,
    /// End of the lockout when locked
    pub locked_until: Option<DateTime<Utc>>,
}

/// Per-account (or per-session) attempt tracker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginGuard {
    policy: LockoutPolicy,
    failed_attempts: u32,
    locked_until: Option<DateTime<Utc>>,
    last_failure_at: Option<DateTime<Utc>>,
}

impl LoginGuard {
    pub fn new(policy: LockoutPolicy) -> Self {
        Self {
            policy,
            failed_attempts: 0,
            locked_until: None,
            last_failure_at: None,
        }
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    pub fn locked_until(&self) -> Option<DateTime<Utc>> {
        self.locked_until
    }

    /// State at `now` without applying the expiry reset
    pub fn state(&self, now: DateTime<Utc>) -> GuardState {
        match self.locked_until {
            Some(until) if now < until => GuardState::Locked { until },
            _ => GuardState::Open,
        }
    }

    /// Time left on the lock at `now`, if any
    pub fn remaining_lock(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self.state(now) {
            GuardState::Locked { until } => Some(until - now),
            GuardState::Open => None,
        }
    }

    /// Nothing recorded; the entry can be dropped by a keyed store
    pub fn is_pristine(&self) -> bool {
        self.failed_attempts == 0 && self.locked_until.is_none()
    }

    /// Nothing worth keeping at `now`: the lock has run out, or the last
    /// counted failure is at least one lockout window old.
    ///
    /// A keyed store may drop stale guards; dropping one forgets its
    /// failure count.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) => now >= until,
            None => self
                .last_failure_at
                .is_none_or(|at| deadline(at, self.policy.lockout_duration) <= now),
        }
    }

    /// Whether attempts are currently rejected.
    ///
    /// An expired lock is cleared here (counter back to 0), so the first
    /// call at or after `locked_until` returns `false` and leaves a clean
    /// guard. Calls before expiry do not mutate anything.
    pub fn is_blocked(&mut self, now: DateTime<Utc>) -> bool {
        match self.locked_until {
            Some(until) if now < until => true,
            Some(_) => {
                self.unlock();
                false
            }
            None => false,
        }
    }

    /// Count a failed attempt.
    ///
    /// Reaching `max_attempts` locks the guard until
    /// `now + lockout_duration`. A failure while still locked is reported
    /// as locked and not counted.
    pub fn record_failure(&mut self, now: DateTime<Utc>) -> FailureOutcome {
        if self.is_blocked(now) {
            return FailureOutcome {
                locked: true,
                remaining_attempts: 0,
                locked_until: self.locked_until,
            };
        }

        self.failed_attempts = self.failed_attempts.saturating_add(1);
        self.last_failure_at = Some(now);

        if self.failed_attempts >= self.policy.max_attempts {
            let until = deadline(now, self.policy.lockout_duration);
            self.locked_until = Some(until);
            return FailureOutcome {
                locked: true,
                remaining_attempts: 0,
                locked_until: Some(until),
            };
        }

        FailureOutcome {
            locked: false,
            remaining_attempts: self.policy.max_attempts - self.failed_attempts,
            locked_until: None,
        }
    }

    /// Successful authentication: counter 0, lock cleared
    pub fn record_success(&mut self) {
        self.unlock();
    }

    fn unlock(&mut self) {
        self.failed_attempts = 0;
        self.locked_until = None;
        self.last_failure_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_761_600_000, 0).unwrap()
    }

    #[test]
    fn test_default_policy() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.lockout_duration(), Duration::minutes(5));
        assert_eq!(policy.lockout_minutes(), 5);
    }

    #[test]
    fn test_policy_clamps_zero_attempts() {
        let policy = LockoutPolicy::new(0, Duration::seconds(90));
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.lockout_minutes(), 2);
    }

    #[test]
    fn test_fresh_guard_is_open() {
        let mut guard = LoginGuard::default();
        assert!(!guard.is_blocked(t0()));
        assert_eq!(guard.state(t0()), GuardState::Open);
        assert!(guard.is_pristine());
    }

    #[test]
    fn test_remaining_attempts_count_down() {
        let mut guard = LoginGuard::default();

        let first = guard.record_failure(t0());
        assert!(!first.locked);
        assert_eq!(first.remaining_attempts, 2);

        let second = guard.record_failure(t0());
        assert!(!second.locked);
        assert_eq!(second.remaining_attempts, 1);
        assert_eq!(guard.failed_attempts(), 2);
    }

    #[test]
    fn test_third_failure_locks() {
        let mut guard = LoginGuard::default();
        guard.record_failure(t0());
        guard.record_failure(t0());
        let third = guard.record_failure(t0());

        assert!(third.locked);
        assert_eq!(third.remaining_attempts, 0);
        assert_eq!(third.locked_until, Some(t0() + Duration::minutes(5)));
        assert_eq!(
            guard.state(t0()),
            GuardState::Locked {
                until: t0() + Duration::minutes(5)
            }
        );
    }

    fn locked_guard() -> LoginGuard {
        let mut guard = LoginGuard::default();
        for _ in 0..3 {
            guard.record_failure(t0());
        }
        guard
    }

    #[test]
    fn test_blocked_before_expiry() {
        let mut guard = locked_guard();
        assert!(guard.is_blocked(t0() + Duration::minutes(4)));
        assert!(guard.is_blocked(t0() + Duration::seconds(299)));
    }

    #[test]
    fn test_is_blocked_is_idempotent_before_expiry() {
        let mut guard = locked_guard();
        let before = guard.clone();
        let now = t0() + Duration::minutes(1);
        assert!(guard.is_blocked(now));
        assert!(guard.is_blocked(now));
        assert_eq!(guard, before);
    }

    #[test]
    fn test_expiry_at_deadline_unlocks_and_resets() {
        let mut guard = locked_guard();
        assert!(!guard.is_blocked(t0() + Duration::minutes(5)));
        assert_eq!(guard.failed_attempts(), 0);
        assert!(guard.locked_until().is_none());
        assert!(guard.is_pristine());
    }

    #[test]
    fn test_failure_while_locked_is_not_counted() {
        let mut guard = locked_guard();
        let outcome = guard.record_failure(t0() + Duration::minutes(1));
        assert!(outcome.locked);
        assert_eq!(outcome.locked_until, Some(t0() + Duration::minutes(5)));
        assert_eq!(guard.failed_attempts(), 3);
    }

    #[test]
    fn test_failure_after_expiry_starts_fresh() {
        let mut guard = locked_guard();
        let outcome = guard.record_failure(t0() + Duration::minutes(6));
        assert!(!outcome.locked);
        assert_eq!(outcome.remaining_attempts, 2);
        assert_eq!(guard.failed_attempts(), 1);
    }

    #[test]
    fn test_success_resets_from_any_state() {
        let mut guard = LoginGuard::default();
        guard.record_failure(t0());
        guard.record_success();
        assert!(guard.is_pristine());

        let mut guard = locked_guard();
        guard.record_success();
        assert!(guard.is_pristine());
        assert!(!guard.is_blocked(t0()));
    }

    #[test]
    fn test_remaining_lock() {
        let guard = locked_guard();
        assert_eq!(
            guard.remaining_lock(t0() + Duration::minutes(2)),
            Some(Duration::minutes(3))
        );
        assert_eq!(guard.remaining_lock(t0() + Duration::minutes(5)), None);
    }

    #[test]
    fn test_huge_lockout_saturates_instead_of_overflowing() {
        let policy = LockoutPolicy::new(3, Duration::seconds(1_000_000_000_000_000));
        let mut guard = LoginGuard::new(policy);
        guard.record_failure(t0());
        guard.record_failure(t0());
        let third = guard.record_failure(t0());

        assert!(third.locked);
        assert_eq!(third.locked_until, Some(DateTime::<Utc>::MAX_UTC));
        assert!(guard.is_blocked(t0() + Duration::days(365)));
        assert!(guard.remaining_lock(t0()).is_some());
    }

    #[test]
    fn test_negative_lockout_is_clamped() {
        let policy = LockoutPolicy::new(1, Duration::seconds(-120));
        assert_eq!(policy.lockout_duration(), Duration::zero());
        assert_eq!(policy.lockout_minutes(), 0);

        let mut guard = LoginGuard::new(policy);
        assert!(guard.record_failure(t0()).locked);
        assert!(!guard.is_blocked(t0()));
    }

    #[test]
    fn test_staleness() {
        assert!(LoginGuard::default().is_stale(t0()));

        let mut guard = LoginGuard::default();
        guard.record_failure(t0());
        assert!(!guard.is_stale(t0() + Duration::minutes(4)));
        assert!(guard.is_stale(t0() + Duration::minutes(5)));

        let guard = locked_guard();
        assert!(!guard.is_stale(t0() + Duration::seconds(299)));
        assert!(guard.is_stale(t0() + Duration::minutes(5)));
    }

    #[test]
    fn test_custom_policy() {
        let mut guard = LoginGuard::new(LockoutPolicy::new(1, Duration::seconds(30)));
        let outcome = guard.record_failure(t0());
        assert!(outcome.locked);
        assert!(guard.is_blocked(t0() + Duration::seconds(29)));
        assert!(!guard.is_blocked(t0() + Duration::seconds(30)));
    }
}
