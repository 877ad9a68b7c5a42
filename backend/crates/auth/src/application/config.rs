//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;

use crate::domain::entity::login_guard::LockoutPolicy;
use crate::domain::value_object::{
    cpf::KnownCpfs, password::PASSWORD_MIN_LENGTH, user_name::USER_NAME_MIN_LENGTH,
};

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Failed-attempt threshold and lockout duration
    pub lockout: LockoutPolicy,
    /// CPFs accepted without a checksum check
    pub known_cpfs: KnownCpfs,
    /// Lifetime of a pending second-factor challenge (5 minutes)
    pub two_factor_ttl: Duration,
    /// Wrong codes tolerated per challenge
    pub two_factor_max_attempts: u32,
    /// Minimum password length on sign-up and reset
    pub password_min_length: usize,
    /// Minimum user name length accepted on sign-in
    pub user_name_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lockout: LockoutPolicy::default(),
            known_cpfs: KnownCpfs::none(),
            two_factor_ttl: Duration::minutes(5),
            two_factor_max_attempts: LockoutPolicy::MAX_ATTEMPTS,
            password_min_length: PASSWORD_MIN_LENGTH,
            user_name_min_length: USER_NAME_MIN_LENGTH,
        }
    }
}

impl AuthConfig {
    /// Create config for development (demo CPF allow-list)
    pub fn development() -> Self {
        Self {
            known_cpfs: KnownCpfs::demo(),
            ..Default::default()
        }
    }

    pub fn with_lockout(mut self, lockout: LockoutPolicy) -> Self {
        self.lockout = lockout;
        self
    }

    pub fn with_two_factor_ttl(mut self, ttl: Duration) -> Self {
        self.two_factor_ttl = ttl;
        self
    }

    /// 2FA TTL in seconds
    pub fn two_factor_ttl_secs(&self) -> i64 {
        self.two_factor_ttl.num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_allow_list() {
        let config = AuthConfig::default();
        assert!(config.known_cpfs.is_empty());
        assert_eq!(config.lockout.max_attempts(), 3);
        assert_eq!(config.two_factor_ttl_secs(), 300);
        assert_eq!(config.two_factor_max_attempts, 3);
    }

    #[test]
    fn test_development_seeds_demo_cpfs() {
        let config = AuthConfig::development();
        assert!(config.known_cpfs.contains("12345678900"));
        assert!(!config.known_cpfs.contains("99999999999"));
    }
}
