//! Server Configuration
//!
//! Read once at startup from the environment (after `.env`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::ops::RangeInclusive;
use std::str::FromStr;

use anyhow::{Context, ensure};
use auth::AuthConfig;
use auth::models::LockoutPolicy;
use chrono::Duration;
use ledger::LedgerConfig;

/// Accepted range for the lockout and 2FA lifetimes, in seconds (up to 1 day)
const WINDOW_SECS: RangeInclusive<i64> = 1..=86_400;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Seed demo users, demo ledger and the demo CPF allow-list
    pub demo_mode: bool,
    pub login_max_attempts: u32,
    pub login_lockout_secs: i64,
    pub two_factor_ttl_secs: i64,
    /// CORS allow-list; empty allows any origin
    pub frontend_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            demo_mode: cfg!(debug_assertions),
            login_max_attempts: LockoutPolicy::MAX_ATTEMPTS,
            login_lockout_secs: LockoutPolicy::LOCKOUT_MINUTES * 60,
            two_factor_ttl_secs: 300,
            frontend_origins: Vec::new(),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

fn parse_in<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    range: RangeInclusive<T>,
) -> anyhow::Result<T>
where
    T: FromStr + PartialOrd + std::fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = parse_or(lookup, key, default)?;
    ensure!(
        range.contains(&value),
        "{key} must be between {} and {}, got {value}",
        range.start(),
        range.end()
    );
    Ok(value)
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let frontend_origins = lookup("FRONTEND_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            port: parse_or(&lookup, "PORT", defaults.port)?,
            demo_mode: parse_or(&lookup, "INWISTA_DEMO_MODE", defaults.demo_mode)?,
            login_max_attempts: parse_in(
                &lookup,
                "LOGIN_MAX_ATTEMPTS",
                defaults.login_max_attempts,
                1..=u32::MAX,
            )?,
            login_lockout_secs: parse_in(
                &lookup,
                "LOGIN_LOCKOUT_SECS",
                defaults.login_lockout_secs,
                WINDOW_SECS,
            )?,
            two_factor_ttl_secs: parse_in(
                &lookup,
                "TWO_FACTOR_TTL_SECS",
                defaults.two_factor_ttl_secs,
                WINDOW_SECS,
            )?,
            frontend_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn auth_config(&self) -> AuthConfig {
        let base = if self.demo_mode {
            AuthConfig::development()
        } else {
            AuthConfig::default()
        };
        base.with_lockout(LockoutPolicy::new(
            self.login_max_attempts,
            Duration::seconds(self.login_lockout_secs),
        ))
        .with_two_factor_ttl(Duration::seconds(self.two_factor_ttl_secs))
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        if self.demo_mode {
            LedgerConfig::development()
        } else {
            LedgerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.login_max_attempts, 3);
        assert_eq!(config.login_lockout_secs, 300);
        assert!(config.frontend_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("INWISTA_DEMO_MODE", "false"),
            ("LOGIN_MAX_ATTEMPTS", "5"),
            ("LOGIN_LOCKOUT_SECS", "60"),
            ("FRONTEND_ORIGINS", "http://localhost:5173, https://app.inwista.com,"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert!(!config.demo_mode);
        assert_eq!(
            config.frontend_origins,
            ["http://localhost:5173", "https://app.inwista.com"]
        );

        let auth = config.auth_config();
        assert_eq!(auth.lockout.max_attempts(), 5);
        assert_eq!(auth.lockout.lockout_minutes(), 1);
        assert!(auth.known_cpfs.is_empty());
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_lifetimes_out_of_range_are_rejected() {
        for (key, value) in [
            ("LOGIN_LOCKOUT_SECS", "1000000000000000"),
            ("LOGIN_LOCKOUT_SECS", "0"),
            ("LOGIN_LOCKOUT_SECS", "-300"),
            ("TWO_FACTOR_TTL_SECS", "86401"),
            ("TWO_FACTOR_TTL_SECS", "-1"),
            ("LOGIN_MAX_ATTEMPTS", "0"),
        ] {
            let err = ServerConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(err.to_string().contains(key), "{key}={value}: {err}");
        }

        let config = ServerConfig::from_lookup(lookup(&[
            ("LOGIN_LOCKOUT_SECS", "86400"),
            ("TWO_FACTOR_TTL_SECS", "1"),
        ]))
        .unwrap();
        assert_eq!(config.auth_config().lockout.lockout_minutes(), 1440);
    }

    #[test]
    fn test_demo_mode_enables_allow_list() {
        let config = ServerConfig::from_lookup(lookup(&[("INWISTA_DEMO_MODE", "true")])).unwrap();
        assert!(config.auth_config().known_cpfs.contains("12345678900"));
    }
}
