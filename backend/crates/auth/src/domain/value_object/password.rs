//! Password Value Object
//!
//! Demo credentials are compared as plain text; there is no hashing in
//! this backend. The wrapper keeps the secret out of `Debug` output and
//! logs, and owns the strength meter shown on the registration form.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// Minimum password length for new passwords
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Length from which a password counts as "long"
const LONG_PASSWORD_LENGTH: usize = 10;

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// New password chosen by the user; enforces `min_length`
    pub fn new(raw: &str, min_length: usize) -> AppResult<Self> {
        if raw.chars().count() < min_length {
            return Err(AppError::bad_request(format!(
                "Password must be at least {} characters",
                min_length
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Seed credential, accepted as-is
    pub fn from_fixture(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::evaluate(&self.0)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

// ============================================================================
// Strength meter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StrengthLevel {
    VeryWeak = 0,
    Weak = 1,
    Medium = 2,
    Strong = 3,
    VeryStrong = 4,
}

impl StrengthLevel {
    #[inline]
    pub const fn score(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }

    /// Meter color used by the web client
    #[inline]
    pub const fn color(&self) -> &'static str {
        match self {
            Self::VeryWeak => "#EF4444",
            Self::Weak => "#F59E0B",
            Self::Medium => "#FCD34D",
            Self::Strong => "#10B981",
            Self::VeryStrong => "#059669",
        }
    }
}

/// Strength report; `level` is `None` for an empty password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordStrength {
    pub score: u8,
    pub level: Option<StrengthLevel>,
    pub color: Option<&'static str>,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        if password.is_empty() {
            return Self {
                score: 0,
                level: None,
                color: None,
            };
        }

        let level = Self::level_of(password);
        Self {
            score: level.score(),
            level: Some(level),
            color: Some(level.color()),
        }
    }

    fn level_of(password: &str) -> StrengthLevel {
        let length = password.chars().count();
        if length < PASSWORD_MIN_LENGTH {
            return StrengthLevel::VeryWeak;
        }

        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_other = password.chars().any(|c| !c.is_ascii_alphanumeric());
        let classes = [has_lower, has_upper, has_digit, has_other]
            .iter()
            .filter(|present| **present)
            .count();

        if classes == 4 && length >= LONG_PASSWORD_LENGTH {
            StrengthLevel::VeryStrong
        } else if has_lower && has_upper && has_digit {
            StrengthLevel::Strong
        } else if length >= LONG_PASSWORD_LENGTH {
            StrengthLevel::Medium
        } else {
            StrengthLevel::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(pw: &str) -> Option<StrengthLevel> {
        PasswordStrength::evaluate(pw).level
    }

    #[test]
    fn test_min_length() {
        assert!(Password::new("123456", PASSWORD_MIN_LENGTH).is_ok());
        assert!(Password::new("12345", PASSWORD_MIN_LENGTH).is_err());
        assert!(Password::new("", PASSWORD_MIN_LENGTH).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let pw = Password::from_fixture("admin123");
        assert_eq!(format!("{:?}", pw), "Password(***)");
        assert!(pw.matches("admin123"));
        assert!(!pw.matches("admin1234"));
    }

    #[test]
    fn test_empty_has_no_level() {
        let s = PasswordStrength::evaluate("");
        assert_eq!(s.score, 0);
        assert!(s.level.is_none());
        assert!(s.color.is_none());
    }

    #[test]
    fn test_short_is_very_weak() {
        assert_eq!(level("Ab1!"), Some(StrengthLevel::VeryWeak));
        assert_eq!(level("12345"), Some(StrengthLevel::VeryWeak));
    }

    #[test]
    fn test_weak_and_medium() {
        assert_eq!(level("abcdef"), Some(StrengthLevel::Weak));
        assert_eq!(level("abcdefghij"), Some(StrengthLevel::Medium));
    }

    #[test]
    fn test_strong_needs_three_classes() {
        assert_eq!(level("Abcde1"), Some(StrengthLevel::Strong));
        // All four classes but short
        assert_eq!(level("Abc1!x"), Some(StrengthLevel::Strong));
        // Long with digits and symbols but no uppercase
        assert_eq!(level("abcdefg1!x"), Some(StrengthLevel::Medium));
    }

    #[test]
    fn test_very_strong() {
        assert_eq!(level("Abcdefg1!x"), Some(StrengthLevel::VeryStrong));
        let s = PasswordStrength::evaluate("Abcdefg1!x");
        assert_eq!(s.score, 4);
        assert_eq!(s.color, Some("#059669"));
    }
}
