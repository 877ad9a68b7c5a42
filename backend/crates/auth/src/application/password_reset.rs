//! Password Reset
//!
//! Validation of the "new password" form and the strength meter shown
//! next to it. Nothing is persisted here.

use crate::domain::value_object::password::PasswordStrength;
use crate::error::{AuthError, AuthResult};

pub struct ResetPasswordInput {
    pub new_password: String,
    pub confirm_password: String,
}

/// Check a new password pair; `Ok(())` means the form is acceptable
pub fn validate_reset(input: &ResetPasswordInput, min_length: usize) -> AuthResult<()> {
    if input.new_password.is_empty() || input.confirm_password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if input.new_password != input.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if input.new_password.chars().count() < min_length {
        return Err(AuthError::WeakPassword { min: min_length });
    }
    Ok(())
}

pub fn password_strength(password: &str) -> PasswordStrength {
    PasswordStrength::evaluate(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(new_password: &str, confirm_password: &str) -> ResetPasswordInput {
        ResetPasswordInput {
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    #[test]
    fn test_blank_fields() {
        assert!(matches!(
            validate_reset(&input("", "abcdef"), 6),
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            validate_reset(&input("abcdef", ""), 6),
            Err(AuthError::MissingFields)
        ));
    }

    #[test]
    fn test_mismatch_before_length() {
        assert!(matches!(
            validate_reset(&input("abc", "abd"), 6),
            Err(AuthError::PasswordMismatch)
        ));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            validate_reset(&input("abc12", "abc12"), 6),
            Err(AuthError::WeakPassword { min: 6 })
        ));
    }

    #[test]
    fn test_accepts_valid_pair() {
        assert!(validate_reset(&input("novaSenha1", "novaSenha1"), 6).is_ok());
    }
}
