//! User Name Value Object
//!
//! NFKC-normalized, trimmed, lowercased handle of at least
//! [`USER_NAME_MIN_LENGTH`] characters.

use kernel::error::app_error::{AppError, AppResult};
use platform::text::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: &str) -> AppResult<Self> {
        Self::with_min_length(raw, USER_NAME_MIN_LENGTH)
    }

    pub fn with_min_length(raw: &str, min_length: usize) -> AppResult<Self> {
        let name = normalize(raw).to_lowercase();

        if name.chars().count() < min_length {
            return Err(AppError::bad_request(format!(
                "User name must be at least {} characters",
                min_length
            )));
        }

        if name.chars().any(char::is_whitespace) {
            return Err(AppError::bad_request("User name cannot contain spaces"));
        }

        Ok(Self(name))
    }

    /// Seed data or a name derived from another validated value (the
    /// local part of an e-mail); normalized but not length-checked
    pub fn from_trusted(raw: &str) -> Self {
        Self(normalize(raw).to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
