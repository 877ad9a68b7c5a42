//! Two-Factor Code
//!
//! Six-digit numeric code checked after a successful password login.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

pub const TWO_FACTOR_CODE_LENGTH: usize = 6;

#[derive(Clone, PartialEq, Eq)]
pub struct TwoFactorCode(String);

impl TwoFactorCode {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let code = raw.trim();
        if code.len() != TWO_FACTOR_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request(format!(
                "Code must be {} digits",
                TWO_FACTOR_CODE_LENGTH
            )));
        }
        Ok(Self(code.to_string()))
    }

    /// Fresh random code for a new account
    pub fn generate() -> Self {
        Self(platform::random::numeric_code(TWO_FACTOR_CODE_LENGTH))
    }

    pub fn matches(&self, other: &TwoFactorCode) -> bool {
        self.0 == other.0
    }
}

impl fmt::Debug for TwoFactorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TwoFactorCode(******)")
    }
}
