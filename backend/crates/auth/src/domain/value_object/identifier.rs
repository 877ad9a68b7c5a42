//! Login Identifier
//!
//! The login form has a single field that accepts a CPF, an e-mail or a
//! user name. [`Identifier::classify`] decides which one by shape alone;
//! format validation happens afterwards in the matching value object.

use derive_more::Display;
use platform::text::digits_only;

use super::cpf::CPF_LENGTH;

/// Which kind of identifier was typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IdentifierKind {
    #[display("CPF")]
    Cpf,
    #[display("E-mail")]
    Email,
    #[display("User")]
    UserName,
}

impl IdentifierKind {
    /// Prefix used for lockout keys of unknown accounts
    const fn key_prefix(&self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Email => "email",
            Self::UserName => "user_name",
        }
    }
}

/// Classified login identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Bare digits, punctuation already stripped
    Cpf(String),
    /// Trimmed input containing `@`
    Email(String),
    /// Anything else, trimmed
    UserName(String),
}

impl Identifier {
    /// Classify by shape:
    /// - contains `@` → e-mail
    /// - exactly 11 digits once non-digits are stripped → CPF
    /// - otherwise → user name
    pub fn classify(raw: &str) -> Self {
        let value = raw.trim();

        if value.contains('@') {
            return Self::Email(value.to_string());
        }

        let digits = digits_only(value);
        if digits.len() == CPF_LENGTH {
            return Self::Cpf(digits);
        }

        Self::UserName(value.to_string())
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Cpf(_) => IdentifierKind::Cpf,
            Self::Email(_) => IdentifierKind::Email,
            Self::UserName(_) => IdentifierKind::UserName,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Cpf(v) | Self::Email(v) | Self::UserName(v) => v,
        }
    }

    /// Lockout key for identifiers that do not resolve to an account
    pub fn guard_key(&self) -> String {
        format!("{}:{}", self.kind().key_prefix(), self.as_str().to_lowercase())
    }
}
