//! Value Object Module

pub mod cpf;
pub mod email;
pub mod identifier;
pub mod password;
pub mod two_factor_code;
pub mod user_name;
pub mod user_role;

pub use cpf::{Cpf, KnownCpfs, validate_cpf};
pub use email::Email;
pub use identifier::{Identifier, IdentifierKind};
pub use password::{Password, PasswordStrength, StrengthLevel};
pub use two_factor_code::TwoFactorCode;
pub use user_name::UserName;
pub use user_role::UserRole;
